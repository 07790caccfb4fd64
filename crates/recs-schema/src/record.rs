//! # Frozen Records
//!
//! A `Record` is an instance of a [`RecordType`] past its construction
//! point. Its values are private and nothing in its API writes them, so the
//! frozen state needs no runtime flag.
//!
//! Callers that address fields dynamically get [`Record::assign`], which
//! always rejects the write with an [`ImmutabilityViolation`]. To obtain a
//! record with a different value, use [`Record::with_value`]: it builds a
//! new record through the validating constructor and leaves this one alone.

use std::fmt;

use recs_core::{Field, ImmutabilityViolation, ValidationError, Value};

use crate::record_type::RecordType;
use crate::render;

/// An immutable, validated instance of a record type.
///
/// Every field of the owning type holds a value that satisfied the field's
/// precondition when the record was built.
#[derive(Clone)]
pub struct Record {
    record_type: RecordType,
    /// One value per field, in descriptor order.
    values: Vec<Value>,
}

impl Record {
    /// Only the constructor's freeze step creates records.
    pub(crate) fn frozen(record_type: RecordType, values: Vec<Value>) -> Self {
        Self {
            record_type,
            values,
        }
    }

    /// The type this record was built from.
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// The name of the record's type.
    pub fn type_name(&self) -> &str {
        self.record_type.name()
    }

    /// Read one field's value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record_type
            .position(name)
            .and_then(|i| self.values.get(i))
    }

    /// Values in descriptor order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `(name, field, value)` triples in descriptor order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Field, &Value)> {
        self.record_type
            .fields()
            .iter()
            .zip(&self.values)
            .map(|((name, field), value)| (name.as_str(), field, value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attempt to write a field.
    ///
    /// Records are frozen once built, so this always fails and the record
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Always returns [`ImmutabilityViolation`].
    pub fn assign(&self, name: &str, value: impl Into<Value>) -> Result<(), ImmutabilityViolation> {
        let value = value.into();
        tracing::warn!(
            record = %self.type_name(),
            field = %name,
            value = %value.to_literal(),
            "rejected write to frozen record"
        );
        Err(ImmutabilityViolation {
            record: self.type_name().to_string(),
            field: name.to_string(),
        })
    }

    /// Build a new record of the same type with one field replaced.
    ///
    /// The new value goes through the full constructor, precondition
    /// included. `self` is not modified.
    ///
    /// # Errors
    ///
    /// Returns the constructor's [`ValidationError`], including an unknown
    /// field violation when `name` is not a field of this type.
    pub fn with_value(&self, name: &str, value: impl Into<Value>) -> Result<Record, ValidationError> {
        let mut args: Vec<(String, Value)> = self
            .entries()
            .map(|(n, _, v)| (n.to_string(), v.clone()))
            .collect();
        let value = value.into();
        match args.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => args.push((name.to_string(), value)),
        }
        self.record_type.construct(args)
    }
}

impl PartialEq for Record {
    /// Records are equal when their types match and every value is equal.
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type && self.values == other.values
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.type_name());
        for (name, _, value) in self.entries() {
            s.field(name, value);
        }
        s.finish()
    }
}

impl fmt::Display for Record {
    /// The documented rendering, see [`render`](crate::render::render).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_record(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recs_core::Violation;

    fn person() -> RecordType {
        RecordType::builder("Person")
            .field("name", Field::new("The name"))
            .field(
                "age",
                Field::new("The person's age")
                    .with_predicate(|v| v.as_i64().is_some_and(|a| (0..=150).contains(&a))),
            )
            .build()
            .unwrap()
    }

    fn james() -> Record {
        person()
            .construct(vec![("name", Value::from("JAMES")), ("age", Value::Int(34))])
            .unwrap()
    }

    #[test]
    fn test_assign_is_rejected_and_value_kept() {
        let james = james();
        let err = james.assign("age", 32).unwrap_err();
        assert_eq!(
            err,
            ImmutabilityViolation {
                record: "Person".to_string(),
                field: "age".to_string(),
            }
        );
        assert_eq!(james.get("age"), Some(&Value::Int(34)));
    }

    #[test]
    fn test_assign_unknown_field_is_rejected_too() {
        assert!(james().assign("wealth", 1.0).is_err());
    }

    #[test]
    fn test_with_value_builds_new_record() {
        let james = james();
        let older = james.with_value("age", 35).unwrap();
        assert_eq!(older.get("age"), Some(&Value::Int(35)));
        assert_eq!(james.get("age"), Some(&Value::Int(34)));
        assert_ne!(james, older);
    }

    #[test]
    fn test_with_value_validates() {
        let err = james().with_value("age", 160).unwrap_err();
        assert!(err.has(|v| matches!(v, Violation::PreconditionFailed { .. })));
        let err = james().with_value("wealth", 1.0).unwrap_err();
        assert!(err.has(|v| matches!(v, Violation::Unknown { field } if field == "wealth")));
    }

    #[test]
    fn test_equality() {
        assert_eq!(james(), james());
        let other_type = RecordType::builder("Employee")
            .field("name", Field::new("The name"))
            .field("age", Field::new("The person's age"))
            .build()
            .unwrap()
            .construct(vec![("name", Value::from("JAMES")), ("age", Value::Int(34))])
            .unwrap();
        assert_ne!(james(), other_type);
    }

    #[test]
    fn test_entries_follow_descriptor_order() {
        let james = james();
        let names: Vec<&str> = james.entries().map(|(n, _, _)| n).collect();
        assert_eq!(names, ["name", "age"]);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(
            format!("{:?}", james()),
            r#"Person { name: Text("JAMES"), age: Int(34) }"#
        );
    }

    #[test]
    fn test_record_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Record>();
    }
}
