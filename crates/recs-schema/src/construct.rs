//! # Validating Construction
//!
//! The generic constructor shared by every record type. It checks the
//! supplied arguments against the type's descriptor and produces a frozen
//! [`Record`] only when every check passes.
//!
//! ## Phases
//!
//! ```text
//! arguments ──▶ Staging (open, private) ──freeze()──▶ Record (frozen)
//!                   │
//!                   └── any violation ──▶ dropped, ValidationError
//! ```
//!
//! `Staging` is the only writer of field values and is never handed out,
//! so code outside this module cannot write during the open phase. A
//! failed construction drops the staging area with everything in it.
//!
//! ## Check order
//!
//! 1. Missing fields, in descriptor order.
//! 2. Unknown and repeated argument names, in supply order.
//! 3. Preconditions, in descriptor order.
//!
//! All violations are collected before failing.

use indexmap::IndexMap;
use recs_core::{ValidationError, Value, Violation, Violations};

use crate::record::Record;
use crate::record_type::RecordType;

/// The open phase of one construction: values that passed their checks,
/// in descriptor order.
struct Staging<'t> {
    record_type: &'t RecordType,
    values: Vec<Value>,
}

impl<'t> Staging<'t> {
    fn open(record_type: &'t RecordType) -> Self {
        Self {
            record_type,
            values: Vec::with_capacity(record_type.len()),
        }
    }

    fn write(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Close the open phase. Only called once every field has been written.
    fn freeze(self) -> Record {
        debug_assert_eq!(self.values.len(), self.record_type.len());
        Record::frozen(self.record_type.clone(), self.values)
    }
}

impl RecordType {
    /// Construct a record from named arguments.
    ///
    /// ```
    /// use recs_schema::{Field, RecordType};
    ///
    /// let point = RecordType::builder("Point")
    ///     .field("x", Field::new("Horizontal position"))
    ///     .field("y", Field::new("Vertical position"))
    ///     .build()?;
    /// let p = point.construct([("x", 1), ("y", 2)])?;
    /// assert_eq!(p.get("y").and_then(|v| v.as_i64()), Some(2));
    /// # Ok::<(), recs_schema::RecsError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every missing field, unknown or
    /// repeated argument, and failed precondition. No record is produced.
    pub fn construct<I, K, V>(&self, args: I) -> Result<Record, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut supplied: IndexMap<String, Value> = IndexMap::new();
        let mut argument_violations = Vec::new();
        for (name, value) in args {
            let name = name.into();
            if supplied.contains_key(&name) {
                argument_violations.push(Violation::DuplicateArgument { field: name });
                continue;
            }
            if !self.contains(&name) {
                argument_violations.push(Violation::Unknown {
                    field: name.clone(),
                });
            }
            supplied.insert(name, value.into());
        }

        let mut violations = Violations::new();
        for name in self.field_names() {
            if !supplied.contains_key(name) {
                violations.push(Violation::Missing {
                    field: name.to_string(),
                });
            }
        }
        for v in argument_violations {
            violations.push(v);
        }

        let mut staging = Staging::open(self);
        for (name, field) in self.fields() {
            let Some(value) = supplied.swap_remove(name) else {
                continue;
            };
            let verdict = match field.precondition() {
                Some(p) => p.evaluate(&value),
                None => Ok(true),
            };
            match verdict {
                Ok(true) => staging.write(value),
                Ok(false) => violations.push(Violation::PreconditionFailed {
                    field: name.clone(),
                    value,
                    reason: None,
                }),
                Err(e) => violations.push(Violation::PreconditionFailed {
                    field: name.clone(),
                    value,
                    reason: Some(e.to_string()),
                }),
            }
        }

        if !violations.is_empty() {
            tracing::debug!(
                record = %self.name(),
                violations = violations.len(),
                "rejected construction"
            );
            return Err(ValidationError {
                record: self.name().to_string(),
                violations,
            });
        }

        Ok(staging.freeze())
    }

    /// Construct a record from values given in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] with a [`Violation::Arity`] when the
    /// number of values differs from the number of fields, otherwise the
    /// same errors as [`construct`](Self::construct).
    pub fn construct_positional<I, V>(&self, values: I) -> Result<Record, ValidationError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() != self.len() {
            let mut violations = Violations::new();
            violations.push(Violation::Arity {
                expected: self.len(),
                actual: values.len(),
            });
            return Err(ValidationError {
                record: self.name().to_string(),
                violations,
            });
        }

        let names: Vec<String> = self.field_names().map(str::to_string).collect();
        self.construct(names.into_iter().zip(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recs_core::{Check, Field, Precondition, PreconditionError};

    fn person() -> RecordType {
        RecordType::builder("Person")
            .doc("A simple person record")
            .field("name", Field::new("The name"))
            .field(
                "age",
                Field::new("The person's age")
                    .with_predicate(|v| v.as_i64().is_some_and(|a| (0..=150).contains(&a))),
            )
            .field(
                "income",
                Field::new("The person's income").with_check(Check::Range {
                    min: Some(0.0),
                    max: None,
                }),
            )
            .build()
            .unwrap()
    }

    fn args(
        name: &str,
        age: impl Into<Value>,
        income: impl Into<Value>,
    ) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(name)),
            ("age", age.into()),
            ("income", income.into()),
        ]
    }

    #[test]
    fn test_valid_construction_reads_back() {
        let james = person().construct(args("JAMES", 110, 24000.0)).unwrap();
        assert_eq!(james.get("name"), Some(&Value::from("JAMES")));
        assert_eq!(james.get("age"), Some(&Value::Int(110)));
        assert_eq!(james.get("income"), Some(&Value::Float(24000.0)));
    }

    #[test]
    fn test_precondition_out_of_range() {
        for age in [160, -1] {
            let err = person().construct(args("JAMES", age, 24000.0)).unwrap_err();
            assert_eq!(err.violations.len(), 1);
            assert!(err.has(|v| matches!(
                v,
                Violation::PreconditionFailed { field, reason: None, .. } if field == "age"
            )));
        }
    }

    #[test]
    fn test_text_where_number_expected() {
        let err = person().construct(args("JAMES", "150", 24000.0)).unwrap_err();
        assert!(err.has(|v| v.field() == Some("age")));
    }

    #[test]
    fn test_missing_fields() {
        let err = person().construct([("name", "JAMES")]).unwrap_err();
        let missing: Vec<_> = err
            .violations
            .violations()
            .iter()
            .filter_map(|v| match v {
                Violation::Missing { field } => Some(field.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(missing, ["age", "income"]);
    }

    #[test]
    fn test_unknown_field() {
        let err = person()
            .construct(vec![
                ("name", Value::from("JAMES")),
                ("age", Value::from("150")),
                ("wealth", Value::from(24000.0)),
            ])
            .unwrap_err();
        assert!(err.has(|v| matches!(v, Violation::Unknown { field } if field == "wealth")));
        assert!(err.has(|v| matches!(v, Violation::Missing { field } if field == "income")));
        assert!(err.has(|v| matches!(v, Violation::PreconditionFailed { field, .. } if field == "age")));
    }

    #[test]
    fn test_extra_field_alone_fails() {
        let mut a = args("JAMES", 34, 24000.0);
        a.push(("wealth", Value::Float(24000.0)));
        let err = person().construct(a).unwrap_err();
        assert_eq!(
            err.violations.violations(),
            [Violation::Unknown {
                field: "wealth".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_argument() {
        let mut a = args("JAMES", 34, 24000.0);
        a.push(("age", Value::Int(35)));
        let err = person().construct(a).unwrap_err();
        assert!(err.has(|v| matches!(v, Violation::DuplicateArgument { field } if field == "age")));
    }

    #[test]
    fn test_violation_order() {
        let err = person()
            .construct(vec![("age", Value::Int(200)), ("bogus", Value::Int(1))])
            .unwrap_err();
        let kinds: Vec<&str> = err
            .violations
            .violations()
            .iter()
            .map(|v| match v {
                Violation::Missing { .. } => "missing",
                Violation::Unknown { .. } => "unknown",
                Violation::DuplicateArgument { .. } => "duplicate",
                Violation::Arity { .. } => "arity",
                Violation::PreconditionFailed { .. } => "precondition",
            })
            .collect();
        assert_eq!(kinds, ["missing", "missing", "unknown", "precondition"]);
    }

    #[test]
    fn test_unknown_and_repeated_names_keep_supply_order() {
        let err = person()
            .construct(vec![
                ("name", Value::from("JAMES")),
                ("name", Value::from("JIM")),
                ("wealth", Value::Int(1)),
                ("age", Value::Int(34)),
                ("income", Value::Float(1.0)),
                ("wealth", Value::Int(2)),
                ("zip", Value::Int(3)),
            ])
            .unwrap_err();
        assert_eq!(
            err.violations.violations(),
            [
                Violation::DuplicateArgument {
                    field: "name".to_string()
                },
                Violation::Unknown {
                    field: "wealth".to_string()
                },
                Violation::DuplicateArgument {
                    field: "wealth".to_string()
                },
                Violation::Unknown {
                    field: "zip".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_erroring_predicate_fails_with_reason() {
        let t = RecordType::builder("T")
            .field(
                "x",
                Field::new("X").with_precondition(Precondition::fallible(|_| {
                    Err(PreconditionError::new("cannot compare"))
                })),
            )
            .build()
            .unwrap();
        let err = t.construct([("x", 1)]).unwrap_err();
        assert_eq!(
            err.violations.violations(),
            [Violation::PreconditionFailed {
                field: "x".to_string(),
                value: Value::Int(1),
                reason: Some("cannot compare".to_string()),
            }]
        );
    }

    #[test]
    fn test_no_type_checking_without_precondition() {
        let t = RecordType::builder("T")
            .field("anything", Field::new("Anything"))
            .build()
            .unwrap();
        assert!(t.construct([("anything", true)]).is_ok());
        assert!(t.construct([("anything", "text")]).is_ok());
    }

    #[test]
    fn test_positional_construction() {
        let james = person()
            .construct_positional([Value::from("JAMES"), Value::Int(34), Value::Float(24000.0)])
            .unwrap();
        assert_eq!(james.get("age"), Some(&Value::Int(34)));
    }

    #[test]
    fn test_positional_arity_mismatch() {
        let err = person()
            .construct_positional([Value::from("JAMES")])
            .unwrap_err();
        assert_eq!(
            err.violations.violations(),
            [Violation::Arity {
                expected: 3,
                actual: 1
            }]
        );
    }

    #[test]
    fn test_empty_type_constructs_from_no_arguments() {
        let t = RecordType::builder("Unit").build().unwrap();
        let r = t.construct(Vec::<(String, Value)>::new()).unwrap();
        assert_eq!(r.len(), 0);
    }
}
