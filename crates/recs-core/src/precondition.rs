//! # Preconditions
//!
//! A `Precondition` is a predicate over a supplied field value, evaluated
//! once per field at construction time. It is stored inside a [`Field`]
//! and shared by every record built from that field's type.
//!
//! Predicates come in two shapes:
//!
//! - total, `Fn(&Value) -> bool`, built with [`Precondition::new`];
//! - fallible, `Fn(&Value) -> Result<bool, PreconditionError>`, built with
//!   [`Precondition::fallible`], for predicates that cannot answer for some
//!   inputs (comparing text against a number, say).
//!
//! An error from a fallible predicate fails the field exactly as `false`
//! does; the error message is kept as the violation's reason.
//!
//! Predicates must be pure. Nothing enforces it, but the constructor may
//! evaluate them in any order relative to other fields' checks.
//!
//! [`Field`]: crate::field::Field

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PreconditionError;
use crate::value::{Value, ValueKind};

type Predicate = dyn Fn(&Value) -> Result<bool, PreconditionError> + Send + Sync;

/// A shareable predicate over field values.
///
/// Cloning is cheap (an `Arc` bump). Two preconditions are equal only when
/// they share the same predicate allocation; closures have no structural
/// equality.
#[derive(Clone)]
pub struct Precondition {
    predicate: Arc<Predicate>,
    description: Option<Arc<str>>,
}

impl Precondition {
    /// Wrap a total predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::fallible(move |value| Ok(predicate(value)))
    }

    /// Wrap a predicate that may fail to produce an answer.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, PreconditionError> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            description: None,
        }
    }

    /// Attach a human-readable description, shown by `describe` output and `Debug`.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Arc::from(description.into()));
        self
    }

    /// The description, if one was attached.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Evaluate the predicate.
    ///
    /// # Errors
    ///
    /// Returns the predicate's own error if it could not decide. Callers
    /// treat that the same as `Ok(false)`.
    pub fn evaluate(&self, value: &Value) -> Result<bool, PreconditionError> {
        (self.predicate)(value)
    }

    /// Whether `value` satisfies the predicate. Errors count as `false`.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(self.evaluate(value), Ok(true))
    }
}

impl fmt::Debug for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(d) => write!(f, "Precondition({d})"),
            None => f.write_str("Precondition(<fn>)"),
        }
    }
}

impl PartialEq for Precondition {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

// ─── Declarative checks ──────────────────────────────────────────────

/// A precondition expressed as data, so it can be written in a declaration
/// file instead of code.
///
/// Serialized externally tagged in snake_case:
///
/// ```yaml
/// check: { one_of: [air, land, water] }
/// check: { range: { min: 0, max: 150 } }
/// check: { kind: int }
/// check: non_empty
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// The value must equal one of the listed values.
    OneOf(Vec<Value>),
    /// The value must be a number within the inclusive bounds.
    /// Non-numeric values make the check error.
    Range {
        /// Inclusive lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// The value must be of the given kind.
    Kind(ValueKind),
    /// The value must be non-empty text. Non-text values make the check error.
    NonEmpty,
}

impl Check {
    /// Evaluate this check against a value.
    pub fn evaluate(&self, value: &Value) -> Result<bool, PreconditionError> {
        match self {
            Self::OneOf(options) => Ok(options.contains(value)),
            Self::Range { min, max } => {
                let x = value.as_f64().ok_or_else(|| {
                    PreconditionError::new(format!("expected a number, got {}", value.kind()))
                })?;
                Ok(min.map_or(true, |lo| lo <= x) && max.map_or(true, |hi| x <= hi))
            }
            Self::Kind(kind) => Ok(value.kind() == *kind),
            Self::NonEmpty => value
                .as_str()
                .map(|s| !s.is_empty())
                .ok_or_else(|| {
                    PreconditionError::new(format!("expected text, got {}", value.kind()))
                }),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneOf(options) => {
                let listed: Vec<String> = options.iter().map(Value::to_literal).collect();
                write!(f, "one of [{}]", listed.join(", "))
            }
            Self::Range {
                min: Some(lo),
                max: Some(hi),
            } => write!(f, "{lo} <= x <= {hi}"),
            Self::Range {
                min: Some(lo),
                max: None,
            } => write!(f, "{lo} <= x"),
            Self::Range {
                min: None,
                max: Some(hi),
            } => write!(f, "x <= {hi}"),
            Self::Range {
                min: None,
                max: None,
            } => f.write_str("any number"),
            Self::Kind(kind) => write!(f, "kind is {kind}"),
            Self::NonEmpty => f.write_str("non-empty text"),
        }
    }
}

impl From<Check> for Precondition {
    fn from(check: Check) -> Self {
        let description = check.to_string();
        Precondition::fallible(move |value| check.evaluate(value)).described(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_check() -> Precondition {
        Precondition::new(|v| v.as_i64().is_some_and(|a| (0..=150).contains(&a)))
    }

    #[test]
    fn test_total_predicate() {
        let p = age_check();
        assert!(p.accepts(&Value::Int(110)));
        assert!(!p.accepts(&Value::Int(160)));
        assert!(!p.accepts(&Value::Int(-1)));
        assert_eq!(p.evaluate(&Value::from("150")), Ok(false));
    }

    #[test]
    fn test_fallible_predicate_error_is_not_acceptance() {
        let p = Precondition::fallible(|v| {
            v.as_f64()
                .map(|x| x >= 0.0)
                .ok_or_else(|| PreconditionError::new("not a number"))
        });
        assert!(p.accepts(&Value::Float(1.0)));
        assert!(!p.accepts(&Value::from("1.0")));
        assert_eq!(
            p.evaluate(&Value::from("1.0")),
            Err(PreconditionError::new("not a number"))
        );
    }

    #[test]
    fn test_equality_is_identity() {
        let a = age_check();
        let b = a.clone();
        let c = age_check();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_uses_description() {
        let p = age_check().described("0 <= age <= 150");
        assert_eq!(format!("{p:?}"), "Precondition(0 <= age <= 150)");
        assert_eq!(format!("{:?}", age_check()), "Precondition(<fn>)");
    }

    #[test]
    fn test_check_one_of() {
        let check = Check::OneOf(vec!["air".into(), "land".into(), "water".into()]);
        assert_eq!(check.evaluate(&"land".into()), Ok(true));
        assert_eq!(check.evaluate(&"space".into()), Ok(false));
        assert_eq!(check.evaluate(&Value::Int(1)), Ok(false));
        assert_eq!(check.to_string(), "one of ['air', 'land', 'water']");
    }

    #[test]
    fn test_check_range_bounds_are_inclusive() {
        let check = Check::Range {
            min: Some(0.0),
            max: Some(150.0),
        };
        assert_eq!(check.evaluate(&Value::Int(0)), Ok(true));
        assert_eq!(check.evaluate(&Value::Int(150)), Ok(true));
        assert_eq!(check.evaluate(&Value::Float(150.5)), Ok(false));
        assert_eq!(check.evaluate(&Value::Float(f64::NAN)), Ok(false));
    }

    #[test]
    fn test_check_range_errors_on_text() {
        let check = Check::Range {
            min: Some(0.0),
            max: None,
        };
        let err = check.evaluate(&Value::from("150")).unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_check_kind_and_non_empty() {
        assert_eq!(Check::Kind(ValueKind::Int).evaluate(&Value::Int(1)), Ok(true));
        assert_eq!(Check::Kind(ValueKind::Int).evaluate(&Value::Float(1.0)), Ok(false));
        assert_eq!(Check::NonEmpty.evaluate(&"ARF".into()), Ok(true));
        assert_eq!(Check::NonEmpty.evaluate(&"".into()), Ok(false));
        assert!(Check::NonEmpty.evaluate(&Value::Int(0)).is_err());
    }

    #[test]
    fn test_check_serde_format() {
        let check: Check = serde_json::from_str(r#"{"range": {"min": 0}}"#).unwrap();
        assert_eq!(
            check,
            Check::Range {
                min: Some(0.0),
                max: None
            }
        );
        let check: Check = serde_json::from_str(r#""non_empty""#).unwrap();
        assert_eq!(check, Check::NonEmpty);
        let check: Check = serde_json::from_str(r#"{"kind": "float"}"#).unwrap();
        assert_eq!(check, Check::Kind(ValueKind::Float));
    }

    #[test]
    fn test_check_converts_to_described_precondition() {
        let p = Precondition::from(Check::Range {
            min: Some(0.0),
            max: None,
        });
        assert_eq!(p.description(), Some("0 <= x"));
        assert!(p.accepts(&Value::Float(50.0)));
        assert!(!p.accepts(&Value::Float(-0.5)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn range_agrees_with_comparison(
            x in -1.0e6f64..1.0e6,
            lo in -1.0e6f64..1.0e6,
            span in 0.0f64..1.0e6,
        ) {
            let hi = lo + span;
            let check = Check::Range { min: Some(lo), max: Some(hi) };
            prop_assert_eq!(check.evaluate(&Value::Float(x)), Ok(lo <= x && x <= hi));
        }

        #[test]
        fn integers_widen_for_range(n in any::<i32>()) {
            let check = Check::Range { min: Some(0.0), max: None };
            prop_assert_eq!(check.evaluate(&Value::Int(n.into())), Ok(n >= 0));
        }

        #[test]
        fn one_of_accepts_exactly_listed(options in prop::collection::vec("[a-z]{1,4}", 1..5), probe in "[a-z]{1,4}") {
            let listed: Vec<Value> = options.iter().map(|s| Value::from(s.as_str())).collect();
            let check = Check::OneOf(listed);
            prop_assert_eq!(
                check.evaluate(&Value::from(probe.as_str())),
                Ok(options.contains(&probe))
            );
        }
    }
}
