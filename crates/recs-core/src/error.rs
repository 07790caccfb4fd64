//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout recs. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Declaration errors name the record type and the offending field.
//! - Validation errors carry every violation found in a construction
//!   attempt, not just the first one.
//! - A predicate that errors is reported as a failed precondition with
//!   the predicate's reason attached.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// Top-level error type for recs.
#[derive(Error, Debug)]
pub enum RecsError {
    /// A record type declaration was rejected.
    #[error("schema declaration error: {0}")]
    SchemaDeclaration(#[from] SchemaDeclarationError),

    /// A construction attempt was rejected.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A field write on a frozen record was rejected.
    #[error("{0}")]
    Immutability(#[from] ImmutabilityViolation),

    /// A value could not be converted into a field value.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
}

/// Error raised while declaring a record type. No type descriptor is
/// produced when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaDeclarationError {
    /// The same field name appears twice in one type's own declarations.
    #[error("record type '{record}' declares field '{field}' more than once")]
    DuplicateField {
        /// The record type being declared.
        record: String,
        /// The repeated field name.
        field: String,
    },

    /// A field was declared with an empty name.
    #[error("record type '{record}' declares a field with an empty name")]
    EmptyFieldName {
        /// The record type being declared.
        record: String,
    },

    /// A field was declared with an empty label.
    #[error("field '{field}' of record type '{record}' has an empty label")]
    EmptyLabel {
        /// The record type being declared.
        record: String,
        /// The field with the empty label.
        field: String,
    },

    /// A record type was declared with an empty name.
    #[error("record type name must not be empty")]
    EmptyTypeName,

    /// A declaration extends a type that has not been declared before it.
    #[error("record type '{record}' extends unknown type '{parent}'")]
    UnknownParent {
        /// The record type being declared.
        record: String,
        /// The missing parent type.
        parent: String,
    },

    /// Two declarations in one catalog share a type name.
    #[error("record type '{record}' is declared more than once")]
    DuplicateType {
        /// The repeated type name.
        record: String,
    },
}

/// The "raised" error of a fallible precondition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PreconditionError(pub String);

impl PreconditionError {
    /// Create a precondition error from any message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A single reason a construction attempt was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A declared field was not supplied.
    Missing {
        /// The missing field.
        field: String,
    },
    /// A supplied argument names no declared field.
    Unknown {
        /// The unknown argument name.
        field: String,
    },
    /// The same argument name was supplied more than once.
    DuplicateArgument {
        /// The repeated argument name.
        field: String,
    },
    /// The number of positional arguments did not match the field count.
    Arity {
        /// Number of declared fields.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// A supplied value did not satisfy its field's precondition.
    PreconditionFailed {
        /// The field whose precondition failed.
        field: String,
        /// The rejected value.
        value: Value,
        /// Set when the predicate errored instead of returning false.
        reason: Option<String>,
    },
}

impl Violation {
    /// The field this violation is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Missing { field }
            | Self::Unknown { field }
            | Self::DuplicateArgument { field }
            | Self::PreconditionFailed { field, .. } => Some(field),
            Self::Arity { .. } => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "  {field}: required field is missing"),
            Self::Unknown { field } => write!(f, "  {field}: unknown field"),
            Self::DuplicateArgument { field } => {
                write!(f, "  {field}: argument supplied more than once")
            }
            Self::Arity { expected, actual } => write!(
                f,
                "  (arguments): expected {expected} positional values, got {actual}"
            ),
            Self::PreconditionFailed {
                field,
                value,
                reason: None,
            } => write!(
                f,
                "  {field}: value {} fails precondition",
                value.to_literal()
            ),
            Self::PreconditionFailed {
                field,
                value,
                reason: Some(reason),
            } => write!(
                f,
                "  {field}: value {} fails precondition: {reason}",
                value.to_literal()
            ),
        }
    }
}

/// Collection of violations found in one construction attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Construction of a record was rejected. No instance exists.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("validation failed for record type '{record}':\n{violations}")]
pub struct ValidationError {
    /// The record type whose constructor rejected the arguments.
    pub record: String,
    /// Every violation found, in check order.
    pub violations: Violations,
}

impl ValidationError {
    /// Returns true if any violation matches the predicate.
    pub fn has(&self, pred: impl Fn(&Violation) -> bool) -> bool {
        self.violations.violations().iter().any(pred)
    }
}

/// A write was attempted on a frozen record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot assign field '{field}' of record type '{record}': records are immutable")]
pub struct ImmutabilityViolation {
    /// The record type of the instance.
    pub record: String,
    /// The field the caller tried to write.
    pub field: String,
}
