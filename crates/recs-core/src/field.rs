//! # Field Descriptors
//!
//! A `Field` documents one attribute of a record type: a label shown in the
//! rendered form, and an optional precondition that every supplied value
//! must satisfy. Fields are plain data. They are declared once, as part of
//! a record type, and are never tied to any instance.

use crate::precondition::{Check, Precondition};

/// Label and optional precondition of one record field.
///
/// The label must be non-empty; record type declaration rejects fields
/// whose label is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    label: String,
    precondition: Option<Precondition>,
}

impl Field {
    /// A field with the given label and no precondition.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            precondition: None,
        }
    }

    /// Attach a precondition, replacing any previous one.
    pub fn with_precondition(mut self, precondition: Precondition) -> Self {
        self.precondition = Some(precondition);
        self
    }

    /// Attach a total predicate as the precondition.
    pub fn with_predicate<F>(self, predicate: F) -> Self
    where
        F: Fn(&crate::Value) -> bool + Send + Sync + 'static,
    {
        self.with_precondition(Precondition::new(predicate))
    }

    /// Attach a declarative check as the precondition.
    pub fn with_check(self, check: Check) -> Self {
        self.with_precondition(check.into())
    }

    /// The field's documentation label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The field's precondition, if any.
    pub fn precondition(&self) -> Option<&Precondition> {
        self.precondition.as_ref()
    }
}
