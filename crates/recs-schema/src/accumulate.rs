//! # Schema Accumulation
//!
//! Merges a parent type's resolved fields with a new type's own field
//! declarations.
//!
//! ## Ordering rule
//!
//! ```text
//! parent:  name, habitat, weight
//! own:     weight', bark
//! result:  name, habitat, weight', bark
//! ```
//!
//! Inherited fields keep the parent's order. An own field whose name is
//! already inherited replaces that descriptor in place; any other own field
//! is appended in declaration order. Constructor argument order and render
//! order both follow the result.

use std::collections::HashSet;

use indexmap::IndexMap;
use recs_core::{Field, SchemaDeclarationError};

use crate::record_type::RecordType;

/// Resolve the merged field set for record type `record`.
///
/// # Errors
///
/// - [`SchemaDeclarationError::DuplicateField`] if a name appears twice in `own`.
/// - [`SchemaDeclarationError::EmptyFieldName`] if an own field has an empty name.
/// - [`SchemaDeclarationError::EmptyLabel`] if an own field has an empty label.
pub fn resolve(
    record: &str,
    parent: Option<&RecordType>,
    own: Vec<(String, Field)>,
) -> Result<IndexMap<String, Field>, SchemaDeclarationError> {
    let mut seen = HashSet::with_capacity(own.len());
    for (name, field) in &own {
        if name.is_empty() {
            return Err(SchemaDeclarationError::EmptyFieldName {
                record: record.to_string(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(SchemaDeclarationError::DuplicateField {
                record: record.to_string(),
                field: name.clone(),
            });
        }
        if field.label().trim().is_empty() {
            return Err(SchemaDeclarationError::EmptyLabel {
                record: record.to_string(),
                field: name.clone(),
            });
        }
    }

    let mut fields = parent.map(|p| p.fields().clone()).unwrap_or_default();
    for (name, field) in own {
        // IndexMap::insert keeps the existing slot for a known key.
        fields.insert(name, field);
    }
    Ok(fields)
}
