//! # Record Type Descriptors
//!
//! A `RecordType` is the resolved, ordered field schema of one record type,
//! inherited fields included. It is built once through a
//! [`RecordTypeBuilder`] and is read-only afterwards; clones share the same
//! descriptor.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use recs_core::{Field, SchemaDeclarationError};

use crate::accumulate::resolve;

struct Descriptor {
    name: String,
    parent: Option<String>,
    doc: Option<String>,
    fields: IndexMap<String, Field>,
}

/// A finalized record type.
///
/// Cloning is cheap; every clone refers to the same descriptor.
#[derive(Clone)]
pub struct RecordType {
    inner: Arc<Descriptor>,
}

impl RecordType {
    /// Start declaring a root record type.
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            parent: None,
            doc: None,
            own: Vec::new(),
        }
    }

    /// Start declaring a record type that inherits this type's fields.
    pub fn extend(&self, name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            parent: Some(self.clone()),
            doc: None,
            own: Vec::new(),
        }
    }

    /// The type name, used as the rendered header.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The name of the type this one was derived from.
    pub fn parent(&self) -> Option<&str> {
        self.inner.parent.as_deref()
    }

    /// The type's documentation, if declared.
    pub fn doc(&self) -> Option<&str> {
        self.inner.doc.as_deref()
    }

    /// The merged field set, in constructor and render order.
    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.inner.fields
    }

    /// Look up one field.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.inner.fields.get(name)
    }

    /// Field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.inner.fields.keys().map(String::as_str)
    }

    /// Position of a field in the merged order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.inner.fields.get_index_of(name)
    }

    /// Whether the type declares `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.fields.contains_key(name)
    }

    /// Number of fields, inherited ones included.
    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    /// Whether the type has no fields.
    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }
}

impl PartialEq for RecordType {
    /// Same name, same parent and the same fields in the same order.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.name == other.inner.name
                && self.inner.parent == other.inner.parent
                && self.inner.doc == other.inner.doc
                && self.inner.fields.iter().eq(other.inner.fields.iter()))
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.inner.name)
            .field("parent", &self.inner.parent)
            .field("fields", &self.inner.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects a record type's own field declarations.
///
/// Nothing is validated until [`build`](Self::build); a failed build
/// produces no type.
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: String,
    parent: Option<RecordType>,
    doc: Option<String>,
    own: Vec<(String, Field)>,
}

impl RecordTypeBuilder {
    /// Declare a field. Redeclaring an inherited field overrides its
    /// descriptor but keeps its position.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.own.push((name.into(), field));
        self
    }

    /// Attach documentation to the type.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Resolve the merged field set and finalize the type.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaDeclarationError::EmptyTypeName`] for an empty name,
    /// or any error from [`resolve`].
    pub fn build(self) -> Result<RecordType, SchemaDeclarationError> {
        if self.name.trim().is_empty() {
            return Err(SchemaDeclarationError::EmptyTypeName);
        }

        let fields = resolve(&self.name, self.parent.as_ref(), self.own)?;
        let parent = self.parent.map(|p| p.name().to_string());

        tracing::debug!(
            record = %self.name,
            parent = parent.as_deref().unwrap_or("-"),
            fields = fields.len(),
            "declared record type"
        );

        Ok(RecordType {
            inner: Arc::new(Descriptor {
                name: self.name,
                parent,
                doc: self.doc,
                fields,
            }),
        })
    }
}
