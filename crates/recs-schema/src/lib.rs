//! # recs-schema: Record Types, Construction & Rendering
//!
//! Turns field declarations from `recs-core` into usable record types and
//! immutable record instances.
//!
//! ## Declaration (`record_type`, `accumulate`)
//!
//! A [`RecordType`] is declared once, either as a root type with
//! [`RecordType::builder`] or derived from a parent with
//! [`RecordType::extend`]. The parent's fields come first, in the parent's
//! order; a redeclared field keeps its inherited position, new fields are
//! appended. The resulting descriptor never changes.
//!
//! ## Construction (`construct`, `record`)
//!
//! [`RecordType::construct`] validates every argument before any value
//! reaches a [`Record`]. A failed construction returns every violation and
//! no instance. A `Record` has no mutating API at all.
//!
//! ## Rendering (`render`)
//!
//! [`render`] produces the documented textual form: the type name, then one
//! labeled `name=value` block per field.
//!
//! ## Catalogs (`catalog`)
//!
//! [`Catalog`] loads record declarations from YAML or JSON files, with
//! preconditions written as declarative checks.
//!
//! ## Crate Policy
//!
//! - Depends only on `recs-core` internally.
//! - Descriptors and records are `Send + Sync` and read-only once built.

pub mod accumulate;
pub mod catalog;
pub mod construct;
pub mod record;
pub mod record_type;
pub mod render;

pub use accumulate::resolve;
pub use catalog::{load_arguments, Catalog, CatalogDecl, CatalogError, FieldDecl, RecordDecl};
pub use record::Record;
pub use record_type::{RecordType, RecordTypeBuilder};
pub use render::render;

pub use recs_core::{
    Check, Field, ImmutabilityViolation, Precondition, PreconditionError, RecsError,
    SchemaDeclarationError, ValidationError, Value, ValueKind, Violation, Violations,
};
