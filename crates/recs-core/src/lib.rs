//! # recs-core: Foundational Types for Immutable Records
//!
//! This crate is the leaf of the recs workspace. It defines the pieces a
//! record type is declared from, without any knowledge of how those pieces
//! are merged into a schema or turned into instances (that lives in
//! `recs-schema`).
//!
//! ## Key Design Principles
//!
//! 1. **Dynamically typed scalars.** Field values are a closed [`Value`] enum.
//!    The record machinery never checks nominal types; a field that wants
//!    "must be an integer" says so through its precondition.
//!
//! 2. **Preconditions are values.** A [`Precondition`] is a shareable predicate
//!    stored inside a [`Field`]. Predicates are pure by contract. A predicate
//!    that errors counts as a failed predicate, never as a separate failure class.
//!
//! 3. **One error per failure kind.** Declaration, validation and immutability
//!    failures each have their own type, unified under [`RecsError`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `recs-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod precondition;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{
    ImmutabilityViolation, PreconditionError, RecsError, SchemaDeclarationError, ValidationError,
    Violation, Violations,
};
pub use field::Field;
pub use precondition::{Check, Precondition};
pub use value::{Value, ValueKind};
