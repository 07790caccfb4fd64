//! # recs-cli: Record Catalog Command-Line Interface
//!
//! Loads a declaration catalog (YAML or JSON) and exposes it on the
//! command line.
//!
//! ## Subcommands
//!
//! - `types`: List declared types with their parent and field order
//! - `describe`: Show each field's label and precondition
//! - `render`: Construct a record from a data file and print it
//! - `check`: Validate data files against a type
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers delegate to `recs-schema`; output is built as strings so it
//!   can be asserted on in tests, then printed by the `run_*` entry points.

pub mod check;
pub mod config;
pub mod describe;
pub mod render;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use recs_schema::{Catalog, RecordType};

/// Pick the catalog path: an explicit flag wins over the configured default.
pub fn resolve_catalog_path(flag: Option<&Path>, config: &config::CliConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| config.catalog.clone())
}

/// Load a catalog, attaching the path to any error.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("failed to load catalog {}", path.display()))
}

/// Look up a type by name, listing the declared names when it is absent.
pub fn find_type<'c>(catalog: &'c Catalog, name: &str) -> Result<&'c RecordType> {
    catalog.get(name).with_context(|| {
        let known = catalog.names().collect::<Vec<_>>().join(", ");
        format!("unknown record type '{name}' (declared: {known})")
    })
}
