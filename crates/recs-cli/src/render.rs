//! # Render Subcommand
//!
//! Constructs a record from a data file and prints its documented rendering.
//! Validation failures exit with status 1 and list every violation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use recs_schema::{load_arguments, Catalog, Record, RecordType};

/// Arguments for the render subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Record type to construct.
    pub record_type: String,

    /// Data file (YAML or JSON mapping of field name to value).
    pub data: PathBuf,
}

/// Load arguments from `data` and construct a record of type `t`.
///
/// Read and parse failures are errors; a validation failure is returned as
/// the inner `Err` so callers can report it without aborting.
pub fn construct_from_file(
    t: &RecordType,
    data: &Path,
) -> Result<Result<Record, recs_schema::ValidationError>> {
    let args = load_arguments(data)
        .with_context(|| format!("failed to load data file {}", data.display()))?;
    Ok(t.construct(args))
}

/// Execute the render subcommand.
pub fn run_render(args: &RenderArgs, catalog: &Catalog) -> Result<u8> {
    let t = crate::find_type(catalog, &args.record_type)?;
    match construct_from_file(t, &args.data)? {
        Ok(record) => {
            println!("{record}");
            Ok(0)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(1)
        }
    }
}
