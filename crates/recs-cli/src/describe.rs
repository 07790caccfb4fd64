//! # Describe Subcommand
//!
//! Prints a record type's documentation and, per field, its label and
//! precondition.

use anyhow::Result;
use clap::Args;

use recs_schema::{Catalog, RecordType};

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Record type to describe.
    pub record_type: String,
}

/// Describe one record type.
pub fn format_description(t: &RecordType) -> String {
    let mut out = String::new();
    out.push_str(t.name());
    if let Some(parent) = t.parent() {
        out.push_str(" (extends ");
        out.push_str(parent);
        out.push(')');
    }
    out.push('\n');
    if let Some(doc) = t.doc() {
        out.push_str("  ");
        out.push_str(doc);
        out.push('\n');
    }
    for (name, field) in t.fields() {
        out.push('\n');
        out.push_str(&format!("  {name}: {}\n", field.label()));
        match field.precondition() {
            Some(p) => out.push_str(&format!(
                "    requires: {}\n",
                p.description().unwrap_or("custom predicate")
            )),
            None => out.push_str("    requires: nothing\n"),
        }
    }
    out
}

/// Execute the describe subcommand.
pub fn run_describe(args: &DescribeArgs, catalog: &Catalog) -> Result<u8> {
    let t = crate::find_type(catalog, &args.record_type)?;
    print!("{}", format_description(t));
    Ok(0)
}
