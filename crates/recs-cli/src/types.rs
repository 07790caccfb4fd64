//! # Types Subcommand
//!
//! Lists every declared record type with its parent and merged field order.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use recs_schema::{Catalog, RecordType};

/// Arguments for the types subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Emit the listing as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Serializable summary of one record type.
#[derive(Debug, Serialize, PartialEq)]
pub struct TypeSummary<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<&'a str>,
    pub fields: Vec<&'a str>,
}

impl<'a> From<&'a RecordType> for TypeSummary<'a> {
    fn from(t: &'a RecordType) -> Self {
        Self {
            name: t.name(),
            extends: t.parent(),
            fields: t.field_names().collect(),
        }
    }
}

/// Text listing, one line per type.
pub fn format_types(catalog: &Catalog) -> String {
    let mut out = String::new();
    for t in catalog.iter() {
        out.push_str(t.name());
        if let Some(parent) = t.parent() {
            out.push_str(" extends ");
            out.push_str(parent);
        }
        out.push_str(": ");
        out.push_str(&t.field_names().collect::<Vec<_>>().join(", "));
        out.push('\n');
    }
    out
}

/// JSON listing, an array of [`TypeSummary`] objects.
pub fn format_types_json(catalog: &Catalog) -> Result<String> {
    let summaries: Vec<TypeSummary<'_>> = catalog.iter().map(TypeSummary::from).collect();
    Ok(serde_json::to_string_pretty(&summaries)?)
}

/// Execute the types subcommand.
pub fn run_types(args: &TypesArgs, catalog: &Catalog) -> Result<u8> {
    if args.json {
        println!("{}", format_types_json(catalog)?);
    } else {
        print!("{}", format_types(catalog));
    }
    Ok(0)
}
