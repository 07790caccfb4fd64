//! # Documented Rendering
//!
//! Renders a record as its type name followed by one block per field, each
//! block a label comment over a `name=value` line:
//!
//! ```text
//! Person(
//!   # The name
//!   name='JAMES'
//!
//!   # The person's age
//!   age=34
//! )
//! ```
//!
//! Text values are single-quoted. Blocks are separated by one blank line,
//! with none after the last block. A type without fields renders as the
//! header line followed directly by the closing parenthesis.

use std::fmt::{self, Write};

use crate::record::Record;

/// Render a record into its documented textual form.
pub fn render(record: &Record) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_record(&mut out, record);
    out
}

pub(crate) fn write_record<W: Write>(out: &mut W, record: &Record) -> fmt::Result {
    writeln!(out, "{}(", record.type_name())?;
    for (i, (name, field, value)) in record.entries().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "  # {}", field.label())?;
        writeln!(out, "  {name}={}", value.to_literal())?;
    }
    out.write_char(')')
}
