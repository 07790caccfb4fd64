//! # Check Subcommand
//!
//! Validates one or more data files against a record type and reports
//! pass/fail per file. Exits with status 1 if any file fails.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use recs_schema::{Catalog, RecordType};

use crate::render::construct_from_file;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Record type to check against.
    pub record_type: String,

    /// Data files (YAML or JSON).
    #[arg(required = true)]
    pub data: Vec<PathBuf>,
}

/// Outcome of checking a single file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// `None` when the file passed; otherwise the failure text.
    pub failure: Option<String>,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Check every file, continuing past failures.
pub fn check_files(t: &RecordType, files: &[PathBuf]) -> Vec<FileReport> {
    files
        .iter()
        .map(|path| {
            let failure = match construct_from_file(t, path) {
                Ok(Ok(_)) => None,
                Ok(Err(e)) => Some(e.violations.to_string()),
                Err(e) => Some(format!("  {e:#}")),
            };
            FileReport {
                path: path.clone(),
                failure,
            }
        })
        .collect()
}

/// Render reports as `PASS`/`FAIL` lines with a closing summary.
pub fn format_reports(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        match &report.failure {
            None => out.push_str(&format!("PASS {}\n", report.path.display())),
            Some(failure) => {
                out.push_str(&format!("FAIL {}\n", report.path.display()));
                out.push_str(failure);
                out.push('\n');
            }
        }
    }
    let failed = reports.iter().filter(|r| !r.passed()).count();
    out.push_str(&format!(
        "{} passed, {failed} failed\n",
        reports.len() - failed
    ));
    out
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, catalog: &Catalog) -> Result<u8> {
    let t = crate::find_type(catalog, &args.record_type)?;
    let reports = check_files(t, &args.data);
    print!("{}", format_reports(&reports));
    Ok(if reports.iter().all(FileReport::passed) { 0 } else { 1 })
}
