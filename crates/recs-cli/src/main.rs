//! # recs CLI Entry Point
//!
//! Parses arguments, loads configuration and the catalog, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use recs_cli::check::{run_check, CheckArgs};
use recs_cli::config::{CliConfig, LogFormat};
use recs_cli::describe::{run_describe, DescribeArgs};
use recs_cli::render::{run_render, RenderArgs};
use recs_cli::types::{run_types, TypesArgs};

/// Record catalog CLI.
///
/// Declares immutable, documented record types in a YAML or JSON catalog
/// and validates and renders data against them.
#[derive(Parser, Debug)]
#[command(name = "recs", version, about)]
struct Cli {
    /// Catalog file. Defaults to `RECS_CATALOG`, then `records.yaml`.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List declared record types.
    Types(TypesArgs),
    /// Show the fields of a record type.
    Describe(DescribeArgs),
    /// Construct a record from a data file and print it.
    Render(RenderArgs),
    /// Validate data files against a record type.
    Check(CheckArgs),
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<u8> {
    let path = recs_cli::resolve_catalog_path(cli.catalog.as_deref(), config);
    let catalog = recs_cli::load_catalog(&path)?;

    match cli.command {
        Commands::Types(args) => run_types(&args, &catalog),
        Commands::Describe(args) => run_describe(&args, &catalog),
        Commands::Render(args) => run_render(&args, &catalog),
        Commands::Check(args) => run_check(&args, &catalog),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::from_env().context("invalid configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };
    init_tracing(config.log_format);
    tracing::debug!(catalog = %config.catalog.display(), log_format = %config.log_format, "configuration loaded");

    match run(cli, &config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
