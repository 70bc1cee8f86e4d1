//! # txtarc Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! This file serves as the main entry point for the txtarc CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Running the archiver and turning its outcome into an exit status
//!
//! ## Architecture
//!
//! txtarc has a flat, `tar`-like command line: one of `-c`, `-x` or `-t`
//! selects the operation and every other flag modifies it. All archive logic
//! lives in `commands` (the verbs) and `common::archive` (the format and its
//! rules); this file only wires them to the process.
//!
//! Exit status:
//! - `0`: the operation completed and every file was handled.
//! - `1`: a configuration error, an aborted operation, or one or more
//!   per-file failures (each already logged).
//!
//! ## Examples
//!
//! ```bash
//! # Bundle a directory into a txtar, then read it back
//! txtarc -cf testdata.txtar testdata/
//! txtarc -tvf testdata.txtar
//!
//! # Round-trip through a pipe with gzip
//! txtarc -cz src | txtarc -xz -C /tmp/copy
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Build the archiver and run the requested verb
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // The create, list and extract verbs
mod common; // Archive format, path rules, filesystem access
mod core; // Errors, settings, failure reporting

/// Defines the command-line arguments using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "txtarc",
    about = "Create, list and extract txtar archives",
    long_about = "A tar-like tool for txtar archives: a plain-text format holding a comment\n\
                  and any number of named files, readable and diffable as-is.",
    version
)]
struct Cli {
    #[command(flatten)]
    archive: commands::ArchiverArgs,
    /// Verbose output; repeat for more log detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    // A single -v is for listing output; log detail starts at -vv.
    let log_level = match cli.verbose {
        0 | 1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    match commands::handle_archive(cli.archive, cli.verbose > 0) {
        Ok(report) if report.is_clean() => {}
        Ok(report) => {
            eprintln!(
                "txtarc: {} error(s) occurred; exiting with failure status",
                report.failures().len()
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
