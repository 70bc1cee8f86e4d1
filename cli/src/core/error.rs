//! # txtarc Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! This module defines the error types used throughout txtarc. Failures come in
//! three flavours, and the type system keeps them apart:
//!
//! - **Configuration errors** (`Config`, `InvalidRegex`): raised while building
//!   the `Archiver`, before any file is read or written.
//! - **Per-entity errors** (`Walk`, `Read`, `Write`, `InvalidGlob`, `Unmatched`):
//!   one file or one pattern failed. These are pushed into a
//!   [`Report`](crate::core::report::Report) and the operation carries on.
//! - **Structural errors** (`CommentMarker`, plus any `anyhow` error from opening,
//!   reading or writing the archive stream itself): the whole operation aborts.
//!
//! ## Architecture
//!
//! - `ArchiveError`: a `thiserror` enum with one variant per failure kind.
//! - `Result<T>`: an alias for `anyhow::Result<T>`, so context can be added
//!   with `anyhow::Context` at every I/O boundary.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if verbs != 1 {
//!     return Err(ArchiveError::Config("need exactly one of -c, -x or -t".into()).into());
//! }
//!
//! // Check for a specific kind further up
//! if err.downcast_ref::<ArchiveError>().is_some_and(|e| e.is_per_entity()) { /* ... */ }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for txtarc.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Archive comment contains a marker line (\"-- name --\"), which would corrupt the archive")]
    CommentMarker,

    #[error("Invalid glob '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid exclusion regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Error accessing {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("The following paths were not found in the archive:\n{}", format_unmatched(paths))]
    Unmatched { paths: Vec<String> },

    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

impl ArchiveError {
    /// True for failures that concern a single file or pattern and so do not,
    /// on their own, abort an operation.
    pub fn is_per_entity(&self) -> bool {
        matches!(
            self,
            Self::Walk { .. }
                | Self::Read { .. }
                | Self::Write { .. }
                | Self::InvalidGlob { .. }
                | Self::Unmatched { .. }
        )
    }
}

fn format_unmatched(paths: &[String]) -> String {
    paths
        .iter()
        .map(|p| format!("\t{p}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
