//! # txtarc Run Report
//!
//! File: cli/src/core/report.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! A `Report` accumulates the per-entity failures of one create, list or
//! extract run. Each verb returns one, and `main` turns a non-empty report into
//! a non-zero exit status. Nothing here is global: a report is created by the
//! verb, threaded through the traversal by `&mut`, and handed back.
//!
use crate::core::error::ArchiveError;
use tracing::error;

/// Per-entity failures collected during a single operation.
#[derive(Debug, Default)]
pub struct Report {
    failures: Vec<ArchiveError>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `err` and keeps it for the end-of-run summary.
    pub fn record(&mut self, err: ArchiveError) {
        debug_assert!(err.is_per_entity(), "not a per-entity error: {err}");
        error!("{}", err);
        self.failures.push(err);
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[ArchiveError] {
        &self.failures
    }
}
