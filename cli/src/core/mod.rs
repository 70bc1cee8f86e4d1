//! # txtarc Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! This module aggregates the infrastructure every part of txtarc leans on:
//!
//! - `config`: Loading of the optional settings file.
//! - `error`: The `ArchiveError` enum and the crate-wide `Result` alias.
//! - `report`: The per-run accumulator for non-fatal, per-file failures.
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading settings
//! use crate::core::error::{ArchiveError, Result}; // For error handling
//! use crate::core::report::Report; // For collecting per-file failures
//! ```
//!
pub mod config;
pub mod error;
pub mod report;
