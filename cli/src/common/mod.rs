//! # txtarc Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! Shared building blocks used by the `Archiver` verbs in `commands`:
//!
//! - **`archive`**: Path safening, exclusion matching, tree collection, the
//!   txtar format and gzip framing.
//! - **`fs`**: Filesystem I/O and the walkable `FileTree` abstraction.
//!
//! Command code (`commands::`) composes these; infrastructure such as errors
//! and settings lives in `core::`.
//!

/// Archive format, path safety, matching and collection.
pub mod archive;
/// Filesystem I/O and file trees.
pub mod fs;
