//! # txtarc Archive Engine (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! The building blocks the `Archiver` verbs are assembled from, leaves first:
//!
//! - **`paths`**: `PathMode`, the only converter between archive names and host
//!   paths, and the guard against names that escape the extraction root.
//! - **`matcher`**: Exclusion globs and regexes.
//! - **`collect`**: Depth-first collection of files into an archive, with
//!   pruning, deduplication and per-file error reporting.
//! - **`format`**: The txtar wire format (`encode`/`decode`).
//! - **`compression`**: Gzip framing of the encoded stream.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{format, compression, paths::PathMode};
//!
//! let bytes = format::encode(&archive)?;
//! let archive = format::decode(&compression::decompress_gzip(&gz_bytes)?);
//! let host = PathMode::Safe.to_host(&archive.entries()[0].name);
//! ```
//!

pub mod collect;
pub mod compression;
pub mod format;
pub mod matcher;
pub mod paths;
