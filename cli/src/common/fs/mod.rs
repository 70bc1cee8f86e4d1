//! # txtarc Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! This module groups txtarc's filesystem access:
//!
//! - **`io`**: Directory creation, extracted-file writes, the `-I` path list,
//!   and the archive source (`ArchiveSource`) and sink (`ArchiveSink`).
//! - **`tree`**: The `FileTree` abstraction walked by the collector, and
//!   `OsTree`, its implementation over the host filesystem.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{io, tree::OsTree};
//!
//! io::write_bytes_to_file(Path::new("out/a.txt"), b"hi\n")?;
//! let children = OsTree.read_dir(Path::new("src"))?;
//! ```
//!

/// Basic file I/O plus the archive source and sink.
pub mod io;
/// Readable file trees for the collector.
pub mod tree;
