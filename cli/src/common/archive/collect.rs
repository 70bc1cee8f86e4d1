//! # Tree Collection (`common::archive::collect`)
//!
//! File: cli/src/common/archive/collect.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! [`Collector`] turns a list of root paths into archive entries. Each root is
//! walked depth-first, in name order, over a [`FileTree`]:
//!
//! 1. A node whose path the [`Matcher`] excludes is skipped. For a directory
//!    this prunes the whole subtree, including subtrees that could not be read.
//! 2. A node that cannot be inspected, listed or read is recorded in the
//!    [`Report`] and the walk moves on.
//! 3. Regular files are read and stored under their safened archive name.
//!    Directories are descended into; anything else is ignored.
//! 4. A name that is already present is replaced, and moves to the end: the
//!    last occurrence wins both the content and the position.
//!
//! With `stop_on_error`, the first recorded failure aborts the walk instead.
//!
use crate::common::archive::format::{Archive, Entry};
use crate::common::archive::matcher::Matcher;
use crate::common::archive::paths::PathMode;
use crate::common::fs::tree::{FileTree, NodeKind};
use crate::core::error::{ArchiveError, Result};
use crate::core::report::Report;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Walks roots over a file tree and fills an archive.
pub struct Collector<'a, T: FileTree> {
    pub tree: &'a T,
    pub matcher: &'a Matcher,
    pub path_mode: PathMode,
    pub stop_on_error: bool,
    /// Receives each stored name when set (verbose mode).
    pub progress: Option<&'a mut dyn Write>,
}

impl<'a, T: FileTree> Collector<'a, T> {
    /// Adds every file under each of `roots` to `archive`.
    ///
    /// # Errors
    ///
    /// Per-file failures go to `report`. An `Err` is returned only when
    /// `stop_on_error` is set and a per-file failure occurs, or when writing
    /// progress output fails.
    pub fn collect<S: AsRef<str>>(
        &mut self,
        roots: &[S],
        archive: &mut Archive,
        report: &mut Report,
    ) -> Result<()> {
        for root in roots {
            let root = Path::new(root.as_ref());
            debug!("Collecting from {}", root.display());
            match self.tree.kind(root) {
                Ok(kind) => self.visit(root, kind, archive, report)?,
                Err(source) => {
                    if self.excluded(root, report)? {
                        continue;
                    }
                    self.fail(
                        ArchiveError::Walk {
                            path: root.to_path_buf(),
                            source,
                        },
                        report,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn visit(
        &mut self,
        path: &Path,
        kind: NodeKind,
        archive: &mut Archive,
        report: &mut Report,
    ) -> Result<()> {
        if self.excluded(path, report)? {
            debug!("Excluded {}", path.display());
            return Ok(());
        }
        match kind {
            NodeKind::Dir => match self.tree.read_dir(path) {
                Ok(children) => {
                    for (child, child_kind) in children {
                        self.visit(&child, child_kind, archive, report)?;
                    }
                    Ok(())
                }
                Err(source) => self.fail(
                    ArchiveError::Walk {
                        path: path.to_path_buf(),
                        source,
                    },
                    report,
                ),
            },
            NodeKind::File => self.add_file(path, archive, report),
            NodeKind::Other => {
                debug!("Skipping non-regular file {}", path.display());
                Ok(())
            }
        }
    }

    fn add_file(&mut self, path: &Path, archive: &mut Archive, report: &mut Report) -> Result<()> {
        let data = match self.tree.read_file(path) {
            Ok(data) => data,
            Err(source) => {
                return self.fail(
                    ArchiveError::Read {
                        path: path.to_path_buf(),
                        source,
                    },
                    report,
                )
            }
        };
        let name = self.path_mode.to_archive(path);
        if Path::new(&name) != path {
            warn!("Cleaned {:?} to {:?}", path.display().to_string(), name);
        }
        if let Some(progress) = self.progress.as_mut() {
            writeln!(progress, "{name}")?;
        }
        archive.push(Entry::new(name, data));
        Ok(())
    }

    /// Exclusion check; a malformed glob counts as a per-file failure and the
    /// node is skipped.
    fn excluded(&self, path: &Path, report: &mut Report) -> Result<bool> {
        match self.matcher.is_excluded(&path.to_string_lossy()) {
            Ok(excluded) => Ok(excluded),
            Err(err) => {
                self.fail(err, report)?;
                Ok(true)
            }
        }
    }

    fn fail(&self, err: ArchiveError, report: &mut Report) -> Result<()> {
        if self.stop_on_error {
            return Err(err.into());
        }
        report.record(err);
        Ok(())
    }
}
