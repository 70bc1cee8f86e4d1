//! # txtarc File Trees (`common::fs::tree`)
//!
//! File: cli/src/common/fs/tree.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! The tree collector never touches `std::fs` directly. It walks a
//! [`FileTree`], which only needs to answer three questions: what kind of node
//! is at a path, what are a directory's children, and what bytes does a file
//! hold. [`OsTree`] answers them from the real filesystem; tests answer them
//! from an in-memory map, and the walk is the same either way.
//!
//! Paths handed to a tree are *logical*: an `OsTree` rooted at `-C dir`
//! resolves `a/b` to `dir/a/b` on disk but still reports the child as `a/b`,
//! which is the name the file is archived under.
//!
//! ## Ordering
//!
//! `read_dir` returns children sorted by file name, so the order in which files
//! end up in an archive depends only on the tree's contents.
//!
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a node in a tree is. Symlinks are `Other`; they are never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
    Other,
}

impl NodeKind {
    fn of(ft: fs::FileType) -> Self {
        if ft.is_file() {
            Self::File
        } else if ft.is_dir() {
            Self::Dir
        } else {
            Self::Other
        }
    }
}

/// A readable tree of files.
pub trait FileTree {
    /// The kind of node at `path`, without following a final symlink.
    fn kind(&self, path: &Path) -> io::Result<NodeKind>;

    /// The children of directory `path` as (full path, kind), sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<(PathBuf, NodeKind)>>;

    /// The full contents of file `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// The host filesystem, with relative paths resolved against `base`. An
/// empty base means the current working directory.
#[derive(Debug, Default, Clone)]
pub struct OsTree {
    base: PathBuf,
}

impl OsTree {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The on-disk location of logical path `path`. Absolute paths are
    /// returned unchanged.
    fn resolve(&self, path: &Path) -> PathBuf {
        self.base.join(path)
    }
}

impl FileTree for OsTree {
    fn kind(&self, path: &Path) -> io::Result<NodeKind> {
        fs::symlink_metadata(self.resolve(path)).map(|m| NodeKind::of(m.file_type()))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<(PathBuf, NodeKind)>> {
        WalkDir::new(self.resolve(path))
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.map_err(io::Error::from)?;
                let kind = NodeKind::of(entry.file_type());
                Ok((child_path(path, entry.file_name()), kind))
            })
            .collect()
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path))
    }
}

/// Joins a child name onto its parent, leaving `.` off the front so that
/// walking `.` yields `a/b` rather than `./a/b`.
pub fn child_path(parent: &Path, name: &std::ffi::OsStr) -> PathBuf {
    if parent == Path::new(".") {
        PathBuf::from(name)
    } else {
        parent.join(name)
    }
}
