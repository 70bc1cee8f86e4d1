//! # txtarc Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! This module centralizes the filesystem input/output txtarc performs outside
//! of tree walking:
//!
//! - **`ensure_dir_exists`**: `mkdir -p` that refuses to treat a file as a directory.
//! - **`write_bytes_to_file`**: Writes an extracted file, creating its parent directories.
//! - **`read_path_list`**: Reads a newline-separated list of paths (`-I`).
//! - **`ArchiveSource`**: The whole archive in memory, either mapped from a file
//!   or slurped from stdin.
//! - **`ArchiveSink`**: Where a created archive goes. A file sink writes to a
//!   temporary file beside the target and renames it into place on `commit`,
//!   so a failed run never leaves a truncated archive behind.
//!
//! All functions attach context to their errors with `anyhow::Context`.
//!
use crate::core::error::{ArchiveError, Result};
use anyhow::Context;
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, it is created along with any missing parents.
/// If the path exists but is not a directory, an `ArchiveError::FileSystem`
/// error is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        debug!("Created directory: {}", path.display());
    } else if !path.is_dir() {
        anyhow::bail!(ArchiveError::FileSystem(format!(
            "Path exists but is not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Writes `content` to `path`, creating parent directories as needed and
/// replacing any existing file.
///
/// # Errors
///
/// Returns an `Err` if a parent directory cannot be created or the write fails.
pub fn write_bytes_to_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {}", path.display()))
}

/// Reads a newline-separated list of paths. Lines are trimmed; blank lines are
/// skipped. Order and duplicates are preserved.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be opened or read.
pub fn read_path_list(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open path list {}", path.display()))?;
    let mut paths = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("Failed to read path list {}", path.display()))?;
        let line = line.trim();
        if !line.is_empty() {
            paths.push(line.to_string());
        }
    }
    Ok(paths)
}

/// An archive's raw bytes, held for the duration of a list or extract.
pub enum ArchiveSource {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl ArchiveSource {
    /// Maps `path` into memory when it is a regular, non-empty file. Anything
    /// else (FIFOs, `/proc` files, process substitution) reports a size that
    /// says nothing about its contents, so it is read instead.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open archive {}", path.display()))?;
        let meta = file
            .metadata()
            .with_context(|| format!("Failed to stat archive {}", path.display()))?;
        if !meta.is_file() || meta.len() == 0 {
            debug!("Reading {} without mapping", path.display());
            return Self::slurp(file)
                .with_context(|| format!("Failed to read archive {}", path.display()));
        }
        // SAFETY: the map is read-only and lives only for this run; an archive
        // being rewritten underneath us is not a supported use.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map archive {}", path.display()))?;
        debug!("Mapped {} bytes from {}", meta.len(), path.display());
        Ok(Self::Mapped(map))
    }

    /// Reads all of `reader` (stdin, or a file that cannot be mapped).
    pub fn slurp<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .context("Failed to read archive data")?;
        Ok(Self::Owned(buf))
    }
}

impl Deref for ArchiveSource {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(map) => &map[..],
            Self::Owned(buf) => &buf[..],
        }
    }
}

/// Destination of a created archive.
pub enum ArchiveSink {
    Stdout(io::Stdout),
    File { temp: NamedTempFile, target: PathBuf },
}

impl ArchiveSink {
    /// Starts a file sink for `target`. The target itself is untouched until
    /// [`commit`](Self::commit).
    pub fn create(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(".txtarc-")
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create archive file {}", target.display()))?;
        Ok(Self::File {
            temp,
            target: target.to_path_buf(),
        })
    }

    pub fn stdout() -> Self {
        Self::Stdout(io::stdout())
    }

    /// Flushes the sink and, for a file sink, moves it over the target.
    pub fn commit(self) -> Result<()> {
        match self {
            Self::Stdout(mut out) => out.flush().context("Failed to flush standard output"),
            Self::File { mut temp, target } => {
                temp.flush()
                    .with_context(|| format!("Failed to write archive {}", target.display()))?;
                temp.persist(&target).map_err(|e| e.error).with_context(|| {
                    format!("Failed to move archive into place at {}", target.display())
                })?;
                info!("Wrote archive {}", target.display());
                Ok(())
            }
        }
    }
}

impl Write for ArchiveSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::File { temp, .. } => temp.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::File { temp, .. } => temp.flush(),
        }
    }
}
