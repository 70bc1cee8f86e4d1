//! # txtarc Create (`-c`)
//!
//! File: cli/src/commands/create.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! Builds an archive from the requested paths and writes it to the archive
//! file or standard output.
//!
//! Creation flow:
//! 1. Refuse a comment that contains a marker line, before walking anything.
//! 2. Walk every requested path with a [`Collector`]; per-file failures are
//!    recorded in the returned [`Report`].
//! 3. Encode the archive and write it, through gzip when enabled.
//! 4. Commit the sink. A file sink only replaces the target at this point.
//!
use super::Archiver;
use crate::common::archive::collect::Collector;
use crate::common::archive::compression;
use crate::common::archive::format::{self, Archive};
use crate::common::fs::io::ArchiveSink;
use crate::common::fs::tree::OsTree;
use crate::core::error::{ArchiveError, Result};
use crate::core::report::Report;
use anyhow::Context;
use std::io::Write;
use tracing::info;

impl Archiver {
    /// Creates an archive from `self.paths`.
    ///
    /// When verbose, each stored name is written to `progress` as it is added.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the comment contains a marker line, if the archive
    /// cannot be written, or (with `stop_on_error`) on the first unreadable
    /// file.
    pub fn create(self, progress: &mut dyn Write) -> Result<Report> {
        if format::has_marker_line(self.comment.as_bytes()) {
            return Err(ArchiveError::CommentMarker.into());
        }

        let tree = OsTree::new(&self.directory);
        let mut archive = Archive::new(self.comment.as_bytes());
        let mut report = Report::new();
        Collector {
            tree: &tree,
            matcher: &self.matcher,
            path_mode: self.path_mode,
            stop_on_error: self.stop_on_error,
            progress: if self.verbose { Some(progress) } else { None },
        }
        .collect(&self.paths, &mut archive, &mut report)?;

        let encoded = format::encode(&archive)?;
        let mut sink = match &self.archive_file {
            Some(path) => ArchiveSink::create(path)?,
            None => ArchiveSink::stdout(),
        };
        self.write_encoded(&mut sink, &encoded)
            .context("Failed to write archive")?;
        sink.commit()?;

        info!(
            "Archived {} files ({} bytes before compression)",
            archive.entries().len(),
            encoded.len()
        );
        Ok(report)
    }

    fn write_encoded<W: Write>(&self, mut sink: W, encoded: &[u8]) -> std::io::Result<()> {
        if self.gzip {
            let mut gz = compression::gzip_writer(sink);
            gz.write_all(encoded)?;
            gz.finish()?;
        } else {
            sink.write_all(encoded)?;
        }
        Ok(())
    }
}
