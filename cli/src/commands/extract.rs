//! # txtarc List and Extract (`-t`, `-x`)
//!
//! File: cli/src/commands/extract.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! Listing and extracting share one pass over a decoded archive. For every
//! entry, in archive order:
//!
//! 1. The stored name is converted to a host path (safened unless `-P`).
//! 2. Every requested glob that matches the host path is marked as used.
//! 3. The entry is skipped if an exclusion pattern matches it, or if globs were
//!    requested and none of them matched.
//! 4. List prints the host path (`size<TAB>path` when verbose). Extract writes
//!    the body beneath the target directory, creating parents as needed.
//!
//! Requested globs that matched no entry are reported together at the end.
//! Because marking happens before exclusion, a glob whose only matches were
//! excluded is still considered found.
//!
use super::Archiver;
use crate::common::archive::compression;
use crate::common::archive::format::{self, Archive};
use crate::common::archive::matcher::Glob;
use crate::common::fs::io::{self, ArchiveSource};
use crate::core::error::{ArchiveError, Result};
use crate::core::report::Report;
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Printed in place of an empty comment in verbose mode.
const NO_COMMENT: &str = "-No Comment-";

/// Whether a requested glob has selected anything yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seen {
    No,
    Yes,
    /// Malformed; already reported once.
    Broken,
}

impl Archiver {
    /// Prints the names of the selected entries to `out`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the archive cannot be read or decompressed, if
    /// writing to `out` fails, or (with `stop_on_error`) on the first
    /// per-entry failure.
    pub fn list(self, out: &mut dyn Write) -> Result<Report> {
        let archive = self.read_archive()?;
        self.walk_entries(&archive, out, false)
    }

    /// Writes the selected entries beneath `self.directory`. Names are printed
    /// to `out` only when verbose.
    ///
    /// # Errors
    ///
    /// As for [`list`](Self::list). A file that cannot be written is a
    /// per-entry failure.
    pub fn extract(self, out: &mut dyn Write) -> Result<Report> {
        let archive = self.read_archive()?;
        self.walk_entries(&archive, out, true)
    }

    fn read_archive(&self) -> Result<Archive> {
        let source = match &self.archive_file {
            Some(path) => ArchiveSource::open(path)?,
            None => ArchiveSource::slurp(std::io::stdin().lock())?,
        };
        let plain: Cow<[u8]> = if self.gzip {
            Cow::Owned(compression::decompress_gzip(&source)?)
        } else {
            Cow::Borrowed(&source[..])
        };
        let archive = format::decode(&plain);
        debug!("Decoded {} entries", archive.entries().len());
        Ok(archive)
    }

    fn walk_entries(&self, archive: &Archive, out: &mut dyn Write, extract: bool) -> Result<Report> {
        let mut report = Report::new();
        if self.verbose {
            if archive.comment.is_empty() {
                writeln!(out, "{NO_COMMENT}\n")?;
            } else {
                out.write_all(&archive.comment)?;
                writeln!(out)?;
            }
        }

        let requested: Vec<Glob> = self.paths.iter().map(|p| Glob::new(p)).collect();
        let mut seen = vec![Seen::No; requested.len()];
        let mut written = 0usize;

        for entry in archive.entries() {
            let host = self.path_mode.to_host(&entry.name);
            if host != Path::new(&entry.name) {
                warn!("Cleaned {:?} to {:?}", entry.name, host.display().to_string());
            }
            let host_name = host.to_string_lossy();

            if !requested.is_empty() {
                let mut selected = false;
                for (glob, state) in requested.iter().zip(seen.iter_mut()) {
                    if *state == Seen::Broken {
                        continue;
                    }
                    match glob.matches(&host_name) {
                        Ok(true) => {
                            *state = Seen::Yes;
                            selected = true;
                        }
                        Ok(false) => {}
                        Err(err) => {
                            *state = Seen::Broken;
                            self.fail(err, &mut report)?;
                        }
                    }
                }
                if !selected {
                    continue;
                }
            }

            match self.matcher.is_excluded(&host_name) {
                Ok(false) => {}
                Ok(true) => {
                    debug!("Excluded {}", host_name);
                    continue;
                }
                Err(err) => {
                    self.fail(err, &mut report)?;
                    continue;
                }
            }

            if extract {
                let target = self.directory.join(&host);
                if let Err(source) = io::write_bytes_to_file(&target, &entry.data) {
                    self.fail(
                        ArchiveError::Write {
                            path: host.clone(),
                            source,
                        },
                        &mut report,
                    )?;
                    continue;
                }
                written += 1;
                if self.verbose {
                    writeln!(out, "{host_name}")?;
                }
            } else if self.verbose {
                writeln!(out, "{}\t{host_name}", entry.data.len())?;
            } else {
                writeln!(out, "{host_name}")?;
            }
        }

        let unmatched: Vec<String> = requested
            .iter()
            .zip(&seen)
            .filter(|(_, state)| **state == Seen::No)
            .map(|(glob, _)| glob.as_str().to_string())
            .collect();
        if !unmatched.is_empty() {
            self.fail(ArchiveError::Unmatched { paths: unmatched }, &mut report)?;
        }
        if extract {
            info!("Extracted {} files", written);
        }
        out.flush()?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::archive::compression::gzip_writer;
    use crate::common::archive::format::Entry;
    use crate::common::archive::matcher::Matcher;
    use crate::common::archive::paths::PathMode;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Writes `archive` into a fresh temp dir and returns (dir, archiver)
    /// pointing at it, with extraction going to `dir/out`.
    fn stored(archive: &Archive, gzip: bool) -> Result<(TempDir, Archiver)> {
        let dir = tempdir()?;
        let path = dir.path().join("a.txtar");
        let encoded = format::encode(archive)?;
        if gzip {
            let mut gz = gzip_writer(fs::File::create(&path)?);
            gz.write_all(&encoded)?;
            gz.finish()?;
        } else {
            fs::write(&path, encoded)?;
        }
        let out = dir.path().join("out");
        fs::create_dir(&out)?;
        let archiver = Archiver {
            archive_file: Some(path),
            gzip,
            directory: out,
            ..Default::default()
        };
        Ok((dir, archiver))
    }

    fn sample() -> Archive {
        let mut a = Archive::new("sample comment\n");
        a.push(Entry::new("top.txt", "top\n"));
        a.push(Entry::new("docs/readme.md", "# docs\n"));
        a.push(Entry::new("docs/debug.log", "log\n"));
        a
    }

    fn list(archiver: Archiver) -> Result<(String, Report)> {
        let mut out = Vec::new();
        let report = archiver.list(&mut out)?;
        Ok((String::from_utf8(out)?, report))
    }

    #[test]
    fn test_list_names_in_archive_order() -> Result<()> {
        let (_dir, a) = stored(&sample(), false)?;
        let (out, report) = list(a)?;
        assert!(report.is_clean());
        assert_eq!(out, "top.txt\ndocs/readme.md\ndocs/debug.log\n");
        Ok(())
    }

    #[test]
    fn test_list_verbose_shows_comment_and_sizes() -> Result<()> {
        let (_dir, a) = stored(&sample(), false)?;
        let (out, _) = list(Archiver { verbose: true, ..a })?;
        assert_eq!(
            out,
            "sample comment\n\n4\ttop.txt\n7\tdocs/readme.md\n4\tdocs/debug.log\n"
        );

        let mut bare = Archive::new("");
        bare.push(Entry::new("x", "x\n"));
        let (_dir, a) = stored(&bare, false)?;
        let (out, _) = list(Archiver { verbose: true, ..a })?;
        assert_eq!(out, "-No Comment-\n\n2\tx\n");
        Ok(())
    }

    #[test]
    fn test_extract_round_trip_with_and_without_gzip() -> Result<()> {
        for gzip in [false, true] {
            let (dir, a) = stored(&sample(), gzip)?;
            let mut out = Vec::new();
            let report = a.extract(&mut out)?;
            assert!(report.is_clean());
            assert!(out.is_empty(), "extract is quiet unless verbose");

            let root = dir.path().join("out");
            assert_eq!(fs::read_to_string(root.join("top.txt"))?, "top\n");
            assert_eq!(fs::read_to_string(root.join("docs/readme.md"))?, "# docs\n");
            assert_eq!(fs::read_to_string(root.join("docs/debug.log"))?, "log\n");
        }
        Ok(())
    }

    #[test]
    fn test_extract_cannot_escape_target() -> Result<()> {
        let mut evil = Archive::new("");
        evil.push(Entry::new("../../etc/passwd", "root::0:0\n"));
        evil.push(Entry::new("/abs/path", "abs\n"));
        let (dir, a) = stored(&evil, false)?;
        let mut out = Vec::new();
        let report = Archiver { verbose: true, ..a }.extract(&mut out)?;
        assert!(report.is_clean());

        let root = dir.path().join("out");
        assert_eq!(fs::read_to_string(root.join("etc/passwd"))?, "root::0:0\n");
        assert_eq!(fs::read_to_string(root.join("abs/path"))?, "abs\n");
        assert!(!dir.path().join("etc").exists());
        assert_eq!(String::from_utf8(out)?, "-No Comment-\n\netc/passwd\nabs/path\n");
        Ok(())
    }

    #[test]
    fn test_unsafe_mode_keeps_names() -> Result<()> {
        let mut a = Archive::new("");
        a.push(Entry::new("../up.txt", "u\n"));
        let (_dir, archiver) = stored(&a, false)?;
        let (out, _) = list(Archiver {
            path_mode: PathMode::Unsafe,
            ..archiver
        })?;
        assert_eq!(out, "../up.txt\n");
        Ok(())
    }

    #[test]
    fn test_requested_globs_select_and_report_unmatched() -> Result<()> {
        let (dir, a) = stored(&sample(), false)?;
        let a = Archiver {
            paths: vec!["docs/*.md".into(), "nothing/*".into(), "top.txt".into()],
            ..a
        };
        let mut out = Vec::new();
        let report = a.extract(&mut out)?;

        let root = dir.path().join("out");
        assert!(root.join("top.txt").exists());
        assert!(root.join("docs/readme.md").exists());
        assert!(!root.join("docs/debug.log").exists());

        assert_eq!(report.failures().len(), 1);
        match &report.failures()[0] {
            ArchiveError::Unmatched { paths } => assert_eq!(paths, &["nothing/*"]),
            other => panic!("unexpected failure: {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_exclusion_wins_but_glob_counts_as_found() -> Result<()> {
        let (_dir, a) = stored(&sample(), false)?;
        let (out, report) = list(Archiver {
            paths: vec!["docs/*".into()],
            matcher: Matcher::new(Vec::<String>::new(), [r"\.log$"])?,
            ..a
        })?;
        assert_eq!(out, "docs/readme.md\n");
        assert!(report.is_clean());

        let (_dir, a) = stored(&sample(), false)?;
        let (out, report) = list(Archiver {
            paths: vec!["docs/debug.log".into()],
            matcher: Matcher::new(["docs/*.log"], Vec::<String>::new())?,
            ..a
        })?;
        assert_eq!(out, "");
        assert!(report.is_clean());
        Ok(())
    }

    #[test]
    fn test_bad_requested_glob_reported_once() -> Result<()> {
        let (_dir, a) = stored(&sample(), false)?;
        let (out, report) = list(Archiver {
            paths: vec!["[oops".into(), "top.txt".into()],
            ..a
        })?;
        assert_eq!(out, "top.txt\n");
        assert_eq!(report.failures().len(), 1);
        assert!(matches!(
            report.failures()[0],
            ArchiveError::InvalidGlob { .. }
        ));
        Ok(())
    }

    #[test]
    fn test_unwritable_target_is_per_entry() -> Result<()> {
        let mut a = Archive::new("");
        a.push(Entry::new("blocker/inner.txt", "x\n"));
        a.push(Entry::new("fine.txt", "y\n"));
        let (dir, archiver) = stored(&a, false)?;
        let root = dir.path().join("out");
        fs::write(root.join("blocker"), "a file, not a dir")?;

        let report = archiver.clone().extract(&mut std::io::sink())?;
        assert_eq!(report.failures().len(), 1);
        assert!(matches!(report.failures()[0], ArchiveError::Write { .. }));
        assert_eq!(fs::read_to_string(root.join("fine.txt"))?, "y\n");

        let strict = Archiver {
            stop_on_error: true,
            ..archiver
        };
        assert!(strict.extract(&mut std::io::sink()).is_err());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_list_through_fifo() -> Result<()> {
        let dir = tempdir()?;
        let fifo = dir.path().join("pipe.txtar");
        assert!(std::process::Command::new("mkfifo")
            .arg(&fifo)
            .status()?
            .success());

        let writer_path = fifo.clone();
        let writer = std::thread::spawn(move || fs::write(writer_path, "-- a.txt --\nhi\n"));
        let (out, report) = list(Archiver {
            archive_file: Some(fifo),
            ..Default::default()
        })?;
        writer.join().expect("writer thread panicked")?;

        assert!(report.is_clean());
        assert_eq!(out, "a.txt\n");
        Ok(())
    }

    #[test]
    fn test_list_concatenated_gzip_members() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("joined.txtar.gz");
        let mut joined = Vec::new();
        for body in ["-- a.txt --\na\n", "-- b.txt --\nb\n"] {
            let mut gz = gzip_writer(&mut joined);
            gz.write_all(body.as_bytes())?;
            gz.finish()?;
        }
        fs::write(&path, joined)?;

        let (out, _) = list(Archiver {
            archive_file: Some(path),
            gzip: true,
            ..Default::default()
        })?;
        assert_eq!(out, "a.txt\nb.txt\n");
        Ok(())
    }

    #[test]
    fn test_missing_or_corrupt_archive_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let missing = Archiver {
            archive_file: Some(dir.path().join("missing.txtar")),
            ..Default::default()
        };
        assert!(missing.list(&mut std::io::sink()).is_err());

        let plain = dir.path().join("plain.txtar");
        fs::write(&plain, "-- a --\nnot gzip\n")?;
        let gz = Archiver {
            archive_file: Some(plain),
            gzip: true,
            ..Default::default()
        };
        let err = gz.list(&mut std::io::sink()).unwrap_err();
        assert!(err.to_string().contains("Failed to decompress gzip stream"));
        Ok(())
    }
}
