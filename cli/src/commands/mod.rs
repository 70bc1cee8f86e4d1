//! # txtarc Archiver
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! This module turns a parsed command line into an [`Archiver`] and runs one
//! of its three verbs:
//!
//! - `create` (`-c`): walk the requested paths and write an archive.
//! - `list` (`-t`): print the names stored in an archive.
//! - `extract` (`-x`): write an archive's entries back to disk.
//!
//! ## Architecture
//!
//! - `ArchiverArgs`: the flat `tar`-style flag set, parsed by Clap.
//! - `Archiver`: the validated configuration every verb runs from. Settings
//!   file patterns and command line patterns are merged here, and exclusion
//!   regexes are compiled here, so a configuration error is raised before any
//!   file is read or written.
//! - `create.rs` / `extract.rs`: the verbs themselves, as `impl Archiver`
//!   blocks. Each verb consumes the archiver and returns a [`Report`] of the
//!   per-file failures it stepped over.
//!
//! ## Examples
//!
//! ```bash
//! # Archive a directory, skipping editor swap files
//! txtarc -cf project.txtar --exclude '*.swp' src
//!
//! # List with sizes, then extract only the docs elsewhere
//! txtarc -tvf project.txtar
//! txtarc -xf project.txtar -C /tmp/out 'docs/*'
//! ```
//!
use crate::common::archive::matcher::Matcher;
use crate::common::archive::paths::PathMode;
use crate::common::fs::io;
use crate::core::config::{self, Settings};
use crate::core::error::{ArchiveError, Result};
use crate::core::report::Report;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Creates archives (`-c`).
pub mod create;
/// Lists (`-t`) and extracts (`-x`) archives.
pub mod extract;

/// # Archiver Arguments (`ArchiverArgs`)
///
/// Every flag txtarc accepts apart from `-v`, which is global and lives on the
/// top-level `Cli`.
#[derive(Args, Debug)]
pub struct ArchiverArgs {
    /// Create a new archive from PATHs.
    #[arg(short = 'c', long)]
    pub create: bool,

    /// Extract entries from an archive. PATHs, if given, are globs selecting
    /// which entries to extract.
    #[arg(short = 'x', long)]
    pub extract: bool,

    /// List the entries of an archive. PATHs select entries as with -x.
    #[arg(short = 't', long)]
    pub list: bool,

    /// Archive to read or write; `-` means standard input/output.
    #[arg(short = 'f', long = "file", value_name = "ARCHIVE", default_value = "-")]
    pub file: String,

    /// Collect from, or extract into, DIR instead of the current directory.
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Archive comment (create only).
    #[arg(long, value_name = "TEXT")]
    pub comment: Option<String>,

    /// Read additional PATHs, one per line, from FILE.
    #[arg(short = 'I', long = "files-from", value_name = "FILE")]
    pub files_from: Option<PathBuf>,

    /// Do not strip leading `/` and `..` from names.
    #[arg(short = 'P', long = "unsafe-paths")]
    pub unsafe_paths: bool,

    /// Skip paths matching GLOB (`*` does not match `/`). Repeatable.
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Skip paths matching REGEX anywhere. Repeatable.
    #[arg(long = "exclude-regex", value_name = "REGEX")]
    pub exclude_regex: Vec<String>,

    /// Compress or decompress the archive with gzip.
    #[arg(short = 'z', long)]
    pub gzip: bool,

    /// Abort on the first unreadable or unwritable file.
    #[arg(short = 'e', long = "stop-on-error")]
    pub stop_on_error: bool,

    /// Settings file to use instead of the per-user one.
    #[arg(long, env = "TXTARC_CONFIG", value_name = "FILE")]
    pub config: Option<String>,

    /// Files or directories to archive; with -t/-x, globs selecting entries.
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,
}

/// The operation requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Extract,
    List,
}

impl ArchiverArgs {
    /// Picks the single verb flag that was given.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Config` unless exactly one of `-c`, `-x`, `-t`
    /// is set.
    pub fn verb(&self) -> Result<Verb> {
        let given: Vec<Verb> = [
            (self.create, Verb::Create),
            (self.extract, Verb::Extract),
            (self.list, Verb::List),
        ]
        .into_iter()
        .filter_map(|(set, verb)| set.then_some(verb))
        .collect();
        match given.as_slice() {
            [verb] => Ok(*verb),
            [] => Err(ArchiveError::Config(
                "You must specify one of the -c, -x or -t options".to_string(),
            )
            .into()),
            _ => Err(ArchiveError::Config(
                "You may not specify more than one of the -c, -x or -t options".to_string(),
            )
            .into()),
        }
    }
}

/// # Archiver
///
/// Validated configuration shared by all three verbs.
#[derive(Debug, Clone, Default)]
pub struct Archiver {
    /// Comment written by `create`.
    pub comment: String,
    /// `None` means standard input/output.
    pub archive_file: Option<PathBuf>,
    pub gzip: bool,
    /// Roots to collect (create) or globs selecting entries (list/extract).
    pub paths: Vec<String>,
    pub path_mode: PathMode,
    pub verbose: bool,
    pub matcher: Matcher,
    pub stop_on_error: bool,
    /// Base for collected roots and extracted files. Empty means the current
    /// working directory.
    pub directory: PathBuf,
}

impl Archiver {
    /// Builds an archiver from the command line and the settings file.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Config` or `ArchiveError::InvalidRegex` when the
    /// configuration cannot be used. Nothing has been read or written yet.
    pub fn from_args(args: &ArchiverArgs, settings: &Settings, verbose: bool) -> Result<Self> {
        let globs = settings.exclude.globs.iter().chain(&args.exclude);
        let regexes = settings.exclude.regexes.iter().chain(&args.exclude_regex);
        let matcher = Matcher::new(globs, regexes)?;

        let directory = match &args.directory {
            Some(dir) if !dir.is_dir() => {
                return Err(ArchiveError::Config(format!(
                    "Cannot use {} as the working directory: not an accessible directory",
                    dir.display()
                ))
                .into())
            }
            Some(dir) => dir.clone(),
            None => PathBuf::new(),
        };

        Ok(Self {
            comment: args.comment.clone().unwrap_or_default(),
            archive_file: (args.file != "-").then(|| PathBuf::from(&args.file)),
            gzip: args.gzip || settings.gzip,
            paths: args.paths.clone(),
            path_mode: if args.unsafe_paths {
                PathMode::Unsafe
            } else {
                PathMode::Safe
            },
            verbose,
            matcher,
            stop_on_error: args.stop_on_error,
            directory,
        })
    }

    /// Appends the paths listed in `list_file`, skipping any already present.
    pub fn add_paths_from_file(&mut self, list_file: &Path) -> Result<()> {
        let listed = io::read_path_list(list_file)?;
        let before = self.paths.len();
        for path in listed {
            if !self.paths.contains(&path) {
                self.paths.push(path);
            }
        }
        debug!(
            "Added {} paths from {}",
            self.paths.len() - before,
            list_file.display()
        );
        Ok(())
    }

    /// Records a per-entity failure, or returns it when `stop_on_error` is set.
    fn fail(&self, err: ArchiveError, report: &mut Report) -> Result<()> {
        if self.stop_on_error {
            return Err(err.into());
        }
        report.record(err);
        Ok(())
    }
}

/// # Handle Archive Command (`handle_archive`)
///
/// Validates the command line, merges in the settings file and runs the
/// requested verb against the process's standard streams.
///
/// ## Returns
///
/// * `Ok(Report)`: the verb ran to completion; the report may still hold
///   per-file failures.
/// * `Err`: a configuration error, or a failure that aborted the verb.
pub fn handle_archive(args: ArchiverArgs, verbose: bool) -> Result<Report> {
    let verb = args.verb()?;
    let settings = config::load_settings(args.config.as_deref())?;
    let mut archiver = Archiver::from_args(&args, &settings, verbose)?;
    if let Some(list_file) = &args.files_from {
        archiver.add_paths_from_file(list_file)?;
    }
    if verb != Verb::Create && !archiver.comment.is_empty() {
        warn!("--comment only applies when creating an archive; ignoring it");
    }
    info!("Running {:?} with {:?}", verb, archiver);

    match verb {
        Verb::Create => archiver.create(&mut std::io::stderr()),
        Verb::List => archiver.list(&mut std::io::stdout().lock()),
        Verb::Extract => archiver.extract(&mut std::io::stdout().lock()),
    }
}
