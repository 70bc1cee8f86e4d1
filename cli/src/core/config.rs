//! # txtarc Settings File
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! This module loads the optional txtarc settings file. The file carries
//! defaults that would otherwise have to be repeated on every invocation:
//! exclusion patterns that should always apply (editor swap files, VCS
//! directories) and whether archives are gzipped by default.
//!
//! ## Architecture
//!
//! Settings sources, first match wins:
//! 1. The path given with `--config` or the `TXTARC_CONFIG` environment variable
//!    (`~` is expanded). The file must exist.
//! 2. `config.toml` in the per-user config directory
//!    (e.g. `~/.config/txtarc/config.toml` on Linux). Optional.
//! 3. Built-in defaults (no exclusions, no gzip).
//!
//! Settings are merged with the command line in `commands::ArchiverArgs`:
//! patterns from the file come first, flags add to them, and `-z` can only
//! turn gzip on.
//!
//! ## Examples
//!
//! ```toml
//! gzip = false
//!
//! [exclude]
//! globs = ["*.swp", "*~"]
//! regexes = ['(^|/)\.git/']
//! ```
//!
use crate::core::error::{ArchiveError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the settings file, loaded from TOML.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Compress archives with gzip unless told otherwise.
    #[serde(default)]
    pub gzip: bool,
    #[serde(default)]
    pub exclude: ExcludeSettings,
}

/// Exclusion patterns applied to every create, list and extract.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExcludeSettings {
    /// Glob patterns (`*` does not cross `/`).
    #[serde(default)]
    pub globs: Vec<String>,
    /// Regular expressions, matched anywhere in the path.
    #[serde(default)]
    pub regexes: Vec<String>,
}

const SETTINGS_FILENAME: &str = "config.toml";

/// Loads settings from `explicit` if given, otherwise from the per-user config
/// directory, otherwise returns the defaults.
pub fn load_settings(explicit: Option<&str>) -> Result<Settings> {
    let settings = match explicit {
        Some(raw) => {
            let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
            info!("Loading settings from: {}", path.display());
            load_settings_from_path(&path)?
        }
        None => load_user_settings()?.unwrap_or_default(),
    };
    validate_settings(&settings).context("Settings validation failed")?;
    debug!("Final settings: {:?}", settings);
    Ok(settings)
}

fn load_user_settings() -> Result<Option<Settings>> {
    let Some(proj_dirs) = ProjectDirs::from("org", "txtarc", "txtarc") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let path = proj_dirs.config_dir().join(SETTINGS_FILENAME);
    if path.is_file() {
        info!("Loading user settings from: {}", path.display());
        load_settings_from_path(&path).map(Some)
    } else {
        debug!("User settings file not found at {}", path.display());
        Ok(None)
    }
}

fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn validate_settings(settings: &Settings) -> Result<()> {
    let patterns = settings
        .exclude
        .globs
        .iter()
        .chain(settings.exclude.regexes.iter());
    for pattern in patterns {
        if pattern.is_empty() {
            return Err(anyhow!(ArchiveError::Config(
                "Exclusion patterns in the settings file cannot be empty.".to_string()
            )));
        }
    }
    Ok(())
}
