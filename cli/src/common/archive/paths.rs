//! # Archive Path Safening (`common::archive::paths`)
//!
//! File: cli/src/common/archive/paths.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! Names inside an archive always use `/` separators. Names on the host use
//! whatever the platform uses. [`PathMode`] is the only converter between the
//! two, and in [`PathMode::Safe`] it also makes sure a name can never point
//! outside the directory it is extracted into.
//!
//! ## Safening
//!
//! 1. Root the path (`"../x"` becomes `"/../x"`) so that `..` segments collapse
//!    against the root marker instead of escaping upward.
//! 2. Lexically clean it: drop empty and `.` segments, resolve `..`.
//! 3. Strip the leading `/`.
//! 4. An empty result becomes `"."`.
//!
//! | input        | safe      | unsafe        |
//! |--------------|-----------|---------------|
//! | `/p/foo`     | `p/foo`   | `/p/foo`      |
//! | `../../p`    | `p`       | `../../p`     |
//! | `a/../../b`  | `b`       | `a/../../b`   |
//! | `/`          | `.`       | `/`           |
//!
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

/// Whether names are safened on their way in and out of an archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathMode {
    #[default]
    Safe,
    /// Separator conversion only; names are trusted as-is.
    Unsafe,
}

impl PathMode {
    /// Converts an archive name to the host path it should be written to.
    pub fn to_host(self, archive_path: &str) -> PathBuf {
        from_slash(&self.apply(archive_path))
    }

    /// Converts a host path to the name it is stored under in an archive.
    pub fn to_archive(self, host_path: &Path) -> String {
        self.apply(&to_slash(host_path))
    }

    fn apply(self, p: &str) -> String {
        match self {
            Self::Unsafe => p.to_string(),
            Self::Safe => safen(p),
        }
    }
}

fn safen(p: &str) -> String {
    let rooted = format!("/{p}");
    let cleaned = clean(&rooted);
    let relative = cleaned.trim_start_matches('/');
    if relative.is_empty() {
        ".".to_string()
    } else {
        relative.to_string()
    }
}

/// Lexical cleaning of a `/`-separated path. `..` at the root is dropped.
fn clean(p: &str) -> String {
    let rooted = p.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for seg in p.split('/') {
        match seg {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(seg),
        }
    }
    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

fn from_slash(p: &str) -> PathBuf {
    if MAIN_SEPARATOR == '/' {
        PathBuf::from(p)
    } else {
        PathBuf::from(p.replace('/', MAIN_SEPARATOR_STR))
    }
}

fn to_slash(p: &Path) -> String {
    let s = p.to_string_lossy();
    if MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(MAIN_SEPARATOR, "/")
    }
}
