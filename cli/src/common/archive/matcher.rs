//! # Exclusion Matching (`common::archive::matcher`)
//!
//! File: cli/src/common/archive/matcher.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! A [`Matcher`] decides whether a path is excluded from an archive operation.
//! It holds two pattern sets:
//!
//! - **Globs**, evaluated first. `*` and `?` never match `/`, so `*.log`
//!   only matches at the top level and `*/*.log` one level down.
//! - **Regexes**, evaluated second, matched anywhere in the path.
//!
//! The first pattern that matches wins. Regexes are compiled when the matcher
//! is built, so a bad regex is a configuration error. Globs are parsed up front
//! as well, but a parse failure is only reported when the glob is consulted,
//! which makes it a per-file error rather than a startup failure.
//!
use crate::core::error::{ArchiveError, Result};
use anyhow::anyhow;
use glob::{MatchOptions, Pattern, PatternError};
use regex::Regex;

/// Glob semantics shared by exclusions and requested-path matching.
pub const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A glob pattern parsed once, with its parse error (if any) kept for later.
#[derive(Debug, Clone)]
pub struct Glob {
    source: String,
    // (pos, msg) of the parse failure; `PatternError` is not `Clone`.
    parsed: std::result::Result<Pattern, (usize, &'static str)>,
}

impl Glob {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            parsed: Pattern::new(source).map_err(|e| (e.pos, e.msg)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Matches `path` against the glob, failing if the glob is malformed.
    pub fn matches(&self, path: &str) -> std::result::Result<bool, ArchiveError> {
        match &self.parsed {
            Ok(pattern) => Ok(pattern.matches_with(path, GLOB_OPTIONS)),
            Err((pos, msg)) => Err(ArchiveError::InvalidGlob {
                pattern: self.source.clone(),
                source: PatternError {
                    pos: *pos,
                    msg: *msg,
                },
            }),
        }
    }
}

/// Set of exclusion globs and regexes.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    globs: Vec<Glob>,
    regexes: Vec<Regex>,
}

impl Matcher {
    /// Builds a matcher, compiling every regex.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::InvalidRegex` for the first regex that does not
    /// compile.
    pub fn new<G, R>(globs: G, regexes: R) -> Result<Self>
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let globs = globs.into_iter().map(|g| Glob::new(g.as_ref())).collect();
        let regexes = regexes
            .into_iter()
            .map(|r| {
                let r = r.as_ref();
                Regex::new(r).map_err(|source| {
                    anyhow!(ArchiveError::InvalidRegex {
                        pattern: r.to_string(),
                        source,
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { globs, regexes })
    }

    /// Reports whether `path` matches any exclusion pattern.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::InvalidGlob` when a malformed glob is reached
    /// before any pattern has matched.
    pub fn is_excluded(&self, path: &str) -> std::result::Result<bool, ArchiveError> {
        for glob in &self.globs {
            if glob.matches(path)? {
                return Ok(true);
            }
        }
        Ok(self.regexes.iter().any(|re| re.is_match(path)))
    }
}
