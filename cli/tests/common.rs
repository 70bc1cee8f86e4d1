//! # txtarc CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! This module provides shared utility functions used across multiple
//! integration test files (`create.rs`, `list.rs`, etc.). This avoids code
//! duplication in the test suite.
//!
//! Integration tests are located in the `cli/tests/` directory and each `.rs` file
//! in that directory (that isn't a module like this one) is compiled as a separate
//! test crate linked against the main `txtarc` binary crate.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;

/// # Get txtarc Command (`txtarc_cmd`)
///
/// Helper function to create an `assert_cmd::Command` instance pointing to the
/// compiled `txtarc` binary target for the current test run.
///
/// The command is isolated from the developer's own setup: no settings file is
/// picked up from the environment or the per-user config directory, and
/// `RUST_LOG` is cleared so stderr only carries what the test expects.
///
/// ## Panics
/// Panics if the `txtarc` binary cannot be found via `Command::cargo_bin`.
pub fn txtarc_cmd() -> Command {
    let mut cmd = Command::cargo_bin("txtarc").expect("Failed to find txtarc binary for testing");
    cmd.env_remove("TXTARC_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent/txtarc-test-config");
    cmd
}

/// Creates each `(relative path, contents)` file under `root`, with parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, contents) in files {
        let path = root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, contents).expect("Failed to write fixture file");
    }
}
