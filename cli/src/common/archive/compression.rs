//! # txtarc Compression Utilities (`common::archive::compression`)
//!
//! File: cli/src/common/archive/compression.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! Gzip framing for whole archives. Compression is applied to the encoded
//! archive as one stream, never per entry, so a `.txtar.gz` made here is an
//! ordinary gzip file that `gunzip` turns back into a readable txtar.
//!
//! - [`gzip_writer`] wraps any `Write` sink; the caller must `finish()` it so
//!   the gzip trailer is written and any error surfaces.
//! - [`decompress_gzip`] inflates a whole in-memory archive.
//!
//! The gzip header carries the time of encoding as its modification time.
//!
//! ## Usage
//!
//! ```rust
//! let mut gz = compression::gzip_writer(&mut sink);
//! gz.write_all(&encoded)?;
//! gz.finish()?;
//!
//! let plain = compression::decompress_gzip(&compressed)?;
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use flate2::{read::MultiGzDecoder, write::GzEncoder, Compression, GzBuilder};
use std::io::{Read, Write};

/// Wraps `sink` in a gzip encoder stamped with the current time.
pub fn gzip_writer<W: Write>(sink: W) -> GzEncoder<W> {
    GzBuilder::new()
        .mtime(gzip_mtime())
        .write(sink, Compression::default())
}

/// Inflates a complete gzip stream. Concatenated members (`cat a.gz b.gz`)
/// are inflated one after another.
///
/// # Errors
///
/// Returns an `Err` if `compressed` is not valid gzip data.
pub fn decompress_gzip(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(compressed);
    let mut plain = Vec::new();
    decoder
        .read_to_end(&mut plain)
        .context("Failed to decompress gzip stream")?;
    Ok(plain)
}

/// Seconds since the epoch, clamped to the 32-bit gzip MTIME field.
fn gzip_mtime() -> u32 {
    let now = chrono::Utc::now().timestamp();
    u32::try_from(now.max(0)).unwrap_or(u32::MAX)
}
