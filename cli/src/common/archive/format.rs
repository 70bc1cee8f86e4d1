//! # Txtar Archive Format (`common::archive::format`)
//!
//! File: cli/src/common/archive/format.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/txtarc
//!
//! ## Overview
//!
//! A txtar archive is plain text: a free-form comment followed by named file
//! bodies, each introduced by a marker line.
//!
//! ```text
//! This comment describes the archive.
//! -- a.txt --
//! hi
//! -- sub/b.txt --
//! bye
//! ```
//!
//! ## Rules
//!
//! - A marker line is `-- ` + name + ` --`. The name is whitespace-trimmed and
//!   must be non-empty.
//! - The comment and every body are newline-terminated. [`encode`] appends a
//!   missing final newline, and [`decode`] does the same for a final body.
//! - A comment containing a line that starts with `-- ` and ends with ` --`
//!   cannot be encoded; it would be read back as an entry.
//! - Decoding never fails. Text that does not look like a marker line is body.
//!
use crate::core::error::ArchiveError;
use tracing::warn;

const MARKER: &[u8] = b"-- ";
const MARKER_END: &[u8] = b" --";
const NEWLINE_MARKER: &[u8] = b"\n-- ";

/// One named file body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub data: Vec<u8>,
}

impl Entry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// A comment plus an ordered list of uniquely named entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    pub comment: Vec<u8>,
    entries: Vec<Entry>,
}

impl Archive {
    pub fn new(comment: impl Into<Vec<u8>>) -> Self {
        Self {
            comment: comment.into(),
            entries: Vec::new(),
        }
    }

    /// Appends `entry`, first removing any entry with the same name. The last
    /// write wins and takes the last position.
    pub fn push(&mut self, entry: Entry) {
        self.entries.retain(|e| e.name != entry.name);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Reports whether `text` has a line that would be read as a marker line.
pub fn has_marker_line(text: &[u8]) -> bool {
    text.split(|&b| b == b'\n').any(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        line.starts_with(MARKER) && line.ends_with(MARKER_END)
    })
}

/// Serializes `archive`.
///
/// # Errors
///
/// Returns `ArchiveError::CommentMarker` if the comment contains a marker line.
pub fn encode(archive: &Archive) -> Result<Vec<u8>, ArchiveError> {
    if has_marker_line(&archive.comment) {
        return Err(ArchiveError::CommentMarker);
    }
    let size = archive.comment.len()
        + archive
            .entries
            .iter()
            .map(|e| e.name.len() + e.data.len() + 8)
            .sum::<usize>();
    let mut out = Vec::with_capacity(size);
    push_with_newline(&mut out, &archive.comment);
    for entry in &archive.entries {
        if has_marker_line(&entry.data) {
            warn!(
                "{} contains a marker line and will be split when the archive is read back",
                entry.name
            );
        }
        out.extend_from_slice(MARKER);
        out.extend_from_slice(entry.name.as_bytes());
        out.extend_from_slice(MARKER_END);
        out.push(b'\n');
        push_with_newline(&mut out, &entry.data);
    }
    Ok(out)
}

/// Parses `data` into an archive. Never fails; malformed input yields whatever
/// could be recognized.
pub fn decode(data: &[u8]) -> Archive {
    let (comment, mut next) = split_at_marker(data);
    let mut archive = Archive::new(comment);
    while let Some((name, rest)) = next {
        let (body, after) = split_at_marker(rest);
        archive.push(Entry::new(name, body));
        next = after;
    }
    archive
}

fn push_with_newline(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
    if data.last().is_some_and(|&b| b != b'\n') {
        out.push(b'\n');
    }
}

/// Splits `data` at the first marker line. Returns the bytes before it and,
/// if a marker was found, the entry name and the bytes after the marker line.
fn split_at_marker(data: &[u8]) -> (Vec<u8>, Option<(String, &[u8])>) {
    let mut i = 0;
    loop {
        if let Some((name, after)) = parse_marker(&data[i..]) {
            return (data[..i].to_vec(), Some((name, after)));
        }
        match find(&data[i..], NEWLINE_MARKER) {
            Some(j) => i += j + 1,
            None => {
                let mut before = Vec::with_capacity(data.len() + 1);
                push_with_newline(&mut before, data);
                return (before, None);
            }
        }
    }
}

/// Recognizes a marker line at the very start of `data`.
fn parse_marker(data: &[u8]) -> Option<(String, &[u8])> {
    if !data.starts_with(MARKER) {
        return None;
    }
    let (line, after) = match data.iter().position(|&b| b == b'\n') {
        Some(nl) => (&data[..nl], &data[nl + 1..]),
        None => (data, &data[data.len()..]),
    };
    if line.len() < MARKER.len() + MARKER_END.len() || !line.ends_with(MARKER_END) {
        return None;
    }
    let name = String::from_utf8_lossy(&line[MARKER.len()..line.len() - MARKER_END.len()]);
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), after))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
