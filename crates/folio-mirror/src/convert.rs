//! Text converters for locale mirroring.
//!
//! [`TableConverter`] reads OpenCC-style dictionary files: one entry per
//! line, a key, a tab, then space-separated candidates of which the first is
//! used. Keys may span several characters (phrase tables); conversion picks
//! the longest key matching at each position.

use std::collections::HashMap;
use std::path::Path;

use crate::MirrorError;

/// Converts translatable prose from one locale's script to another's.
pub trait TextConverter {
    /// Convert a run of prose.
    fn convert(&self, text: &str) -> String;
}

/// Converter that leaves text unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityConverter;

impl TextConverter for IdentityConverter {
    fn convert(&self, text: &str) -> String {
        text.to_owned()
    }
}

/// Malformed conversion table line.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct TableError {
    /// 1-based line number.
    pub line: usize,
    pub message: &'static str,
}

/// Dictionary-based converter with longest-key matching.
#[derive(Clone, Debug, Default)]
pub struct TableConverter {
    entries: HashMap<String, String>,
    /// Length in chars of the longest key.
    max_key_chars: usize,
}

impl TableConverter {
    /// Parse dictionary content.
    ///
    /// Blank lines and lines starting with `#` are skipped. A later entry for
    /// the same key replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] for lines without a tab or without a candidate.
    pub fn parse(content: &str) -> Result<Self, TableError> {
        let mut table = Self::default();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, candidates)) = line.split_once('\t') else {
                return Err(TableError {
                    line: i + 1,
                    message: "expected <key>\\t<candidates>",
                });
            };
            let Some(first) = candidates.split_whitespace().next() else {
                return Err(TableError {
                    line: i + 1,
                    message: "entry has no candidate",
                });
            };
            if key.is_empty() {
                return Err(TableError {
                    line: i + 1,
                    message: "entry has an empty key",
                });
            }
            table.insert(key, first);
        }
        Ok(table)
    }

    /// Read and parse a dictionary file.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Io`] if the file cannot be read, or
    /// [`MirrorError::Table`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, MirrorError> {
        let content = std::fs::read_to_string(path).map_err(|source| MirrorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&content).map_err(|source| MirrorError::Table {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), entries = table.len(), "Loaded conversion table");
        Ok(table)
    }

    /// Read several dictionary files into one table.
    ///
    /// Later files replace entries of earlier ones. Since matching always
    /// prefers the longest key, a phrase table and a character table merge
    /// into the same chain OpenCC applies.
    ///
    /// # Errors
    ///
    /// Returns the first [`MirrorError`] from [`load`](Self::load).
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Self, MirrorError> {
        let mut table = Self::default();
        for path in paths {
            table.extend(Self::load(path.as_ref())?);
        }
        Ok(table)
    }

    /// Merge another table's entries into this one.
    pub fn extend(&mut self, other: Self) {
        self.max_key_chars = self.max_key_chars.max(other.max_key_chars);
        self.entries.extend(other.entries);
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.max_key_chars = self.max_key_chars.max(key.chars().count());
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TextConverter for TableConverter {
    fn convert(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_owned();
        }

        // Byte offsets of char boundaries, including the end of the text.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while pos < char_count {
            let longest = self.max_key_chars.min(char_count - pos);
            let matched = (1..=longest).rev().find_map(|len| {
                let key = &text[bounds[pos]..bounds[pos + len]];
                self.entries.get(key).map(|value| (len, value))
            });
            match matched {
                Some((len, value)) => {
                    out.push_str(value);
                    pos += len;
                }
                None => {
                    out.push_str(&text[bounds[pos]..bounds[pos + 1]]);
                    pos += 1;
                }
            }
        }
        out
    }
}
