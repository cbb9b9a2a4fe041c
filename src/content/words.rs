//! Word list loading and filtering.
//!
//! The dataset is a delimited text file with at least the columns
//! `level, pos, jp_word, reading, meaning`. Comma and tab delimiters are both
//! accepted: when a comma parse yields a single header column containing a
//! tab, the file is re-read as tab-delimited.

use csv::ReaderBuilder;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::domain::WordEntry;
use crate::error::DataError;

/// Columns every dataset must provide (after header normalization)
pub const REQUIRED_COLUMNS: [&str; 5] = ["level", "pos", "jp_word", "reading", "meaning"];

/// Immutable, ordered collection of word entries.
///
/// Filtering returns a new pool; the source is never mutated.
#[derive(Debug, Clone, Default)]
pub struct WordPool {
  entries: Vec<WordEntry>,
  columns: Vec<String>,
}

/// Overview of a loaded pool
#[derive(Debug, Clone, Serialize)]
pub struct PoolSummary {
  pub total: usize,
  pub columns: Vec<String>,
  pub by_pos: IndexMap<String, usize>,
}

impl WordPool {
  pub fn from_entries(entries: Vec<WordEntry>) -> Self {
    Self {
      entries,
      columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
    }
  }

  /// Load a pool from a dataset file.
  pub fn load(path: &Path) -> Result<Self, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
      path: path.display().to_string(),
      source,
    })?;

    let pool = Self::parse(&content)?;
    tracing::info!("Loaded {} words from {}", pool.len(), path.display());
    Ok(pool)
  }

  /// Parse dataset text, auto-detecting the delimiter.
  pub fn parse(content: &str) -> Result<Self, DataError> {
    let delimiter = detect_delimiter(content)?;
    tracing::debug!("Parsing word list with delimiter {:?}", delimiter as char);

    let mut reader = ReaderBuilder::new()
      .delimiter(delimiter)
      .from_reader(content.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
      .iter()
      .filter(|name| !columns.iter().any(|c| c == *name))
      .map(|name| name.to_string())
      .collect();
    if !missing.is_empty() {
      return Err(DataError::MissingColumns(missing));
    }

    let position = |name: &str| columns.iter().position(|c| c == name).unwrap_or(0);
    let level_idx = position("level");
    let pos_idx = position("pos");
    let word_idx = position("jp_word");
    let reading_idx = position("reading");
    let meaning_idx = position("meaning");

    let mut entries = Vec::new();
    for record in reader.records() {
      let record = record?;
      // Every record has the header's width, so indices are in range
      let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
      entries.push(WordEntry {
        jp_word: field(word_idx),
        reading: field(reading_idx),
        meaning: field(meaning_idx),
        level: field(level_idx),
        pos: field(pos_idx),
      });
    }

    Ok(Self { entries, columns })
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[WordEntry] {
    &self.entries
  }

  pub fn iter(&self) -> std::slice::Iter<'_, WordEntry> {
    self.entries.iter()
  }

  /// Normalized header names, in file order
  pub fn columns(&self) -> &[String] {
    &self.columns
  }

  /// Entries whose level matches exactly and whose pos is in `pos_set`
  pub fn filter(&self, level: &str, pos_set: &[&str]) -> WordPool {
    self.retain(|e| e.level == level && pos_set.contains(&e.pos.as_str()))
  }

  /// Entries with the given part of speech
  pub fn with_pos(&self, pos: &str) -> WordPool {
    self.retain(|e| e.pos == pos)
  }

  /// Entries whose `jp_word` is in `words`
  pub fn with_words(&self, words: &HashSet<String>) -> WordPool {
    self.retain(|e| words.contains(&e.jp_word))
  }

  /// Entry counts per part of speech, in first-seen order
  pub fn count_by_pos(&self) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for entry in &self.entries {
      *counts.entry(entry.pos.clone()).or_insert(0) += 1;
    }
    counts
  }

  pub fn summary(&self) -> PoolSummary {
    PoolSummary {
      total: self.len(),
      columns: self.columns.clone(),
      by_pos: self.count_by_pos(),
    }
  }

  fn retain(&self, keep: impl Fn(&WordEntry) -> bool) -> WordPool {
    WordPool {
      entries: self.entries.iter().filter(|e| keep(e)).cloned().collect(),
      columns: self.columns.clone(),
    }
  }
}

impl<'a> IntoIterator for &'a WordPool {
  type Item = &'a WordEntry;
  type IntoIter = std::slice::Iter<'a, WordEntry>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}

/// Strip byte-order marks and surrounding whitespace from a header name
fn normalize_header(raw: &str) -> String {
  raw.replace('\u{feff}', "").trim().to_string()
}

/// Comma unless a comma parse leaves one header column holding a tab
fn detect_delimiter(content: &str) -> Result<u8, DataError> {
  let mut reader = ReaderBuilder::new()
    .delimiter(b',')
    .from_reader(content.as_bytes());
  let headers = reader.headers()?;

  if headers.is_empty() || headers.iter().all(|h| normalize_header(h).is_empty()) {
    return Err(DataError::Empty);
  }

  if headers.len() == 1 && headers.get(0).is_some_and(|h| h.contains('\t')) {
    Ok(b'\t')
  } else {
    Ok(b',')
  }
}
