use serde::{Deserialize, Serialize};

/// Part-of-speech code for い-adjectives
pub const I_ADJ: &str = "i_adj";

/// Part-of-speech code for な-adjectives
pub const NA_ADJ: &str = "na_adj";

/// One row of the vocabulary dataset.
///
/// `jp_word` is not unique across a dataset; statistics key on its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
  pub jp_word: String,
  pub reading: String,
  pub meaning: String,
  /// JLPT level code, e.g. "N4"
  pub level: String,
  /// Part-of-speech code, e.g. "i_adj"
  pub pos: String,
}

impl WordEntry {
  pub fn new(jp_word: &str, reading: &str, meaning: &str, level: &str, pos: &str) -> Self {
    Self {
      jp_word: jp_word.to_string(),
      reading: reading.to_string(),
      meaning: meaning.to_string(),
      level: level.to_string(),
      pos: pos.to_string(),
    }
  }
}

/// Category selector for a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizMode {
  #[serde(rename = "i_adj")]
  IAdjective,
  #[serde(rename = "na_adj")]
  NaAdjective,
  #[serde(rename = "mixed")]
  Mixed,
}

impl QuizMode {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "i_adj" => Some(Self::IAdjective),
      "na_adj" => Some(Self::NaAdjective),
      "mixed" => Some(Self::Mixed),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::IAdjective => "i_adj",
      Self::NaAdjective => "na_adj",
      Self::Mixed => "mixed",
    }
  }

  /// Part-of-speech codes this mode draws from, in split order
  pub fn categories(&self) -> &'static [&'static str] {
    match self {
      Self::IAdjective => &[I_ADJ],
      Self::NaAdjective => &[NA_ADJ],
      Self::Mixed => &[I_ADJ, NA_ADJ],
    }
  }
}

impl std::fmt::Display for QuizMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
