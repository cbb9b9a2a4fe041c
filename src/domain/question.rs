use serde::{Deserialize, Serialize};

use super::WordEntry;

/// Which attribute of the word a question asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  /// Asks for the pronunciation
  Reading,
  /// Asks for the translated sense
  Meaning,
}

impl QuestionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Reading => "reading",
      Self::Meaning => "meaning",
    }
  }

  /// The attribute of `entry` this kind of question asks for
  pub fn value_of<'a>(&self, entry: &'a WordEntry) -> &'a str {
    match self {
      Self::Reading => &entry.reading,
      Self::Meaning => &entry.meaning,
    }
  }

  pub fn prompt_for(&self, jp_word: &str) -> String {
    match self {
      Self::Reading => format!("「{}」の読み方は？", jp_word),
      Self::Meaning => format!("「{}」の意味は？", jp_word),
    }
  }
}

impl std::fmt::Display for QuestionKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A single multiple-choice question.
///
/// `correct_text` appears exactly once in `choices`, and all choices are
/// pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub kind: QuestionKind,
  pub prompt: String,
  pub choices: Vec<String>,
  pub correct_text: String,

  // Source word
  pub jp_word: String,
  pub reading: String,
  pub meaning: String,
  pub pos: String,
}

impl Question {
  pub fn is_correct(&self, picked: &str) -> bool {
    picked == self.correct_text
  }

  pub fn offers(&self, choice: &str) -> bool {
    self.choices.iter().any(|c| c == choice)
  }

  pub fn correct_index(&self) -> Option<usize> {
    self.choices.iter().position(|c| *c == self.correct_text)
  }
}

/// An ordered list of questions
pub type Quiz = Vec<Question>;
