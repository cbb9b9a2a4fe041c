//! Error types for dataset loading, quiz assembly and session transitions.

use thiserror::Error;

use crate::domain::QuestionKind;

/// Dataset could not be turned into a word pool.
#[derive(Debug, Error)]
pub enum DataError {
  #[error("failed to read dataset {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed dataset at line {line}: {message}")]
  Parse { line: u64, message: String },

  #[error("dataset is missing required columns: {}", .0.join(", "))]
  MissingColumns(Vec<String>),

  #[error("dataset has no header row")]
  Empty,
}

impl From<csv::Error> for DataError {
  fn from(err: csv::Error) -> Self {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    DataError::Parse {
      line,
      message: err.to_string(),
    }
  }
}

#[derive(Debug, Error)]
pub enum QuizError {
  #[error(transparent)]
  Data(#[from] DataError),

  #[error("not enough words for {category}: need {required}, have {available}")]
  InsufficientPool {
    category: String,
    required: usize,
    available: usize,
  },

  #[error("not enough distinct {kind} values in {category} to build distractors for {word}")]
  InsufficientDistractors {
    category: String,
    kind: QuestionKind,
    word: String,
  },

  #[error("none of the requested words are in the {mode} pool")]
  NoMatch { mode: String },

  #[error("invalid transition: {0}")]
  InvalidTransition(String),
}

impl QuizError {
  /// Returns a short user-facing message.
  pub fn user_message(&self) -> String {
    match self {
      QuizError::Data(_) => "The word list could not be loaded".to_string(),
      other => other.to_string(),
    }
  }
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_columns_message_lists_columns() {
    let err = DataError::MissingColumns(vec!["reading".into(), "meaning".into()]);
    assert_eq!(
      err.to_string(),
      "dataset is missing required columns: reading, meaning"
    );
  }

  #[test]
  fn test_data_error_user_message_hides_details() {
    let err = QuizError::from(DataError::Io {
      path: "/secret/words.csv".into(),
      source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    });
    assert!(!err.user_message().contains("/secret"));
  }

  #[test]
  fn test_insufficient_pool_message() {
    let err = QuizError::InsufficientPool {
      category: "na_adj".into(),
      required: 10,
      available: 2,
    };
    assert_eq!(err.to_string(), "not enough words for na_adj: need 10, have 2");
  }
}
