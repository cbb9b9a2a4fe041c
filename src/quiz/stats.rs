//! Per-session word statistics accumulated across graded rounds.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::{Question, QuizMode};

/// One grading event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptRecord {
  pub mode: QuizMode,
  pub score: usize,
  pub total: usize,
  pub graded_at: DateTime<Utc>,
}

/// A word's tally as reported by [`StatsTracker::top_missed`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissedWord {
  pub word: String,
  pub misses: u32,
  pub exposures: u32,
}

impl MissedWord {
  pub fn miss_rate(&self) -> f64 {
    if self.exposures > 0 {
      self.misses as f64 / self.exposures as f64
    } else {
      0.0
    }
  }
}

/// Exposure and miss counts keyed by `jp_word`, plus attempt history.
///
/// Counts only grow until [`StatsTracker::reset`].
#[derive(Debug, Clone, Default)]
pub struct StatsTracker {
  exposures: IndexMap<String, u32>,
  misses: IndexMap<String, u32>,
  history: Vec<AttemptRecord>,
}

impl StatsTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Count every question as an exposure and every mismatch as a miss.
  pub fn record(&mut self, quiz: &[Question], answers: &[Option<String>]) {
    for (idx, question) in quiz.iter().enumerate() {
      *self.exposures.entry(question.jp_word.clone()).or_insert(0) += 1;

      let correct = matches!(answers.get(idx), Some(Some(picked)) if question.is_correct(picked));
      if !correct {
        *self.misses.entry(question.jp_word.clone()).or_insert(0) += 1;
      }
    }
  }

  pub fn record_attempt(&mut self, mode: QuizMode, score: usize, total: usize) {
    self.history.push(AttemptRecord {
      mode,
      score,
      total,
      graded_at: Utc::now(),
    });
  }

  /// Words ordered by miss count, highest first.
  ///
  /// Ties keep the order in which words were first missed.
  pub fn top_missed(&self, k: usize) -> Vec<MissedWord> {
    let mut ranked: Vec<MissedWord> = self
      .misses
      .iter()
      .filter(|(_, misses)| **misses > 0)
      .map(|(word, &misses)| MissedWord {
        word: word.clone(),
        misses,
        exposures: self.exposures(word),
      })
      .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.misses.cmp(&a.misses));
    ranked.truncate(k);
    ranked
  }

  /// Total score over total questions across all attempts, 0 if none
  pub fn accuracy(&self) -> f64 {
    let total: usize = self.history.iter().map(|a| a.total).sum();
    if total == 0 {
      return 0.0;
    }
    let score: usize = self.history.iter().map(|a| a.score).sum();
    score as f64 / total as f64
  }

  pub fn exposures(&self, word: &str) -> u32 {
    self.exposures.get(word).copied().unwrap_or(0)
  }

  pub fn misses(&self, word: &str) -> u32 {
    self.misses.get(word).copied().unwrap_or(0)
  }

  pub fn history(&self) -> &[AttemptRecord] {
    &self.history
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }
}
