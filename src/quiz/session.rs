//! Per-session quiz state machine.
//!
//! `version` increments whenever the quiz is replaced or the answers are
//! cleared wholesale, never when a single answer changes. Presentation code
//! keys its inputs by `(version, index)`.

use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

use crate::content::WordPool;
use crate::domain::{QuizMode, Quiz};
use crate::error::{QuizError, Result};

use super::assembler::{build_quiz, build_quiz_from_words};
use super::grading::{grade, GradeResult};
use super::stats::StatsTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  /// No quiz yet
  Idle,
  /// Quiz built, some questions unanswered
  InProgress,
  /// Every question answered, not submitted
  ReadyToSubmit,
  /// Submitted and graded
  Graded,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
  mode: Option<QuizMode>,
  quiz: Quiz,
  answers: Vec<Option<String>>,
  submitted: bool,
  version: u64,
  last_grade: Option<GradeResult>,
  stats: StatsTracker,
}

impl SessionState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn phase(&self) -> Phase {
    if self.quiz.is_empty() {
      Phase::Idle
    } else if self.submitted {
      Phase::Graded
    } else if self.answers.iter().all(Option::is_some) {
      Phase::ReadyToSubmit
    } else {
      Phase::InProgress
    }
  }

  /// Build a fresh quiz for `mode`. On failure the state is untouched.
  pub fn start<R: Rng + ?Sized>(
    &mut self,
    pool: &WordPool,
    mode: QuizMode,
    n: usize,
    rng: &mut R,
  ) -> Result<()> {
    let quiz = build_quiz(pool, mode, n, rng)?;
    self.replace_quiz(mode, quiz);
    tracing::info!("Started {} quiz (version {})", mode, self.version);
    Ok(())
  }

  /// Select `choice` for question `index`.
  pub fn answer(&mut self, index: usize, choice: &str) -> Result<Phase> {
    self.ensure_open()?;
    let question = self.quiz.get(index).ok_or_else(|| self.out_of_range(index))?;
    if !question.offers(choice) {
      return Err(QuizError::InvalidTransition(format!(
        "'{}' is not a choice for question {}",
        choice, index
      )));
    }

    self.answers[index] = Some(choice.to_string());
    Ok(self.phase())
  }

  /// Unselect question `index`.
  pub fn clear_answer(&mut self, index: usize) -> Result<Phase> {
    self.ensure_open()?;
    if index >= self.answers.len() {
      return Err(self.out_of_range(index));
    }

    self.answers[index] = None;
    Ok(self.phase())
  }

  /// Grade the quiz and record the round in the session statistics.
  pub fn submit(&mut self) -> Result<GradeResult> {
    self.ensure_open()?;
    let unanswered = self.answers.iter().filter(|a| a.is_none()).count();
    if unanswered > 0 {
      return Err(QuizError::InvalidTransition(format!(
        "{} of {} questions unanswered",
        unanswered,
        self.quiz.len()
      )));
    }

    let result = grade(&self.quiz, &self.answers);
    self.stats.record(&self.quiz, &self.answers);
    if let Some(mode) = self.mode {
      self.stats.record_attempt(mode, result.score, result.total);
    }
    self.submitted = true;
    self.last_grade = Some(result.clone());

    tracing::info!(
      "Graded quiz version {}: {}/{}",
      self.version,
      result.score,
      result.total
    );
    Ok(result)
  }

  /// Clear all answers and the submitted flag, keeping the quiz.
  pub fn reset_selection(&mut self) -> Result<()> {
    if self.quiz.is_empty() {
      return Err(QuizError::InvalidTransition("no quiz to reset".to_string()));
    }

    self.answers = vec![None; self.quiz.len()];
    self.submitted = false;
    self.last_grade = None;
    self.version += 1;
    tracing::debug!("Reset answers (version {})", self.version);
    Ok(())
  }

  /// Replace the graded quiz with one over `words` in the current mode.
  ///
  /// A `NoMatch` error leaves the state unchanged.
  pub fn retry_wrong<R: Rng + ?Sized>(
    &mut self,
    pool: &WordPool,
    words: &HashSet<String>,
    rng: &mut R,
  ) -> Result<()> {
    let mode = match (self.phase(), self.mode) {
      (Phase::Graded, Some(mode)) => mode,
      _ => {
        return Err(QuizError::InvalidTransition(
          "retry requires a graded quiz".to_string(),
        ));
      }
    };

    let quiz = build_quiz_from_words(pool, mode, words, rng)?;
    self.replace_quiz(mode, quiz);
    tracing::info!(
      "Retrying {} missed words (version {})",
      self.quiz.len(),
      self.version
    );
    Ok(())
  }

  /// [`Self::retry_wrong`] over the words missed in the last grading.
  pub fn retry_last_wrong<R: Rng + ?Sized>(&mut self, pool: &WordPool, rng: &mut R) -> Result<()> {
    let words: HashSet<String> = self
      .last_grade
      .as_ref()
      .map(|g| g.wrong_words().into_iter().collect())
      .unwrap_or_default();
    self.retry_wrong(pool, &words, rng)
  }

  pub fn mode(&self) -> Option<QuizMode> {
    self.mode
  }

  pub fn quiz(&self) -> &Quiz {
    &self.quiz
  }

  pub fn answers(&self) -> &[Option<String>] {
    &self.answers
  }

  pub fn answered_count(&self) -> usize {
    self.answers.iter().filter(|a| a.is_some()).count()
  }

  pub fn submitted(&self) -> bool {
    self.submitted
  }

  pub fn version(&self) -> u64 {
    self.version
  }

  pub fn last_grade(&self) -> Option<&GradeResult> {
    self.last_grade.as_ref()
  }

  pub fn stats(&self) -> &StatsTracker {
    &self.stats
  }

  pub fn stats_mut(&mut self) -> &mut StatsTracker {
    &mut self.stats
  }

  fn replace_quiz(&mut self, mode: QuizMode, quiz: Quiz) {
    self.mode = Some(mode);
    self.answers = vec![None; quiz.len()];
    self.quiz = quiz;
    self.submitted = false;
    self.last_grade = None;
    self.version += 1;
  }

  fn ensure_open(&self) -> Result<()> {
    match self.phase() {
      Phase::Idle => Err(QuizError::InvalidTransition("no quiz started".to_string())),
      Phase::Graded => Err(QuizError::InvalidTransition(
        "quiz already submitted".to_string(),
      )),
      _ => Ok(()),
    }
  }

  fn out_of_range(&self, index: usize) -> QuizError {
    QuizError::InvalidTransition(format!(
      "question index {} out of range (quiz has {})",
      index,
      self.quiz.len()
    ))
  }
}
