//! Answer grading.

use serde::Serialize;

use crate::domain::Question;

/// A missed question, with enough context to review it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrongEntry {
  /// Zero-based question index
  pub position: usize,
  pub prompt: String,
  /// None if the question was left unanswered
  pub picked: Option<String>,
  pub correct: String,
  pub jp_word: String,
  pub reading: String,
  pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeResult {
  pub score: usize,
  pub total: usize,
  pub wrong: Vec<WrongEntry>,
}

impl GradeResult {
  pub fn is_perfect(&self) -> bool {
    self.wrong.is_empty()
  }

  /// Distinct missed words, in question order
  pub fn wrong_words(&self) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for entry in &self.wrong {
      if !words.contains(&entry.jp_word) {
        words.push(entry.jp_word.clone());
      }
    }
    words
  }
}

/// Compare each answer with its question's correct text.
///
/// Missing or unanswered slots count as wrong.
pub fn grade(quiz: &[Question], answers: &[Option<String>]) -> GradeResult {
  let mut score = 0;
  let mut wrong = Vec::new();

  for (position, question) in quiz.iter().enumerate() {
    let picked = answers.get(position).cloned().flatten();
    match picked {
      Some(ref choice) if question.is_correct(choice) => score += 1,
      _ => wrong.push(WrongEntry {
        position,
        prompt: question.prompt.clone(),
        picked,
        correct: question.correct_text.clone(),
        jp_word: question.jp_word.clone(),
        reading: question.reading.clone(),
        meaning: question.meaning.clone(),
      }),
    }
  }

  GradeResult {
    score,
    total: quiz.len(),
    wrong,
  }
}
