//! Multiple-choice question construction.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::config;
use crate::content::WordPool;
use crate::domain::{Question, QuestionKind, WordEntry};
use crate::error::{QuizError, Result};

/// Build a question for `target`, picking reading or meaning at random.
///
/// Distractors come from `candidates` entries sharing the target's part of
/// speech.
pub fn build_question<R: Rng + ?Sized>(
  target: &WordEntry,
  candidates: &WordPool,
  rng: &mut R,
) -> Result<Question> {
  let kind = if rng.random_bool(0.5) {
    QuestionKind::Reading
  } else {
    QuestionKind::Meaning
  };
  build_question_of_kind(target, candidates, kind, rng)
}

/// Build a question of a fixed kind.
pub fn build_question_of_kind<R: Rng + ?Sized>(
  target: &WordEntry,
  candidates: &WordPool,
  kind: QuestionKind,
  rng: &mut R,
) -> Result<Question> {
  let correct = kind.value_of(target);

  let mut values: Vec<&str> = candidates
    .iter()
    .filter(|c| c.pos == target.pos)
    .map(|c| kind.value_of(c))
    .filter(|v| *v != correct && !v.trim().is_empty())
    .collect();
  values.sort_unstable();
  values.dedup();

  if values.len() < config::DISTRACTOR_COUNT {
    tracing::warn!(
      "Only {} {} distractors for {} in {}",
      values.len(),
      kind,
      target.jp_word,
      target.pos
    );
    return Err(QuizError::InsufficientDistractors {
      category: target.pos.clone(),
      kind,
      word: target.jp_word.clone(),
    });
  }

  let mut choices: Vec<String> = values
    .choose_multiple(rng, config::DISTRACTOR_COUNT)
    .map(|v| v.to_string())
    .collect();
  choices.push(correct.to_string());
  choices.shuffle(rng);

  Ok(Question {
    kind,
    prompt: kind.prompt_for(&target.jp_word),
    choices,
    correct_text: correct.to_string(),
    jp_word: target.jp_word.clone(),
    reading: target.reading.clone(),
    meaning: target.meaning.clone(),
    pos: target.pos.clone(),
  })
}
