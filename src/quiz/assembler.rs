//! Quiz assembly: sampling target words per mode and building their questions.
//!
//! Every question's distractors come from the full category sub-pool of its
//! target, so mixed quizzes never offer a な-adjective among い-adjective
//! choices.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

use crate::content::WordPool;
use crate::domain::{QuizMode, Quiz, WordEntry};
use crate::error::{QuizError, Result};

use super::builder::build_question;

/// Sample `n` words for `mode` and build a question for each.
///
/// Mixed mode splits `n` across its categories (earlier categories take the
/// remainder) and shuffles the combined sample.
pub fn build_quiz<R: Rng + ?Sized>(
  pool: &WordPool,
  mode: QuizMode,
  n: usize,
  rng: &mut R,
) -> Result<Quiz> {
  if n == 0 {
    return Err(QuizError::InvalidTransition(
      "quiz length must be at least 1".to_string(),
    ));
  }

  let categories = mode.categories();
  let sub_pools: Vec<WordPool> = categories.iter().map(|pos| pool.with_pos(pos)).collect();
  let shares = split_evenly(n, categories.len());

  // Check every category before sampling anything
  for ((pos, sub_pool), &share) in categories.iter().zip(&sub_pools).zip(&shares) {
    if sub_pool.len() < share {
      tracing::warn!(
        "Cannot build {} quiz: {} has {} words, need {}",
        mode,
        pos,
        sub_pool.len(),
        share
      );
      return Err(QuizError::InsufficientPool {
        category: pos.to_string(),
        required: share,
        available: sub_pool.len(),
      });
    }
  }

  let mut targets: Vec<(&WordEntry, usize)> = Vec::with_capacity(n);
  for (idx, (sub_pool, &share)) in sub_pools.iter().zip(&shares).enumerate() {
    targets.extend(
      sub_pool
        .entries()
        .choose_multiple(rng, share)
        .map(|entry| (entry, idx)),
    );
  }
  targets.shuffle(rng);

  tracing::debug!("Building {} quiz with {} questions", mode, targets.len());
  build_all(&targets, &sub_pools, rng)
}

/// Build a quiz over exactly the entries of `mode` whose `jp_word` is in
/// `words`, in random order. Each word appears once.
pub fn build_quiz_from_words<R: Rng + ?Sized>(
  pool: &WordPool,
  mode: QuizMode,
  words: &HashSet<String>,
  rng: &mut R,
) -> Result<Quiz> {
  let categories = mode.categories();
  let sub_pools: Vec<WordPool> = categories.iter().map(|pos| pool.with_pos(pos)).collect();

  let mut seen: HashSet<&str> = HashSet::new();
  let mut targets: Vec<(&WordEntry, usize)> = Vec::new();
  for (idx, sub_pool) in sub_pools.iter().enumerate() {
    for entry in sub_pool.iter() {
      if words.contains(&entry.jp_word) && seen.insert(entry.jp_word.as_str()) {
        targets.push((entry, idx));
      }
    }
  }

  if targets.is_empty() {
    tracing::warn!("No retry words found in {} pool", mode);
    return Err(QuizError::NoMatch {
      mode: mode.to_string(),
    });
  }

  targets.shuffle(rng);

  tracing::debug!("Building {} retry quiz with {} questions", mode, targets.len());
  build_all(&targets, &sub_pools, rng)
}

/// Build every question or none
fn build_all<R: Rng + ?Sized>(
  targets: &[(&WordEntry, usize)],
  sub_pools: &[WordPool],
  rng: &mut R,
) -> Result<Quiz> {
  targets
    .iter()
    .map(|(entry, idx)| build_question(entry, &sub_pools[*idx], rng))
    .collect()
}

/// Split `n` into `parts` shares differing by at most one
fn split_evenly(n: usize, parts: usize) -> Vec<usize> {
  if parts == 0 {
    return Vec::new();
  }
  let base = n / parts;
  let extra = n % parts;
  (0..parts).map(|i| base + usize::from(i < extra)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{I_ADJ, NA_ADJ};
  use crate::testing::{pool_of, sample_pool};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn test_split_evenly() {
    assert_eq!(split_evenly(10, 2), vec![5, 5]);
    assert_eq!(split_evenly(7, 2), vec![4, 3]);
    assert_eq!(split_evenly(10, 1), vec![10]);
    assert_eq!(split_evenly(1, 2), vec![1, 0]);
  }

  #[test]
  fn test_single_category_quiz() {
    let pool = sample_pool();
    let mut rng = StdRng::seed_from_u64(42);

    let quiz = build_quiz(&pool, QuizMode::IAdjective, 6, &mut rng).unwrap();
    assert_eq!(quiz.len(), 6);
    assert!(quiz.iter().all(|q| q.pos == I_ADJ));

    let words: HashSet<&str> = quiz.iter().map(|q| q.jp_word.as_str()).collect();
    assert_eq!(words.len(), 6, "targets are sampled without replacement");
  }

  #[test]
  fn test_mixed_quiz_splits_categories_evenly() {
    let pool = sample_pool();
    for seed in 0..20 {
      let mut rng = StdRng::seed_from_u64(seed);
      let quiz = build_quiz(&pool, QuizMode::Mixed, 10, &mut rng).unwrap();

      assert_eq!(quiz.len(), 10);
      assert_eq!(quiz.iter().filter(|q| q.pos == I_ADJ).count(), 5);
      assert_eq!(quiz.iter().filter(|q| q.pos == NA_ADJ).count(), 5);
    }
  }

  #[test]
  fn test_mixed_quiz_order_varies_by_seed() {
    let pool = sample_pool();
    let orders: HashSet<Vec<String>> = (0..10)
      .map(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        build_quiz(&pool, QuizMode::Mixed, 10, &mut rng)
          .unwrap()
          .into_iter()
          .map(|q| q.pos)
          .collect()
      })
      .collect();
    assert!(orders.len() > 1);
  }

  #[test]
  fn test_mixed_quiz_distractors_stay_in_category() {
    let pool = sample_pool();
    let mut rng = StdRng::seed_from_u64(5);
    let quiz = build_quiz(&pool, QuizMode::Mixed, 10, &mut rng).unwrap();

    for q in &quiz {
      let allowed: HashSet<&str> = pool
        .iter()
        .filter(|e| e.pos == q.pos)
        .map(|e| q.kind.value_of(e))
        .collect();
      assert!(q.choices.iter().all(|c| allowed.contains(c.as_str())));
    }
  }

  #[test]
  fn test_insufficient_pool() {
    let pool = pool_of(&[
      ("静か", "しずか", "quiet", NA_ADJ),
      ("元気", "げんき", "healthy", NA_ADJ),
    ]);
    let mut rng = StdRng::seed_from_u64(0);

    match build_quiz(&pool, QuizMode::NaAdjective, 10, &mut rng) {
      Err(QuizError::InsufficientPool {
        category,
        required,
        available,
      }) => {
        assert_eq!(category, NA_ADJ);
        assert_eq!(required, 10);
        assert_eq!(available, 2);
      }
      other => panic!("expected InsufficientPool, got {:?}", other),
    }
  }

  #[test]
  fn test_mixed_quiz_fails_when_one_half_is_short() {
    let mut rows = vec![("静か", "しずか", "quiet", NA_ADJ)];
    rows.extend([
      ("高い", "たかい", "high", I_ADJ),
      ("安い", "やすい", "cheap", I_ADJ),
      ("広い", "ひろい", "wide", I_ADJ),
      ("狭い", "せまい", "narrow", I_ADJ),
      ("暑い", "あつい", "hot", I_ADJ),
    ]);
    let pool = pool_of(&rows);
    let mut rng = StdRng::seed_from_u64(0);

    let result = build_quiz(&pool, QuizMode::Mixed, 4, &mut rng);
    assert!(matches!(
      result,
      Err(QuizError::InsufficientPool { ref category, .. }) if category == NA_ADJ
    ));
  }

  #[test]
  fn test_zero_length_quiz_rejected() {
    let pool = sample_pool();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(build_quiz(&pool, QuizMode::Mixed, 0, &mut rng).is_err());
  }

  #[test]
  fn test_distractor_failure_aborts_whole_quiz() {
    // Enough na_adj targets, but only 3 distinct readings/meanings in total
    let pool = pool_of(&[
      ("静か", "しずか", "quiet", NA_ADJ),
      ("元気", "げんき", "healthy", NA_ADJ),
      ("有名", "ゆうめい", "famous", NA_ADJ),
    ]);
    let mut rng = StdRng::seed_from_u64(0);

    let result = build_quiz(&pool, QuizMode::NaAdjective, 3, &mut rng);
    assert!(matches!(result, Err(QuizError::InsufficientDistractors { .. })));
  }

  #[test]
  fn test_quiz_from_words_includes_each_word_once() {
    let pool = sample_pool();
    let words: HashSet<String> = ["高い", "静か", "便利"].iter().map(|w| w.to_string()).collect();
    let mut rng = StdRng::seed_from_u64(11);

    let quiz = build_quiz_from_words(&pool, QuizMode::Mixed, &words, &mut rng).unwrap();
    assert_eq!(quiz.len(), 3);
    let sourced: HashSet<String> = quiz.iter().map(|q| q.jp_word.clone()).collect();
    assert_eq!(sourced, words);
  }

  #[test]
  fn test_quiz_from_words_respects_mode() {
    let pool = sample_pool();
    let words: HashSet<String> = ["高い", "静か"].iter().map(|w| w.to_string()).collect();
    let mut rng = StdRng::seed_from_u64(11);

    let quiz = build_quiz_from_words(&pool, QuizMode::IAdjective, &words, &mut rng).unwrap();
    assert_eq!(quiz.len(), 1);
    assert_eq!(quiz[0].jp_word, "高い");
  }

  #[test]
  fn test_quiz_from_words_deduplicates_repeated_rows() {
    let mut rows: Vec<(&str, &str, &str, &str)> = vec![("高い", "たかい", "high", I_ADJ)];
    rows.extend([
      ("高い", "たかい", "high", I_ADJ),
      ("安い", "やすい", "cheap", I_ADJ),
      ("広い", "ひろい", "wide", I_ADJ),
      ("狭い", "せまい", "narrow", I_ADJ),
    ]);
    let pool = pool_of(&rows);
    let words: HashSet<String> = ["高い".to_string()].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(2);

    let quiz = build_quiz_from_words(&pool, QuizMode::IAdjective, &words, &mut rng).unwrap();
    assert_eq!(quiz.len(), 1);
  }

  #[test]
  fn test_quiz_from_words_no_match() {
    let pool = sample_pool();
    let words: HashSet<String> = ["静か".to_string()].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(0);

    let result = build_quiz_from_words(&pool, QuizMode::IAdjective, &words, &mut rng);
    assert!(matches!(result, Err(QuizError::NoMatch { .. })));

    let empty = HashSet::new();
    let result = build_quiz_from_words(&pool, QuizMode::Mixed, &empty, &mut rng);
    assert!(matches!(result, Err(QuizError::NoMatch { .. })));
  }
}
