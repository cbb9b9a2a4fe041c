//! Shared fixtures for unit tests.

use crate::content::WordPool;
use crate::domain::{WordEntry, I_ADJ, NA_ADJ};

const I_ADJECTIVES: [(&str, &str, &str); 8] = [
  ("高い", "たかい", "high"),
  ("安い", "やすい", "cheap"),
  ("広い", "ひろい", "wide"),
  ("狭い", "せまい", "narrow"),
  ("暑い", "あつい", "hot"),
  ("寒い", "さむい", "cold"),
  ("長い", "ながい", "long"),
  ("短い", "みじかい", "short"),
];

const NA_ADJECTIVES: [(&str, &str, &str); 8] = [
  ("静か", "しずか", "quiet"),
  ("元気", "げんき", "healthy"),
  ("有名", "ゆうめい", "famous"),
  ("便利", "べんり", "convenient"),
  ("簡単", "かんたん", "easy"),
  ("大切", "たいせつ", "important"),
  ("親切", "しんせつ", "kind"),
  ("丁寧", "ていねい", "polite"),
];

/// Eight N4 words of each adjective kind.
pub fn sample_pool() -> WordPool {
  let mut entries = Vec::new();
  for (word, reading, meaning) in I_ADJECTIVES {
    entries.push(WordEntry::new(word, reading, meaning, "N4", I_ADJ));
  }
  for (word, reading, meaning) in NA_ADJECTIVES {
    entries.push(WordEntry::new(word, reading, meaning, "N4", NA_ADJ));
  }
  WordPool::from_entries(entries)
}

/// Build a pool from `(jp_word, reading, meaning, pos)` tuples at level N4.
pub fn pool_of(rows: &[(&str, &str, &str, &str)]) -> WordPool {
  WordPool::from_entries(
    rows
      .iter()
      .map(|(word, reading, meaning, pos)| WordEntry::new(word, reading, meaning, "N4", pos))
      .collect(),
  )
}
