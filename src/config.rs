//! Application configuration.
//!
//! Settings resolve per field with priority: config.toml > environment
//! (including .env) > built-in default.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Quiz Configuration ====================

/// Number of distractor choices per question (4 choices total)
pub const DISTRACTOR_COUNT: usize = 3;

/// Questions in a fresh quiz
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// JLPT level the word list is restricted to
pub const DEFAULT_LEVEL: &str = "N4";

/// Default word list location
pub const DEFAULT_DATASET_PATH: &str = "data/words_adj.csv";

/// Entries shown in the most-missed list when no count is given
pub const DEFAULT_TOP_MISSED: usize = 5;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

// ==================== Session Configuration ====================

/// Session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 12;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Length of generated session IDs
pub const SESSION_ID_LEN: usize = 32;

/// config.toml structure
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
  quiz: Option<QuizSection>,
  server: Option<ServerSection>,
}

#[derive(Debug, Default, Deserialize)]
struct QuizSection {
  dataset: Option<String>,
  level: Option<String>,
  question_count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
  bind_addr: Option<String>,
}

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub dataset_path: PathBuf,
  pub level: String,
  pub question_count: usize,
  pub bind_addr: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
      level: DEFAULT_LEVEL.to_string(),
      question_count: DEFAULT_QUESTION_COUNT,
      bind_addr: format!("{}:{}", SERVER_ADDR, SERVER_PORT),
    }
  }
}

impl Settings {
  /// Load settings from config.toml, the environment and defaults
  pub fn load() -> Self {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file = match std::fs::read_to_string(CONFIG_FILE) {
      Ok(contents) => match toml::from_str::<FileConfig>(&contents) {
        Ok(config) => {
          tracing::info!("Using settings from {}", CONFIG_FILE);
          config
        }
        Err(e) => {
          tracing::warn!("Ignoring malformed {}: {}", CONFIG_FILE, e);
          FileConfig::default()
        }
      },
      Err(_) => FileConfig::default(),
    };

    Self::resolve(file, |key| std::env::var(key).ok())
  }

  /// Settings from TOML text alone (no environment lookup)
  pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
    let file: FileConfig = toml::from_str(contents)?;
    Ok(Self::resolve(file, |_| None))
  }

  fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
    let defaults = Self::default();
    let quiz = file.quiz.unwrap_or_default();
    let server = file.server.unwrap_or_default();

    let dataset_path = quiz
      .dataset
      .or_else(|| env("QUIZ_DATASET"))
      .map(PathBuf::from)
      .unwrap_or(defaults.dataset_path);

    let level = quiz
      .level
      .or_else(|| env("QUIZ_LEVEL"))
      .unwrap_or(defaults.level);

    let question_count = quiz
      .question_count
      .or_else(|| {
        env("QUIZ_QUESTION_COUNT").and_then(|raw| match raw.parse() {
          Ok(n) => Some(n),
          Err(_) => {
            tracing::warn!("Ignoring invalid QUIZ_QUESTION_COUNT: {}", raw);
            None
          }
        })
      })
      .filter(|n| {
        if *n == 0 {
          tracing::warn!("Question count must be positive, using {}", DEFAULT_QUESTION_COUNT);
        }
        *n > 0
      })
      .unwrap_or(defaults.question_count);

    let bind_addr = server
      .bind_addr
      .or_else(|| env("QUIZ_BIND_ADDR"))
      .unwrap_or(defaults.bind_addr);

    Self {
      dataset_path,
      level,
      question_count,
      bind_addr,
    }
  }
}
