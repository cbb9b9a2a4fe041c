//! Application state shared by all handlers.

use std::sync::Arc;

use crate::content::WordPool;
use crate::session::SessionStore;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// Word list loaded at startup (read-only, shared by every session)
  pub pool: Arc<WordPool>,

  /// Per-session quiz state
  pub sessions: Arc<SessionStore>,

  /// Questions in a fresh quiz
  pub question_count: usize,
}

impl AppState {
  pub fn new(pool: WordPool, question_count: usize) -> Self {
    Self {
      pool: Arc::new(pool),
      sessions: Arc::new(SessionStore::new()),
      question_count,
    }
  }
}
