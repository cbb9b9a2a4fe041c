//! In-memory session storage for quiz sessions.
//!
//! Stores SessionState keyed by an explicit session ID supplied by the
//! caller. Sessions auto-expire after a configurable duration of inactivity.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config;
use crate::quiz::SessionState;

/// Session entry with last access time for expiration
struct SessionEntry {
  session: SessionState,
  last_access: DateTime<Utc>,
}

/// Session map shared by all request handlers.
///
/// Each session is only ever mutated under the store lock, so one session
/// has one writer at a time.
#[derive(Default)]
pub struct SessionStore {
  sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run `f` against the session for `session_id`, creating it if needed
  pub fn with_session<T>(&self, session_id: &str, f: impl FnOnce(&mut SessionState) -> T) -> T {
    let mut sessions = self.lock();

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions, Utc::now());
    }

    let entry = sessions
      .entry(session_id.to_string())
      .or_insert_with(|| {
        tracing::debug!("Creating session {}", session_id);
        SessionEntry {
          session: SessionState::new(),
          last_access: Utc::now(),
        }
      });
    entry.last_access = Utc::now();
    f(&mut entry.session)
  }

  /// Create an empty session and return its ID
  pub fn create(&self) -> String {
    let session_id = generate_session_id();
    self.with_session(&session_id, |_| ());
    session_id
  }

  pub fn remove(&self, session_id: &str) -> bool {
    self.lock().remove(session_id).is_some()
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Drop sessions idle since before `now - SESSION_EXPIRY_HOURS`
  pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
    let mut sessions = self.lock();
    let before = sessions.len();
    cleanup_expired(&mut sessions, now);
    before - sessions.len()
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
    self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>, now: DateTime<Utc>) {
  let expiry = now - Duration::hours(config::SESSION_EXPIRY_HOURS);
  sessions.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  let mut rng = rand::rng();
  (0..config::SESSION_ID_LEN)
    .map(|_| {
      let idx = rng.random_range(0..36u8);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuizMode;
  use crate::testing::sample_pool;

  #[test]
  fn test_session_id_format() {
    let id = generate_session_id();
    assert_eq!(id.len(), config::SESSION_ID_LEN);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_ne!(id, generate_session_id());
  }

  #[test]
  fn test_sessions_are_independent() {
    let store = SessionStore::new();
    let pool = sample_pool();

    store.with_session("alice", |s| {
      s.start(&pool, QuizMode::Mixed, 10, &mut rand::rng()).unwrap();
    });

    let alice_version = store.with_session("alice", |s| s.version());
    let bob_version = store.with_session("bob", |s| s.version());
    assert_eq!(alice_version, 1);
    assert_eq!(bob_version, 0);
    assert_eq!(store.len(), 2);
  }

  #[test]
  fn test_state_persists_between_calls() {
    let store = SessionStore::new();
    let pool = sample_pool();
    let id = store.create();
    assert_eq!(store.len(), 1);

    store.with_session(&id, |s| {
      s.start(&pool, QuizMode::IAdjective, 4, &mut rand::rng()).unwrap()
    });
    let len = store.with_session(&id, |s| s.quiz().len());
    assert_eq!(len, 4);
  }

  #[test]
  fn test_purge_expired() {
    let store = SessionStore::new();
    store.with_session("old", |_| ());

    let later = Utc::now() + Duration::hours(config::SESSION_EXPIRY_HOURS + 1);
    assert_eq!(store.purge_expired(later), 1);
    assert!(store.is_empty());
  }

  #[test]
  fn test_remove() {
    let store = SessionStore::new();
    store.with_session("gone", |_| ());
    assert!(store.remove("gone"));
    assert!(!store.remove("gone"));
  }
}
