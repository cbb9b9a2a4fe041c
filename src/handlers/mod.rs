pub mod quiz;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub use quiz::{
  answer_question, create_session, delete_session, get_session, get_stats, pool_summary,
  reset_selection, reset_stats, retry_wrong, start_quiz, submit_quiz, ApiError, MissedWordView,
  QuestionView, SessionView, StatsView,
};

/// All API routes, bound to `state`
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/pool", get(pool_summary))
    .route("/api/sessions", post(create_session))
    .route(
      "/api/sessions/{session_id}",
      get(get_session).delete(delete_session),
    )
    .route("/api/sessions/{session_id}/start", post(start_quiz))
    .route("/api/sessions/{session_id}/answer", post(answer_question))
    .route("/api/sessions/{session_id}/submit", post(submit_quiz))
    .route("/api/sessions/{session_id}/reset", post(reset_selection))
    .route("/api/sessions/{session_id}/retry", post(retry_wrong))
    .route(
      "/api/sessions/{session_id}/stats",
      get(get_stats).delete(reset_stats),
    )
    .with_state(state)
}
