//! Quiz session endpoints.
//!
//! Each endpoint applies exactly one state transition to the session named in
//! the path and returns the resulting view.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::content::PoolSummary;
use crate::domain::{QuestionKind, QuizMode};
use crate::error::QuizError;
use crate::quiz::{AttemptRecord, GradeResult, MissedWord, Phase, SessionState};
use crate::state::AppState;

// ============================================================================
// Errors
// ============================================================================

/// QuizError rendered as a JSON error response
#[derive(Debug)]
pub struct ApiError(pub QuizError);

impl From<QuizError> for ApiError {
  fn from(err: QuizError) -> Self {
    Self(err)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      QuizError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
      QuizError::InsufficientPool { .. } | QuizError::InsufficientDistractors { .. } => {
        StatusCode::UNPROCESSABLE_ENTITY
      }
      QuizError::NoMatch { .. } | QuizError::InvalidTransition(_) => StatusCode::CONFLICT,
    };

    if status.is_server_error() {
      tracing::error!("{}", self.0);
    } else {
      tracing::warn!("Rejected request: {}", self.0);
    }

    (
      status,
      Json(serde_json::json!({ "error": self.0.user_message() })),
    )
      .into_response()
  }
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Serialize)]
pub struct QuestionView {
  pub index: usize,
  pub kind: QuestionKind,
  pub prompt: String,
  pub choices: Vec<String>,
  pub selected: Option<String>,
  /// Only present once the quiz is graded
  #[serde(skip_serializing_if = "Option::is_none")]
  pub correct: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub correct_index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
  pub session_id: String,
  pub version: u64,
  pub phase: Phase,
  pub mode: Option<QuizMode>,
  pub submitted: bool,
  pub answered: usize,
  pub total: usize,
  pub questions: Vec<QuestionView>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub result: Option<GradeResult>,
}

impl SessionView {
  pub fn from_state(session_id: &str, state: &SessionState) -> Self {
    let graded = state.submitted();
    let questions = state
      .quiz()
      .iter()
      .zip(state.answers())
      .enumerate()
      .map(|(index, (question, selected))| QuestionView {
        index,
        kind: question.kind,
        prompt: question.prompt.clone(),
        choices: question.choices.clone(),
        selected: selected.clone(),
        correct: graded.then(|| question.correct_text.clone()),
        correct_index: question.correct_index().filter(|_| graded),
      })
      .collect();

    Self {
      session_id: session_id.to_string(),
      version: state.version(),
      phase: state.phase(),
      mode: state.mode(),
      submitted: graded,
      answered: state.answered_count(),
      total: state.quiz().len(),
      questions,
      result: state.last_grade().cloned(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct MissedWordView {
  pub word: String,
  pub misses: u32,
  pub exposures: u32,
  pub miss_rate: f64,
}

impl From<MissedWord> for MissedWordView {
  fn from(missed: MissedWord) -> Self {
    let miss_rate = missed.miss_rate();
    Self {
      word: missed.word,
      misses: missed.misses,
      exposures: missed.exposures,
      miss_rate,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct StatsView {
  pub accuracy: f64,
  pub attempts: Vec<AttemptRecord>,
  pub top_missed: Vec<MissedWordView>,
}

impl StatsView {
  fn from_state(state: &SessionState, top: usize) -> Self {
    let stats = state.stats();
    Self {
      accuracy: stats.accuracy(),
      attempts: stats.history().to_vec(),
      top_missed: stats.top_missed(top).into_iter().map(Into::into).collect(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CreatedSession {
  pub session_id: String,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartRequest {
  pub mode: QuizMode,
  /// Overrides the configured quiz length
  #[serde(default)]
  pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
  pub index: usize,
  /// None clears the selection
  pub choice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
  pub top: Option<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/sessions
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
  let session_id = state.sessions.create();
  (StatusCode::CREATED, Json(CreatedSession { session_id }))
}

/// GET /api/sessions/{session_id}
pub async fn get_session(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
) -> Json<SessionView> {
  let view = state
    .sessions
    .with_session(&session_id, |s| SessionView::from_state(&session_id, s));
  Json(view)
}

/// DELETE /api/sessions/{session_id}
pub async fn delete_session(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
) -> StatusCode {
  if state.sessions.remove(&session_id) {
    tracing::info!("Deleted session {}", session_id);
    StatusCode::NO_CONTENT
  } else {
    StatusCode::NOT_FOUND
  }
}

/// POST /api/sessions/{session_id}/start
pub async fn start_quiz(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
  Json(request): Json<StartRequest>,
) -> Result<Json<SessionView>, ApiError> {
  let count = request.count.unwrap_or(state.question_count);
  let view = state.sessions.with_session(&session_id, |s| {
    s.start(&state.pool, request.mode, count, &mut rand::rng())?;
    Ok::<_, QuizError>(SessionView::from_state(&session_id, s))
  })?;
  Ok(Json(view))
}

/// POST /api/sessions/{session_id}/answer
pub async fn answer_question(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
  Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionView>, ApiError> {
  let view = state.sessions.with_session(&session_id, |s| {
    match &request.choice {
      Some(choice) => s.answer(request.index, choice)?,
      None => s.clear_answer(request.index)?,
    };
    Ok::<_, QuizError>(SessionView::from_state(&session_id, s))
  })?;
  Ok(Json(view))
}

/// POST /api/sessions/{session_id}/submit
pub async fn submit_quiz(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
  let view = state.sessions.with_session(&session_id, |s| {
    s.submit()?;
    Ok::<_, QuizError>(SessionView::from_state(&session_id, s))
  })?;
  Ok(Json(view))
}

/// POST /api/sessions/{session_id}/reset
pub async fn reset_selection(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
  let view = state.sessions.with_session(&session_id, |s| {
    s.reset_selection()?;
    Ok::<_, QuizError>(SessionView::from_state(&session_id, s))
  })?;
  Ok(Json(view))
}

/// POST /api/sessions/{session_id}/retry
pub async fn retry_wrong(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
  let view = state.sessions.with_session(&session_id, |s| {
    s.retry_last_wrong(&state.pool, &mut rand::rng())?;
    Ok::<_, QuizError>(SessionView::from_state(&session_id, s))
  })?;
  Ok(Json(view))
}

/// GET /api/sessions/{session_id}/stats?top=N
pub async fn get_stats(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
  Query(query): Query<StatsQuery>,
) -> Json<StatsView> {
  let top = query.top.unwrap_or(config::DEFAULT_TOP_MISSED);
  let view = state
    .sessions
    .with_session(&session_id, |s| StatsView::from_state(s, top));
  Json(view)
}

/// DELETE /api/sessions/{session_id}/stats
pub async fn reset_stats(
  State(state): State<AppState>,
  Path(session_id): Path<String>,
) -> Json<StatsView> {
  let view = state.sessions.with_session(&session_id, |s| {
    s.stats_mut().reset();
    tracing::info!("Cleared statistics for session {}", session_id);
    StatsView::from_state(s, config::DEFAULT_TOP_MISSED)
  });
  Json(view)
}

/// GET /api/pool
pub async fn pool_summary(State(state): State<AppState>) -> Json<PoolSummary> {
  Json(state.pool.summary())
}
