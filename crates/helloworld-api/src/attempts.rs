//! Quiz submissions, history, and the global leaderboard.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/quiz/submit` | student only; credits XP |
//! | `GET`  | `/api/quiz/history` | student only, newest first |
//! | `GET`  | `/api/quiz/leaderboard` | any signed-in user, top 10 |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  progress::LeaderboardEntry, quiz::QuizAttempt, store::PlatformStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  auth::{AuthedUser, Student},
  error::{ApiError, ApiJson},
};

const LEADERBOARD_SIZE: usize = 10;

// ─── Submit ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitQuizBody {
  pub country: String,
  pub score:   i64,
  pub total:   i64,
}

/// `POST /api/quiz/submit`
///
/// Besides recording the attempt this credits the student: XP grows by the
/// raw score, `quizzesAttempted` by one, and the country joins the explored
/// list.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
  ApiJson(body): ApiJson<SubmitQuizBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  let country = body.country.trim();
  if country.is_empty() {
    return Err(ApiError::BadRequest("Country is required".into()));
  }
  if body.score < 0 || body.total < 1 {
    return Err(ApiError::BadRequest("Invalid quiz score".into()));
  }

  let attempt = state
    .store
    .submit_quiz_attempt(user.id, country.to_string(), body.score, body.total)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Quiz submitted", "attempt": attempt })),
  ))
}

// ─── History ──────────────────────────────────────────────────────────────────

/// `GET /api/quiz/history`
pub async fn history<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
) -> Result<Json<Vec<QuizAttempt>>, ApiError>
where
  S: PlatformStore,
{
  let attempts = state
    .store
    .quiz_history(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(attempts))
}

// ─── Leaderboard ──────────────────────────────────────────────────────────────

/// `GET /api/quiz/leaderboard` — top students by XP. Ties rank the older
/// account first, so the ordering is stable across requests.
pub async fn leaderboard<S>(
  State(state): State<AppState<S>>,
  _user: AuthedUser,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError>
where
  S: PlatformStore,
{
  let entries = state
    .store
    .leaderboard(LEADERBOARD_SIZE)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entries))
}
