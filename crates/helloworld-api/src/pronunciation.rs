//! Pronunciation practice: record client-scored attempts and award XP.
//!
//! Scoring itself happens on the client (or wherever the frontend sends
//! audio); this API only accepts the resulting accuracy percentage.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/pronunciation/submit` | student only; accuracy 0–100 |
//! | `GET`  | `/api/pronunciation/history` | student only, newest first |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  progress::{PronunciationRecord, pronunciation_xp},
  store::PlatformStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  auth::Student,
  error::{ApiError, ApiJson},
};

#[derive(Debug, Deserialize)]
pub struct SubmitPronunciationBody {
  pub phrase:   String,
  pub accuracy: i64,
}

/// `POST /api/pronunciation/submit`
///
/// Awards `round(accuracy / 10)` XP; the response echoes the amount so the
/// client can animate it without re-deriving the rule.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
  ApiJson(body): ApiJson<SubmitPronunciationBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  let phrase = body.phrase.trim();
  if phrase.is_empty() {
    return Err(ApiError::BadRequest("Phrase is required".into()));
  }
  if !(0..=100).contains(&body.accuracy) {
    return Err(ApiError::BadRequest(
      "Accuracy must be between 0 and 100".into(),
    ));
  }

  let record = state
    .store
    .submit_pronunciation(user.id, phrase.to_string(), body.accuracy)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Pronunciation recorded",
      "pronunciation": record,
      "xpAwarded": pronunciation_xp(body.accuracy),
    })),
  ))
}

/// `GET /api/pronunciation/history`
pub async fn history<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
) -> Result<Json<Vec<PronunciationRecord>>, ApiError>
where
  S: PlatformStore,
{
  let records = state
    .store
    .pronunciation_history(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}
