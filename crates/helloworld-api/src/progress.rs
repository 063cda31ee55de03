//! Student progress: the snapshot, the merge-patch, and the class report.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/student/progress` | student only |
//! | `PUT`  | `/api/student/progress` | whitelisted merge-patch |
//! | `GET`  | `/api/progress/class/{classId}` | teacher only |

use axum::{Json, extract::State};
use helloworld_core::{
  progress::{ProgressPatch, ProgressView},
  store::PlatformStore,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
  AppState,
  auth::{Student, Teacher},
  error::{ApiError, ApiJson, ApiPath},
};

/// `GET /api/student/progress`
pub async fn get_own<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
) -> Result<Json<ProgressView>, ApiError>
where
  S: PlatformStore,
{
  let account = state
    .store
    .get_user(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
  Ok(Json(ProgressView::from(&account)))
}

/// `PUT /api/student/progress`
///
/// The patch type is a closed field list (`deny_unknown_fields`), so a body
/// naming `email`, `role`, or anything else off the whitelist never reaches
/// the store — it dies in deserialisation as a 400.
pub async fn update_own<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
  ApiJson(patch): ApiJson<ProgressPatch>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let account = state
    .store
    .update_progress(user.id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
  Ok(Json(json!({
    "message": "Progress updated",
    "progress": ProgressView::from(&account),
  })))
}

/// `GET /api/progress/class/{classId}`
///
/// Every enrolled student appears, active or not, ordered like the
/// leaderboard. An unknown class id reports an empty leaderboard rather
/// than a 404, matching the listing endpoints.
pub async fn class<S>(
  State(state): State<AppState<S>>,
  Teacher(_): Teacher,
  ApiPath(class_id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let rows = state
    .store
    .class_progress(class_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "classId": class_id, "leaderboard": rows })))
}
