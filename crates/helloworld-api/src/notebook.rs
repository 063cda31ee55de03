//! The student notebook: saved phrases and translations.
//!
//! Every route is owner-scoped: a student only ever sees or deletes their
//! own notes, keyed off the token rather than anything in the request.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/notebook` | student only |
//! | `GET`  | `/api/notebook` | student only, newest first |
//! | `DELETE` | `/api/notebook/{noteId}` | student only |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  notebook::{NewNote, Note},
  store::PlatformStore,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
  AppState,
  auth::Student,
  error::{ApiError, ApiJson, ApiPath},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteBody {
  pub phrase:      String,
  pub translation: Option<String>,
  /// Defaults to `"AI Chat"` when omitted.
  pub note_type:   Option<String>,
}

/// `POST /api/notebook`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
  ApiJson(body): ApiJson<CreateNoteBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  let phrase = body.phrase.trim();
  if phrase.is_empty() {
    return Err(ApiError::BadRequest("Phrase is required".into()));
  }

  let note = state
    .store
    .add_note(NewNote {
      student_id:  user.id,
      phrase:      phrase.to_string(),
      translation: body.translation,
      note_type:   body.note_type,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Note saved", "note": note })),
  ))
}

/// `GET /api/notebook`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
) -> Result<Json<Vec<Note>>, ApiError>
where
  S: PlatformStore,
{
  let notes = state
    .store
    .notes_for(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(notes))
}

/// `DELETE /api/notebook/{noteId}`
///
/// Someone else's note and a nonexistent note are indistinguishable here:
/// both are a 404.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
  ApiPath(note_id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let deleted = state
    .store
    .delete_note(note_id, user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound("Note not found".into()));
  }
  Ok(Json(json!({ "message": "Note deleted" })))
}
