//! Teacher/student direct messages.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/chat` | any signed-in user; sender from token |
//! | `GET`  | `/api/chat/{id}/{studentId}` | oldest first |
//! | `PUT`  | `/api/chat/read` | marks a sender's messages to the caller read |
//! | `DELETE` | `/api/chat/{id}` | teacher only |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  chat::{ChatMessage, MessageKind, NewChatMessage},
  store::PlatformStore,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
  AppState,
  auth::{AuthedUser, Teacher},
  error::{ApiError, ApiJson, ApiPath},
};

// ─── Send ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
  pub receiver_id: Uuid,
  #[serde(rename = "message")]
  pub body:        String,
  /// Defaults to `feedback` when omitted.
  #[serde(rename = "type", default)]
  pub kind:        MessageKind,
}

/// `POST /api/chat`
///
/// The sender is always the token holder; a client cannot write messages on
/// someone else's behalf. The receiver id is taken as given.
pub async fn send<S>(
  State(state): State<AppState<S>>,
  user: AuthedUser,
  ApiJson(body): ApiJson<SendMessageBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  if body.body.trim().is_empty() {
    return Err(ApiError::BadRequest("Message text is required".into()));
  }

  let chat = state
    .store
    .send_message(NewChatMessage {
      sender_id:   user.id,
      receiver_id: body.receiver_id,
      body:        body.body,
      kind:        body.kind,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Message sent", "chat": chat })),
  ))
}

// ─── Thread ───────────────────────────────────────────────────────────────────

/// `GET /api/chat/{id}/{studentId}` — the full conversation between a
/// teacher (the first segment) and a student, both directions, oldest
/// first.
pub async fn thread<S>(
  State(state): State<AppState<S>>,
  _user: AuthedUser,
  ApiPath((teacher_id, student_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<Vec<ChatMessage>>, ApiError>
where
  S: PlatformStore,
{
  let messages = state
    .store
    .thread(teacher_id, student_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(messages))
}

// ─── Mark read ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadBody {
  pub sender_id: Uuid,
}

/// `PUT /api/chat/read`
///
/// Flips every unread message from `senderId` to the caller. Calling it
/// with nothing unread still succeeds.
pub async fn mark_read<S>(
  State(state): State<AppState<S>>,
  user: AuthedUser,
  ApiJson(body): ApiJson<MarkReadBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  state
    .store
    .mark_read(user.id, body.sender_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "message": "Messages marked as read" })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/chat/{id}` — teacher-only moderation.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Teacher(_): Teacher,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let deleted = state
    .store
    .delete_message(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound("Message not found".into()));
  }
  Ok(Json(json!({ "message": "Message deleted" })))
}
