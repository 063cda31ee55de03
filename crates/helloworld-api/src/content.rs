//! Teacher-published content: facts, challenges, and resources.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/tcontent` | teacher only |
//! | `GET`  | `/api/tcontent` | any signed-in user, newest first |
//! | `GET`  | `/api/tcontent/teacher` | teacher's own items |
//! | `DELETE` | `/api/tcontent/{id}` | owning teacher only |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  content::{ContentKind, NewTeacherContent, TeacherContent},
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

#[derive(Debug, Deserialize)]
pub struct CreateContentBody {
  pub title: String,
  #[serde(rename = "type")]
  pub kind:  ContentKind,
  #[serde(rename = "content")]
  pub body:  String,
}

/// `POST /api/tcontent`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Teacher(user): Teacher,
  ApiJson(body): ApiJson<CreateContentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  let title = body.title.trim();
  if title.is_empty() || body.body.trim().is_empty() {
    return Err(ApiError::BadRequest("Title and content are required".into()));
  }

  let content = state
    .store
    .add_content(NewTeacherContent {
      teacher_id: user.id,
      title:      title.to_string(),
      kind:       body.kind,
      body:       body.body,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Content uploaded successfully!",
      "content": content,
    })),
  ))
}

/// `GET /api/tcontent` — everything published, for the student dashboard.
pub async fn list_all<S>(
  State(state): State<AppState<S>>,
  _user: AuthedUser,
) -> Result<Json<Vec<TeacherContent>>, ApiError>
where
  S: PlatformStore,
{
  let contents = state
    .store
    .all_content()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(contents))
}

/// `GET /api/tcontent/teacher` — the calling teacher's own items.
pub async fn for_teacher<S>(
  State(state): State<AppState<S>>,
  Teacher(user): Teacher,
) -> Result<Json<Vec<TeacherContent>>, ApiError>
where
  S: PlatformStore,
{
  let contents = state
    .store
    .content_by_teacher(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(contents))
}

/// `DELETE /api/tcontent/{id}` — owning teacher only.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Teacher(user): Teacher,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let content = state
    .store
    .get_content(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Content not found".into()))?;
  if content.teacher_id != user.id {
    return Err(ApiError::Forbidden("Access denied".into()));
  }

  state
    .store
    .delete_content(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "message": "Content deleted successfully" })))
}
