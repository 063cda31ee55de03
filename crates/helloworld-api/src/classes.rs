//! Class management: creation with generated join codes, listing, joining,
//! and deletion.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/class/create` | teacher only |
//! | `GET`  | `/api/class/teacher/{teacherId}` | teacher only |
//! | `POST` | `/api/class/join` | student only, idempotent |
//! | `DELETE` | `/api/class/{classId}` | owning teacher only |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  classroom::{NewClass, TeacherClass},
  store::PlatformStore,
};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
  AppState,
  auth::{Student, Teacher},
  error::{ApiError, ApiJson, ApiPath},
};

/// Join codes skip 0/O/1/I so they survive being read off a whiteboard.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LEN: usize = 6;

fn generate_join_code() -> String {
  let mut rng = rand::thread_rng();
  (0..CODE_LEN)
    .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
    .collect()
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateClassBody {
  pub name: String,
}

/// `POST /api/class/create`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Teacher(user): Teacher,
  ApiJson(body): ApiJson<CreateClassBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  let name = body.name.trim();
  if name.is_empty() {
    return Err(ApiError::BadRequest("Class name is required".into()));
  }

  // 32^6 possible codes; collisions are rare but cheap to re-roll. A race
  // between the check and the insert still trips the store's unique
  // constraint, which is the backstop.
  let mut code = generate_join_code();
  while state
    .store
    .find_class_by_code(&code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some()
  {
    code = generate_join_code();
  }

  let class = state
    .store
    .create_class(NewClass {
      name: name.to_string(),
      code,
      teacher_id: user.id,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Class created", "class": class })),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/class/teacher/{teacherId}`
pub async fn for_teacher<S>(
  State(state): State<AppState<S>>,
  Teacher(_): Teacher,
  ApiPath(teacher_id): ApiPath<Uuid>,
) -> Result<Json<Vec<TeacherClass>>, ApiError>
where
  S: PlatformStore,
{
  let classes = state
    .store
    .classes_by_teacher(teacher_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(classes))
}

// ─── Join ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JoinBody {
  pub code: String,
}

/// `POST /api/class/join`
///
/// Joining a class twice succeeds with the same response; the enrollment is
/// not duplicated.
pub async fn join<S>(
  State(state): State<AppState<S>>,
  Student(user): Student,
  ApiJson(body): ApiJson<JoinBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let class = state
    .store
    .find_class_by_code(body.code.trim())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Invalid class code".into()))?;

  state
    .store
    .enroll_student(user.id, class.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(json!({ "message": "Joined class successfully", "class": class })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/class/{classId}`
///
/// Only the owning teacher may delete a class. Its enrollments go with it;
/// quizzes pinned to it stay.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Teacher(user): Teacher,
  ApiPath(class_id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let class = state
    .store
    .get_class(class_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Class not found".into()))?;
  if class.teacher_id != user.id {
    return Err(ApiError::Forbidden("Access denied".into()));
  }

  state
    .store
    .delete_class(class_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "message": "Class deleted" })))
}
