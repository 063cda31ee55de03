//! Teacher-authored quiz management.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/tquiz` | teacher only |
//! | `GET`  | `/api/tquiz` | teacher's own quizzes |
//! | `GET`  | `/api/tquiz/class/{classId}` | any signed-in user |
//! | `GET`  | `/api/tquiz/{id}` | any signed-in user |
//! | `DELETE` | `/api/tquiz/{id}` | owning teacher only |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  quiz::{Difficulty, NewTeacherQuiz, Question, TeacherQuiz},
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

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizBody {
  pub class_id:   Option<Uuid>,
  #[serde(rename = "quizTitle")]
  pub title:      String,
  pub country:    String,
  #[serde(default)]
  pub difficulty: Difficulty,
  #[serde(default)]
  pub questions:  Vec<Question>,
}

/// `POST /api/tquiz`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Teacher(user): Teacher,
  ApiJson(body): ApiJson<CreateQuizBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  let title = body.title.trim();
  let country = body.country.trim();
  if title.is_empty() || country.is_empty() {
    return Err(ApiError::BadRequest(
      "Quiz title and country are required".into(),
    ));
  }

  let quiz = state
    .store
    .create_quiz(NewTeacherQuiz {
      teacher_id: user.id,
      class_id:   body.class_id,
      title:      title.to_string(),
      country:    country.to_string(),
      difficulty: body.difficulty,
      questions:  body.questions,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Quiz created successfully!", "quiz": quiz })),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/tquiz` — the calling teacher's quizzes.
pub async fn for_teacher<S>(
  State(state): State<AppState<S>>,
  Teacher(user): Teacher,
) -> Result<Json<Vec<TeacherQuiz>>, ApiError>
where
  S: PlatformStore,
{
  let quizzes = state
    .store
    .quizzes_by_teacher(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(quizzes))
}

/// `GET /api/tquiz/class/{classId}` — quizzes pinned to a class, visible to
/// students and teachers alike.
pub async fn for_class<S>(
  State(state): State<AppState<S>>,
  _user: AuthedUser,
  ApiPath(class_id): ApiPath<Uuid>,
) -> Result<Json<Vec<TeacherQuiz>>, ApiError>
where
  S: PlatformStore,
{
  let quizzes = state
    .store
    .quizzes_by_class(class_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(quizzes))
}

/// `GET /api/tquiz/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  _user: AuthedUser,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<TeacherQuiz>, ApiError>
where
  S: PlatformStore,
{
  let quiz = state
    .store
    .get_quiz(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Quiz not found".into()))?;
  Ok(Json(quiz))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/tquiz/{id}` — owning teacher only.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Teacher(user): Teacher,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let quiz = state
    .store
    .get_quiz(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Quiz not found".into()))?;
  if quiz.teacher_id != user.id {
    return Err(ApiError::Forbidden("Access denied".into()));
  }

  state
    .store
    .delete_quiz(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "message": "Quiz deleted successfully" })))
}
