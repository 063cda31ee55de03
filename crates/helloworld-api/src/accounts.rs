//! Registration, login, and the role-gated dashboard landings.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/auth/register` | 201 `{token, user}` |
//! | `POST` | `/api/auth/login` | 200 `{token, user}` |
//! | `GET`  | `/dashboard/teacher` | teacher only |
//! | `GET`  | `/dashboard/student` | student only |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  store::PlatformStore,
  user::{NewUser, Role, User},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{
  AppState,
  auth::{self, Student, Teacher},
  error::{ApiError, ApiJson},
};

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:     String,
  pub email:    String,
  pub password: String,
  pub role:     String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

/// The slice of an account embedded in auth responses. Everything else on
/// [`User`] stays server-side until the client asks for progress.
#[derive(Debug, Serialize)]
pub struct UserSummary {
  pub id:    Uuid,
  pub name:  String,
  pub email: String,
  pub role:  Role,
}

impl From<&User> for UserSummary {
  fn from(user: &User) -> Self {
    UserSummary {
      id:    user.id,
      name:  user.name.clone(),
      email: user.email.clone(),
      role:  user.role,
    }
  }
}

// ─── Register ─────────────────────────────────────────────────────────────────

/// `POST /api/auth/register`
///
/// The role is parsed against the closed [`Role`] enum before anything is
/// stored; there is no way to register as anything but a student or teacher.
pub async fn register<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  let name = body.name.trim();
  let email = body.email.trim();
  if name.is_empty() || email.is_empty() || body.password.is_empty() {
    return Err(ApiError::BadRequest("All fields are required".into()));
  }
  let role: Role = body
    .role
    .parse()
    .map_err(|_| ApiError::BadRequest("Invalid role".into()))?;

  let existing = state
    .store
    .find_user_by_email(email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if existing.is_some() {
    return Err(ApiError::BadRequest("User already exists".into()));
  }

  let password_hash = auth::hash_password(&body.password)?;
  let user = state
    .store
    .add_user(NewUser {
      name: name.to_string(),
      email: email.to_string(),
      password_hash,
      role,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let token = auth::issue_token(&state.auth, user.id, user.role)?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "token": token, "user": UserSummary::from(&user) })),
  ))
}

// ─── Login ────────────────────────────────────────────────────────────────────

/// `POST /api/auth/login`
///
/// Unknown email and wrong password answer identically, so the endpoint
/// cannot be used to probe which addresses are registered.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<LoginBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let user = state
    .store
    .find_user_by_email(body.email.trim())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".into()))?;

  if !auth::verify_password(&body.password, &user.password_hash) {
    return Err(ApiError::Unauthorized("Invalid credentials".into()));
  }

  let token = auth::issue_token(&state.auth, user.id, user.role)?;
  Ok(Json(json!({ "token": token, "user": UserSummary::from(&user) })))
}

// ─── Dashboards ───────────────────────────────────────────────────────────────

/// `GET /dashboard/teacher`
pub async fn teacher_dashboard(
  Teacher(user): Teacher,
) -> Json<serde_json::Value> {
  Json(json!({
    "message": "Welcome to Teacher Dashboard",
    "user": { "id": user.id, "role": user.role },
  }))
}

/// `GET /dashboard/student`
pub async fn student_dashboard(
  Student(user): Student,
) -> Json<serde_json::Value> {
  Json(json!({
    "message": "Welcome to Student Dashboard",
    "user": { "id": user.id, "role": user.role },
  }))
}
