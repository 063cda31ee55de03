//! The badge catalog.
//!
//! CRUD here is deliberately unauthenticated: the catalog is seeded and
//! maintained by an admin frontend that predates the auth layer, and which
//! badges a student has *earned* lives on the user row, not here.
//!
//! | Method | Path |
//! |--------|------|
//! | `GET`  | `/api/badges` |
//! | `GET`  | `/api/badges/{id}` |
//! | `POST` | `/api/badges` |
//! | `PUT`  | `/api/badges/{id}` |
//! | `DELETE` | `/api/badges/{id}` |

use axum::{
  Json, extract::State, http::StatusCode, response::IntoResponse,
};
use helloworld_core::{
  badge::{Badge, BadgePatch, NewBadge},
  store::PlatformStore,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
  AppState,
  error::{ApiError, ApiJson, ApiPath},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBadgeBody {
  pub name:        String,
  pub description: Option<String>,
  pub icon:        Option<String>,
  pub criteria:    Option<String>,
  /// Defaults to 50 when omitted.
  pub xp_reward:   Option<i64>,
}

/// `GET /api/badges`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Badge>>, ApiError>
where
  S: PlatformStore,
{
  let badges = state
    .store
    .all_badges()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(badges))
}

/// `GET /api/badges/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Badge>, ApiError>
where
  S: PlatformStore,
{
  let badge = state
    .store
    .get_badge(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Badge not found".into()))?;
  Ok(Json(badge))
}

/// `POST /api/badges`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<CreateBadgeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PlatformStore,
{
  let name = body.name.trim();
  if name.is_empty() {
    return Err(ApiError::BadRequest("Badge name is required".into()));
  }

  let badge = state
    .store
    .create_badge(NewBadge {
      name:        name.to_string(),
      description: body.description,
      icon:        body.icon,
      criteria:    body.criteria,
      xp_reward:   body.xp_reward,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Badge created successfully", "badge": badge })),
  ))
}

/// `PUT /api/badges/{id}` — merge-patch; absent fields keep their values.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
  ApiJson(patch): ApiJson<BadgePatch>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let badge = state
    .store
    .update_badge(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Badge not found".into()))?;
  Ok(Json(json!({
    "message": "Badge updated successfully",
    "badge": badge,
  })))
}

/// `DELETE /api/badges/{id}`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let deleted = state
    .store
    .delete_badge(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound("Badge not found".into()));
  }
  Ok(Json(json!({ "message": "Badge deleted successfully" })))
}
