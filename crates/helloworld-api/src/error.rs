//! API error type, its HTTP mapping, and rejection-normalising extractors.
//!
//! Every handler error renders as `{"message": ...}` JSON so browser clients
//! can surface it directly. Store and other internal failures collapse to a
//! generic 500 body with the detail logged and echoed under `"error"`.

use axum::{
  Json,
  extract::{
    FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection,
  },
  http::{StatusCode, request::Parts},
  response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("internal error: {0}")]
  Internal(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(m) => reply(StatusCode::BAD_REQUEST, m),
      ApiError::Unauthorized(m) => reply(StatusCode::UNAUTHORIZED, m),
      ApiError::Forbidden(m) => reply(StatusCode::FORBIDDEN, m),
      ApiError::NotFound(m) => reply(StatusCode::NOT_FOUND, m),
      ApiError::Internal(detail) => server_error(detail),
      ApiError::Store(e) => server_error(e.to_string()),
    }
  }
}

fn reply(status: StatusCode, message: String) -> Response {
  (status, Json(json!({ "message": message }))).into_response()
}

fn server_error(detail: String) -> Response {
  tracing::error!(error = %detail, "request failed");
  let body = json!({ "message": "Server error", "error": detail });
  (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

// ─── Rejection-normalising extractors ─────────────────────────────────────────

/// [`Json`] whose rejection is an [`ApiError::BadRequest`], so malformed
/// bodies get the same `{"message": ...}` shape as every other error.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
  S: Send + Sync,
  T: DeserializeOwned,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|e: JsonRejection| ApiError::BadRequest(e.body_text()))?;
    Ok(ApiJson(value))
  }
}

/// [`Path`] with the same treatment: a malformed id in the URL is a 400, not
/// an axum-internal plain-text response.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
  S: Send + Sync,
  T: DeserializeOwned + Send,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Path(value) = Path::<T>::from_request_parts(parts, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(ApiPath(value))
  }
}
