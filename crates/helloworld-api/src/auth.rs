//! Bearer-token auth: argon2 password hashing, JWT issue/verify, and the
//! role-gating request extractors.
//!
//! A handler opts into auth by taking [`AuthedUser`] (any signed-in account),
//! [`Student`], or [`Teacher`] as an argument. Missing or bad tokens reject
//! with 401 before the handler body runs; a role mismatch rejects with 403.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use chrono::Utc;
use helloworld_core::{store::PlatformStore, user::Role};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Token-signing configuration, shared across handlers via
/// [`AppState`](crate::AppState).
#[derive(Clone)]
pub struct AuthConfig {
  pub secret:         String,
  /// Lifetime of issued tokens.
  pub token_ttl_days: i64,
}

/// Claims carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  /// Account id.
  pub sub:  Uuid,
  pub role: Role,
  pub iat:  i64,
  pub exp:  i64,
}

// ─── Passwords ────────────────────────────────────────────────────────────────

/// Hash a password into an argon2 PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Check a password against a stored PHC string. An unparsable hash counts
/// as a mismatch rather than an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

// ─── Tokens ───────────────────────────────────────────────────────────────────

/// Sign a token for an account.
pub fn issue_token(
  config: &AuthConfig,
  user_id: Uuid,
  role: Role,
) -> Result<String, ApiError> {
  let now = Utc::now();
  let exp = now + chrono::Duration::days(config.token_ttl_days);
  let claims = Claims {
    sub: user_id,
    role,
    iat: now.timestamp(),
    exp: exp.timestamp(),
  };
  jsonwebtoken::encode(
    &Header::default(),
    &claims,
    &EncodingKey::from_secret(config.secret.as_bytes()),
  )
  .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Decode and validate a token. Signature and expiry failures both come
/// back as the same 401; callers cannot distinguish them.
pub fn verify_token(
  config: &AuthConfig,
  token: &str,
) -> Result<Claims, ApiError> {
  jsonwebtoken::decode::<Claims>(
    token,
    &DecodingKey::from_secret(config.secret.as_bytes()),
    &Validation::default(),
  )
  .map(|data| data.claims)
  .map_err(|_| ApiError::Unauthorized("Invalid or expired token".into()))
}

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.strip_prefix("Bearer "))
    .ok_or_else(|| {
      ApiError::Unauthorized("No token provided, authorization denied".into())
    })
}

// ─── Extractors ───────────────────────────────────────────────────────────────

/// The account a valid bearer token names.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser {
  pub id:   Uuid,
  pub role: Role,
}

impl AuthedUser {
  fn require(&self, role: Role) -> Result<(), ApiError> {
    if self.role == role {
      Ok(())
    } else {
      Err(ApiError::Forbidden("Access denied".into()))
    }
  }
}

impl<S> FromRequestParts<AppState<S>> for AuthedUser
where
  S: PlatformStore,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)?;
    let claims = verify_token(&state.auth, token)?;
    Ok(AuthedUser { id: claims.sub, role: claims.role })
  }
}

/// [`AuthedUser`] restricted to students.
pub struct Student(pub AuthedUser);

impl<S> FromRequestParts<AppState<S>> for Student
where
  S: PlatformStore,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let user = AuthedUser::from_request_parts(parts, state).await?;
    user.require(Role::Student)?;
    Ok(Student(user))
  }
}

/// [`AuthedUser`] restricted to teachers.
pub struct Teacher(pub AuthedUser);

impl<S> FromRequestParts<AppState<S>> for Teacher
where
  S: PlatformStore,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let user = AuthedUser::from_request_parts(parts, state).await?;
    user.require(Role::Teacher)?;
    Ok(Teacher(user))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> AuthConfig {
    AuthConfig { secret: "test-secret".into(), token_ttl_days: 30 }
  }

  #[test]
  fn password_hash_round_trip() {
    let hash = hash_password("hunter2").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("hunter2", &hash));
    assert!(!verify_password("hunter3", &hash));
  }

  #[test]
  fn garbage_hash_never_verifies() {
    assert!(!verify_password("hunter2", "not-a-phc-string"));
  }

  #[test]
  fn token_round_trip() {
    let config = config();
    let id = Uuid::new_v4();
    let token = issue_token(&config, id, Role::Teacher).unwrap();
    let claims = verify_token(&config, &token).unwrap();
    assert_eq!(claims.sub, id);
    assert_eq!(claims.role, Role::Teacher);
  }

  #[test]
  fn token_signed_with_another_secret_is_rejected() {
    let token = issue_token(&config(), Uuid::new_v4(), Role::Student).unwrap();
    let other = AuthConfig { secret: "different".into(), token_ttl_days: 30 };
    assert!(verify_token(&other, &token).is_err());
  }

  #[test]
  fn expired_token_is_rejected() {
    let config = config();
    let now = Utc::now().timestamp();
    // Expired well past the validator's 60-second leeway.
    let claims = Claims {
      sub:  Uuid::new_v4(),
      role: Role::Student,
      iat:  now - 7200,
      exp:  now - 3600,
    };
    let token = jsonwebtoken::encode(
      &Header::default(),
      &claims,
      &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();
    assert!(verify_token(&config, &token).is_err());
  }

  #[test]
  fn bearer_token_requires_the_scheme() {
    let mut headers = HeaderMap::new();
    assert!(bearer_token(&headers).is_err());

    headers.insert(
      axum::http::header::AUTHORIZATION,
      "Basic dXNlcjpwYXNz".parse().unwrap(),
    );
    assert!(bearer_token(&headers).is_err());

    headers.insert(
      axum::http::header::AUTHORIZATION,
      "Bearer abc.def.ghi".parse().unwrap(),
    );
    assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
  }

  #[test]
  fn role_gate() {
    let user = AuthedUser { id: Uuid::new_v4(), role: Role::Student };
    assert!(user.require(Role::Student).is_ok());
    assert!(matches!(
      user.require(Role::Teacher),
      Err(ApiError::Forbidden(_))
    ));
  }
}
