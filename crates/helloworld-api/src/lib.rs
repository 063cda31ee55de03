//! REST API for the HelloWorld language-learning platform.
//!
//! Exposes an axum [`Router`] backed by any
//! [`PlatformStore`](helloworld_core::store::PlatformStore): JWT-issued
//! accounts, classes with join codes, teacher quizzes, XP-crediting quiz
//! and pronunciation submissions, chat, the notebook, published content,
//! the badge catalog, and teacher analytics.
//!
//! Handlers are generic over the store so tests can swap backends; the
//! `server` binary wires in `SqliteStore`.

pub mod accounts;
pub mod analytics;
pub mod attempts;
pub mod auth;
pub mod badges;
pub mod chat;
pub mod classes;
pub mod content;
pub mod error;
pub mod notebook;
pub mod progress;
pub mod pronunciation;
pub mod quizzes;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  routing::{delete, get, post, put},
};
use helloworld_core::store::PlatformStore;
use serde::Deserialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use auth::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` merged
/// with `HELLOWORLD_`-prefixed environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  pub jwt_secret:     String,
  #[serde(default = "default_token_ttl_days")]
  pub token_ttl_days: i64,
}

fn default_token_ttl_days() -> i64 {
  30
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: PlatformStore> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`].
///
/// The browser SPA is served from another origin, so CORS is wide open;
/// bearer tokens are the only gate.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: PlatformStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Accounts
    .route("/api/auth/register", post(accounts::register::<S>))
    .route("/api/auth/login", post(accounts::login::<S>))
    .route("/dashboard/teacher", get(accounts::teacher_dashboard))
    .route("/dashboard/student", get(accounts::student_dashboard))
    // Progress
    .route(
      "/api/student/progress",
      get(progress::get_own::<S>).put(progress::update_own::<S>),
    )
    .route("/api/progress/class/{classId}", get(progress::class::<S>))
    // Classes
    .route("/api/class/create", post(classes::create::<S>))
    .route("/api/class/teacher/{teacherId}", get(classes::for_teacher::<S>))
    .route("/api/class/join", post(classes::join::<S>))
    .route("/api/class/{classId}", delete(classes::remove::<S>))
    // Teacher quizzes
    .route(
      "/api/tquiz",
      get(quizzes::for_teacher::<S>).post(quizzes::create::<S>),
    )
    .route("/api/tquiz/class/{classId}", get(quizzes::for_class::<S>))
    .route(
      "/api/tquiz/{id}",
      get(quizzes::get_one::<S>).delete(quizzes::remove::<S>),
    )
    // Quiz attempts
    .route("/api/quiz/submit", post(attempts::submit::<S>))
    .route("/api/quiz/history", get(attempts::history::<S>))
    .route("/api/quiz/leaderboard", get(attempts::leaderboard::<S>))
    // Pronunciation
    .route("/api/pronunciation/submit", post(pronunciation::submit::<S>))
    .route("/api/pronunciation/history", get(pronunciation::history::<S>))
    // Chat. The first segment must be spelled `{id}` in both parameterised
    // routes or the router rejects them as conflicting.
    .route("/api/chat", post(chat::send::<S>))
    .route("/api/chat/read", put(chat::mark_read::<S>))
    .route("/api/chat/{id}", delete(chat::remove::<S>))
    .route("/api/chat/{id}/{studentId}", get(chat::thread::<S>))
    // Notebook
    .route(
      "/api/notebook",
      get(notebook::list::<S>).post(notebook::create::<S>),
    )
    .route("/api/notebook/{noteId}", delete(notebook::remove::<S>))
    // Teacher content
    .route(
      "/api/tcontent",
      get(content::list_all::<S>).post(content::create::<S>),
    )
    .route("/api/tcontent/teacher", get(content::for_teacher::<S>))
    .route("/api/tcontent/{id}", delete(content::remove::<S>))
    // Badges
    .route("/api/badges", get(badges::list::<S>).post(badges::create::<S>))
    .route(
      "/api/badges/{id}",
      get(badges::get_one::<S>)
        .put(badges::update::<S>)
        .delete(badges::remove::<S>),
    )
    // Analytics
    .route("/api/analytics/avg-xp", get(analytics::avg_xp::<S>))
    .route("/api/analytics/countries", get(analytics::countries::<S>))
    .route("/api/analytics/quiz-stats", get(analytics::quiz_stats::<S>))
    // Liveness
    .route("/health", get(health))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

/// `GET /health`
async fn health() -> Json<serde_json::Value> {
  Json(json!({ "ok": true }))
}
