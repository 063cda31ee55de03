//! Platform-wide analytics for the teacher dashboard.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/api/analytics/avg-xp` | teacher only |
//! | `GET` | `/api/analytics/countries` | teacher only |
//! | `GET` | `/api/analytics/quiz-stats` | teacher only |

use axum::{Json, extract::State};
use helloworld_core::{
  analytics::{CountryPopularity, QuizStats},
  store::PlatformStore,
};
use serde_json::json;

use crate::{AppState, auth::Teacher, error::ApiError};

/// `GET /api/analytics/avg-xp` — rounded mean XP across all students.
pub async fn avg_xp<S>(
  State(state): State<AppState<S>>,
  Teacher(_): Teacher,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: PlatformStore,
{
  let average = state
    .store
    .average_xp()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "averageXP": average })))
}

/// `GET /api/analytics/countries` — countries by how many students explored
/// them, most popular first.
pub async fn countries<S>(
  State(state): State<AppState<S>>,
  Teacher(_): Teacher,
) -> Result<Json<Vec<CountryPopularity>>, ApiError>
where
  S: PlatformStore,
{
  let countries = state
    .store
    .country_popularity()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(countries))
}

/// `GET /api/analytics/quiz-stats` — attempt count and rounded mean score.
pub async fn quiz_stats<S>(
  State(state): State<AppState<S>>,
  Teacher(_): Teacher,
) -> Result<Json<QuizStats>, ApiError>
where
  S: PlatformStore,
{
  let stats = state
    .store
    .quiz_stats()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(stats))
}
