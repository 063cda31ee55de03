//! Aggregate read models for the teacher analytics dashboard.

use serde::Serialize;

/// How many students have explored a country. One country appears at most
/// once; students count once per country no matter how many attempts they
/// recorded there.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPopularity {
  pub country: String,
  pub count:   i64,
}

/// Totals across every quiz attempt ever recorded, platform-wide.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
  pub total_quiz_attempts: i64,
  /// Rounded mean of raw attempt scores; `0` when no attempts exist.
  pub average_score:       i64,
}
