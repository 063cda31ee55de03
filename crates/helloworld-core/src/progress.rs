//! Progress and gamification: XP rules, read models, and the merge-patch
//! applied by the progress endpoint.
//!
//! XP is a raw running total. Quiz submissions credit the raw score
//! point-for-point and pronunciation submissions credit a rounded tenth of
//! the accuracy, so a 10-question quiz is worth more XP than a 5-question
//! quiz at the same percentage. Level and streak are client-maintained.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::User;

/// XP awarded for one pronunciation submission: `accuracy / 10`, rounded
/// half away from zero (85 → 9, 75 → 8). `accuracy` must already be
/// validated to the 0–100 range.
pub fn pronunciation_xp(accuracy: i64) -> i64 {
  (accuracy + 5) / 10
}

/// The per-student progress snapshot. Derived from [`User`] on read; never
/// stored separately.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
  pub xp:                 i64,
  pub level:              i64,
  pub streak_days:        i64,
  pub quizzes_attempted:  i64,
  pub ai_chats_completed: i64,
  pub countries_explored: Vec<String>,
  pub badges:             Vec<String>,
}

impl From<&User> for ProgressView {
  fn from(user: &User) -> Self {
    ProgressView {
      xp:                 user.xp,
      level:              user.level,
      streak_days:        user.streak_days,
      quizzes_attempted:  user.quizzes_attempted,
      ai_chats_completed: user.ai_chats_completed,
      countries_explored: user.countries_explored.clone(),
      badges:             user.badges.clone(),
    }
  }
}

/// Merge-patch for a student's progress counters. `None` fields are left
/// untouched. The field list is closed: bodies naming any other field are
/// rejected at deserialisation, so a client can never reach `email`,
/// `role`, or `password_hash` through this path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProgressPatch {
  pub xp:                 Option<i64>,
  pub level:              Option<i64>,
  pub streak_days:        Option<i64>,
  pub quizzes_attempted:  Option<i64>,
  pub ai_chats_completed: Option<i64>,
  pub countries_explored: Option<Vec<String>>,
  pub badges:             Option<Vec<String>>,
}

/// A pronunciation practice record. Append-only, like quiz attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PronunciationRecord {
  pub id:          Uuid,
  pub student_id:  Uuid,
  pub phrase:      String,
  /// Accuracy percentage scored client-side, 0–100.
  pub accuracy:    i64,
  pub recorded_at: DateTime<Utc>,
}

/// One row of the global leaderboard: top students by XP.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
  pub student_id: Uuid,
  pub name:       String,
  pub xp:         i64,
}

/// One row of a class progress report. Every enrolled student appears;
/// students with no recorded attempts report zeros and an empty country
/// list rather than being omitted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassProgressRow {
  pub student_id:         Uuid,
  pub name:               String,
  pub xp:                 i64,
  pub total_quizzes:      i64,
  /// Rounded mean of the student's raw attempt scores.
  pub avg_score:          i64,
  pub explored_countries: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pronunciation_xp_rounds_half_away_from_zero() {
    assert_eq!(pronunciation_xp(0), 0);
    assert_eq!(pronunciation_xp(4), 0);
    assert_eq!(pronunciation_xp(5), 1);
    assert_eq!(pronunciation_xp(75), 8);
    assert_eq!(pronunciation_xp(84), 8);
    assert_eq!(pronunciation_xp(85), 9);
    assert_eq!(pronunciation_xp(100), 10);
  }

  #[test]
  fn progress_patch_rejects_unknown_fields() {
    let err = serde_json::from_str::<ProgressPatch>(r#"{"email":"x@y.z"}"#);
    assert!(err.is_err());

    let ok = serde_json::from_str::<ProgressPatch>(r#"{"xp":40}"#).unwrap();
    assert_eq!(ok.xp, Some(40));
    assert_eq!(ok.level, None);
  }
}
