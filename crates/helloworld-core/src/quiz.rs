//! Teacher-authored quizzes and student quiz attempts.
//!
//! The two are decoupled: an attempt records only the country, the raw score,
//! and the number of questions. It does not reference a quiz id, so attempts
//! survive quiz deletion and the frontend may also submit scores for its
//! built-in country quizzes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  #[default]
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

impl std::str::FromStr for Difficulty {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "easy" => Ok(Difficulty::Easy),
      "medium" => Ok(Difficulty::Medium),
      "hard" => Ok(Difficulty::Hard),
      other => Err(Error::UnknownDifficulty(other.to_string())),
    }
  }
}

/// A single multiple-choice question. `correct_answer` is expected to be one
/// of `options`; the authoring client enforces this, the store does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  #[serde(rename = "question")]
  pub text:           String,
  pub options:        Vec<String>,
  pub correct_answer: String,
}

/// A quiz authored by a teacher, optionally pinned to one of their classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherQuiz {
  pub id:         Uuid,
  pub teacher_id: Uuid,
  /// Quizzes without a class are visible only through the teacher's own
  /// listing. A quiz keeps its `class_id` even after the class is deleted.
  pub class_id:   Option<Uuid>,
  #[serde(rename = "quizTitle")]
  pub title:      String,
  pub country:    String,
  pub difficulty: Difficulty,
  pub questions:  Vec<Question>,
  pub created_at: DateTime<Utc>,
}

/// Input to
/// [`PlatformStore::create_quiz`](crate::store::PlatformStore::create_quiz).
#[derive(Debug, Clone)]
pub struct NewTeacherQuiz {
  pub teacher_id: Uuid,
  pub class_id:   Option<Uuid>,
  pub title:      String,
  pub country:    String,
  pub difficulty: Difficulty,
  pub questions:  Vec<Question>,
}

/// One recorded quiz submission. Append-only: attempts are never updated or
/// deleted, so history and analytics always reflect the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
  pub id:          Uuid,
  pub student_id:  Uuid,
  pub country:     String,
  /// Raw points scored. Credited to XP point-for-point; deliberately not
  /// normalised by `total`.
  pub score:       i64,
  pub total:       i64,
  pub recorded_at: DateTime<Utc>,
}
