//! Classes and student enrollment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A teacher-owned class that students join by code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherClass {
  pub id:         Uuid,
  pub name:       String,
  /// Six-character join code, unique across the store.
  pub code:       String,
  pub teacher_id: Uuid,
  pub created_at: DateTime<Utc>,
}

/// Input to
/// [`PlatformStore::create_class`](crate::store::PlatformStore::create_class).
#[derive(Debug, Clone)]
pub struct NewClass {
  pub name:       String,
  pub code:       String,
  pub teacher_id: Uuid,
}

/// A (student, class) membership. At most one exists per pair; joining a
/// class twice is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
  pub student_id: Uuid,
  pub class_id:   Uuid,
  pub joined_at:  DateTime<Utc>,
}
