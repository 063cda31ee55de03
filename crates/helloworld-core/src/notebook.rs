//! The notebook: phrases a student has saved for later review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Applied when a note is saved without an explicit type. Most notes come
/// from the in-app conversation practice, so that is the default label.
pub const DEFAULT_NOTE_TYPE: &str = "AI Chat";

/// A saved phrase. Notes are private to their owning student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  pub id:          Uuid,
  pub student_id:  Uuid,
  pub phrase:      String,
  pub translation: Option<String>,
  /// Free-form label, e.g. `"AI Chat"` or `"Lesson"`. Not a closed enum.
  pub note_type:   String,
  pub created_at:  DateTime<Utc>,
}

/// Input to
/// [`PlatformStore::add_note`](crate::store::PlatformStore::add_note).
/// A `None` note type becomes [`DEFAULT_NOTE_TYPE`].
#[derive(Debug, Clone)]
pub struct NewNote {
  pub student_id:  Uuid,
  pub phrase:      String,
  pub translation: Option<String>,
  pub note_type:   Option<String>,
}
