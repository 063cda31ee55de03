//! Teacher-authored learning content: facts, challenges, and resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
  Fact,
  Challenge,
  Resource,
}

impl ContentKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ContentKind::Fact => "fact",
      ContentKind::Challenge => "challenge",
      ContentKind::Resource => "resource",
    }
  }
}

impl std::str::FromStr for ContentKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "fact" => Ok(ContentKind::Fact),
      "challenge" => Ok(ContentKind::Challenge),
      "resource" => Ok(ContentKind::Resource),
      other => Err(Error::UnknownContentKind(other.to_string())),
    }
  }
}

/// A piece of published content. Readable by every signed-in user; writable
/// only by its owning teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherContent {
  pub id:         Uuid,
  pub teacher_id: Uuid,
  pub title:      String,
  #[serde(rename = "type")]
  pub kind:       ContentKind,
  #[serde(rename = "content")]
  pub body:       String,
  pub created_at: DateTime<Utc>,
}

/// Input to
/// [`PlatformStore::add_content`](crate::store::PlatformStore::add_content).
#[derive(Debug, Clone)]
pub struct NewTeacherContent {
  pub teacher_id: Uuid,
  pub title:      String,
  pub kind:       ContentKind,
  pub body:       String,
}
