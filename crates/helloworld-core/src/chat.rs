//! Direct messages between a teacher and a student.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Why a message was sent. Defaults to feedback when the client omits it.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
  #[default]
  Feedback,
  Question,
}

impl MessageKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      MessageKind::Feedback => "feedback",
      MessageKind::Question => "question",
    }
  }
}

impl std::str::FromStr for MessageKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "feedback" => Ok(MessageKind::Feedback),
      "question" => Ok(MessageKind::Question),
      other => Err(Error::UnknownMessageKind(other.to_string())),
    }
  }
}

/// A single message in a teacher/student conversation.
///
/// Messages start unread; [`mark_read`](crate::store::PlatformStore::mark_read)
/// flips every message from one sender to one receiver in bulk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
  pub id:          Uuid,
  pub sender_id:   Uuid,
  pub receiver_id: Uuid,
  #[serde(rename = "message")]
  pub body:        String,
  #[serde(rename = "type")]
  pub kind:        MessageKind,
  pub is_read:     bool,
  pub sent_at:     DateTime<Utc>,
}

/// Input to
/// [`PlatformStore::send_message`](crate::store::PlatformStore::send_message).
#[derive(Debug, Clone)]
pub struct NewChatMessage {
  pub sender_id:   Uuid,
  pub receiver_id: Uuid,
  pub body:        String,
  pub kind:        MessageKind,
}
