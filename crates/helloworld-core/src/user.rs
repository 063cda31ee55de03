//! User accounts.
//!
//! A user is either a student or a teacher. Students carry their progress
//! counters (XP, level, streak, explored countries, badges) inline on the
//! account row; teachers keep the same fields at their defaults. There is no
//! separate progress record to keep in sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// The two roles an account can hold. Client input is parsed through
/// [`FromStr`](std::str::FromStr) before it is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Teacher,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Student => "student",
      Role::Teacher => "teacher",
    }
  }
}

impl std::str::FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "student" => Ok(Role::Student),
      "teacher" => Ok(Role::Teacher),
      other => Err(Error::UnknownRole(other.to_string())),
    }
  }
}

/// A registered account.
///
/// `countries_explored` and `badges` are ordered sets: insertion order is
/// preserved and duplicates are never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:                 Uuid,
  pub name:               String,
  pub email:              String,
  /// Argon2 PHC string. Never leaves the server.
  #[serde(skip_serializing)]
  pub password_hash:      String,
  pub role:               Role,
  pub xp:                 i64,
  pub level:              i64,
  pub streak_days:        i64,
  pub quizzes_attempted:  i64,
  pub ai_chats_completed: i64,
  pub countries_explored: Vec<String>,
  pub badges:             Vec<String>,
  pub created_at:         DateTime<Utc>,
}

/// Input to [`PlatformStore::add_user`](crate::store::PlatformStore::add_user).
/// The id, timestamp, and progress counters are set by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
  pub role:          Role,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_round_trips_through_str() {
    assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
    assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
    assert_eq!(Role::Student.as_str(), "student");
    assert_eq!(Role::Teacher.as_str(), "teacher");
  }

  #[test]
  fn role_rejects_anything_else() {
    assert!("admin".parse::<Role>().is_err());
    assert!("Student".parse::<Role>().is_err());
    assert!("".parse::<Role>().is_err());
  }
}
