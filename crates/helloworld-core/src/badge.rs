//! The global badge catalog.
//!
//! Badges are definitions only. Which badges a user has earned lives on the
//! user row ([`User::badges`](crate::user::User::badges)) as a list of badge
//! names, maintained by the client through the progress endpoint; the server
//! does not evaluate award criteria.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// XP granted by a badge whose definition does not specify a reward.
pub const DEFAULT_XP_REWARD: i64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
  pub id:          Uuid,
  pub name:        String,
  pub description: Option<String>,
  pub icon:        Option<String>,
  /// Human-readable award criteria, e.g. `"Explore 5 countries"`.
  pub criteria:    Option<String>,
  pub xp_reward:   i64,
}

/// Input to
/// [`PlatformStore::create_badge`](crate::store::PlatformStore::create_badge).
#[derive(Debug, Clone)]
pub struct NewBadge {
  pub name:        String,
  pub description: Option<String>,
  pub icon:        Option<String>,
  pub criteria:    Option<String>,
  pub xp_reward:   Option<i64>,
}

/// Merge-patch for a badge definition. `None` fields are left untouched;
/// unknown fields in the request body are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgePatch {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub icon:        Option<String>,
  pub criteria:    Option<String>,
  pub xp_reward:   Option<i64>,
}
