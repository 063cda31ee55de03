//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. List fields (explored
//! countries, badge names, quiz questions) are stored as compact JSON. UUIDs
//! are stored as hyphenated lowercase strings. Closed enums (role,
//! difficulty, message kind, content kind) are stored as their lowercase
//! wire names.

use chrono::{DateTime, Utc};
use helloworld_core::{
  badge::Badge,
  chat::{ChatMessage, MessageKind},
  classroom::TeacherClass,
  content::{ContentKind, TeacherContent},
  notebook::Note,
  progress::{ClassProgressRow, LeaderboardEntry, PronunciationRecord},
  quiz::{Difficulty, Question, QuizAttempt, TeacherQuiz},
  user::{Role, User},
};
use uuid::Uuid;

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| crate::Error::DateParse(e.to_string()))
}

// ─── Closed enums ────────────────────────────────────────────────────────────

pub fn encode_role(r: Role) -> &'static str { r.as_str() }

pub fn decode_role(s: &str) -> Result<Role> { Ok(s.parse()?) }

pub fn encode_difficulty(d: Difficulty) -> &'static str { d.as_str() }

pub fn decode_difficulty(s: &str) -> Result<Difficulty> { Ok(s.parse()?) }

pub fn encode_message_kind(k: MessageKind) -> &'static str { k.as_str() }

pub fn decode_message_kind(s: &str) -> Result<MessageKind> { Ok(s.parse()?) }

pub fn encode_content_kind(k: ContentKind) -> &'static str { k.as_str() }

pub fn decode_content_kind(s: &str) -> Result<ContentKind> { Ok(s.parse()?) }

// ─── JSON lists ──────────────────────────────────────────────────────────────

pub fn encode_string_list(items: &[String]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

pub fn decode_string_list(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_questions(questions: &[Question]) -> Result<String> {
  Ok(serde_json::to_string(questions)?)
}

pub fn decode_questions(s: &str) -> Result<Vec<Question>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub user_id:            String,
  pub name:               String,
  pub email:              String,
  pub password_hash:      String,
  pub role:               String,
  pub xp:                 i64,
  pub level:              i64,
  pub streak_days:        i64,
  pub quizzes_attempted:  i64,
  pub ai_chats_completed: i64,
  pub countries_explored: String,
  pub badges:             String,
  pub created_at:         String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:                 decode_uuid(&self.user_id)?,
      name:               self.name,
      email:              self.email,
      password_hash:      self.password_hash,
      role:               decode_role(&self.role)?,
      xp:                 self.xp,
      level:              self.level,
      streak_days:        self.streak_days,
      quizzes_attempted:  self.quizzes_attempted,
      ai_chats_completed: self.ai_chats_completed,
      countries_explored: decode_string_list(&self.countries_explored)?,
      badges:             decode_string_list(&self.badges)?,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `classes` row.
pub struct RawClass {
  pub class_id:   String,
  pub name:       String,
  pub code:       String,
  pub teacher_id: String,
  pub created_at: String,
}

impl RawClass {
  pub fn into_class(self) -> Result<TeacherClass> {
    Ok(TeacherClass {
      id:         decode_uuid(&self.class_id)?,
      name:       self.name,
      code:       self.code,
      teacher_id: decode_uuid(&self.teacher_id)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `teacher_quizzes` row.
pub struct RawQuiz {
  pub quiz_id:    String,
  pub teacher_id: String,
  pub class_id:   Option<String>,
  pub title:      String,
  pub country:    String,
  pub difficulty: String,
  pub questions:  String,
  pub created_at: String,
}

impl RawQuiz {
  pub fn into_quiz(self) -> Result<TeacherQuiz> {
    Ok(TeacherQuiz {
      id:         decode_uuid(&self.quiz_id)?,
      teacher_id: decode_uuid(&self.teacher_id)?,
      class_id:   self.class_id.as_deref().map(decode_uuid).transpose()?,
      title:      self.title,
      country:    self.country,
      difficulty: decode_difficulty(&self.difficulty)?,
      questions:  decode_questions(&self.questions)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `quiz_attempts` row.
pub struct RawAttempt {
  pub attempt_id:  String,
  pub student_id:  String,
  pub country:     String,
  pub score:       i64,
  pub total:       i64,
  pub recorded_at: String,
}

impl RawAttempt {
  pub fn into_attempt(self) -> Result<QuizAttempt> {
    Ok(QuizAttempt {
      id:          decode_uuid(&self.attempt_id)?,
      student_id:  decode_uuid(&self.student_id)?,
      country:     self.country,
      score:       self.score,
      total:       self.total,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read directly from a `pronunciations` row.
pub struct RawPronunciation {
  pub pronunciation_id: String,
  pub student_id:       String,
  pub phrase:           String,
  pub accuracy:         i64,
  pub recorded_at:      String,
}

impl RawPronunciation {
  pub fn into_record(self) -> Result<PronunciationRecord> {
    Ok(PronunciationRecord {
      id:          decode_uuid(&self.pronunciation_id)?,
      student_id:  decode_uuid(&self.student_id)?,
      phrase:      self.phrase,
      accuracy:    self.accuracy,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read directly from a `chat_messages` row.
pub struct RawMessage {
  pub message_id:  String,
  pub sender_id:   String,
  pub receiver_id: String,
  pub body:        String,
  pub kind:        String,
  pub is_read:     bool,
  pub sent_at:     String,
}

impl RawMessage {
  pub fn into_message(self) -> Result<ChatMessage> {
    Ok(ChatMessage {
      id:          decode_uuid(&self.message_id)?,
      sender_id:   decode_uuid(&self.sender_id)?,
      receiver_id: decode_uuid(&self.receiver_id)?,
      body:        self.body,
      kind:        decode_message_kind(&self.kind)?,
      is_read:     self.is_read,
      sent_at:     decode_dt(&self.sent_at)?,
    })
  }
}

/// Raw values read directly from a `notes` row.
pub struct RawNote {
  pub note_id:     String,
  pub student_id:  String,
  pub phrase:      String,
  pub translation: Option<String>,
  pub note_type:   String,
  pub created_at:  String,
}

impl RawNote {
  pub fn into_note(self) -> Result<Note> {
    Ok(Note {
      id:          decode_uuid(&self.note_id)?,
      student_id:  decode_uuid(&self.student_id)?,
      phrase:      self.phrase,
      translation: self.translation,
      note_type:   self.note_type,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `teacher_content` row.
pub struct RawContent {
  pub content_id: String,
  pub teacher_id: String,
  pub title:      String,
  pub kind:       String,
  pub body:       String,
  pub created_at: String,
}

impl RawContent {
  pub fn into_content(self) -> Result<TeacherContent> {
    Ok(TeacherContent {
      id:         decode_uuid(&self.content_id)?,
      teacher_id: decode_uuid(&self.teacher_id)?,
      title:      self.title,
      kind:       decode_content_kind(&self.kind)?,
      body:       self.body,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `badges` row.
pub struct RawBadge {
  pub badge_id:    String,
  pub name:        String,
  pub description: Option<String>,
  pub icon:        Option<String>,
  pub criteria:    Option<String>,
  pub xp_reward:   i64,
}

impl RawBadge {
  pub fn into_badge(self) -> Result<Badge> {
    Ok(Badge {
      id:          decode_uuid(&self.badge_id)?,
      name:        self.name,
      description: self.description,
      icon:        self.icon,
      criteria:    self.criteria,
      xp_reward:   self.xp_reward,
    })
  }
}

/// One leaderboard row as selected from `users`.
pub struct RawLeader {
  pub user_id: String,
  pub name:    String,
  pub xp:      i64,
}

impl RawLeader {
  pub fn into_entry(self) -> Result<LeaderboardEntry> {
    Ok(LeaderboardEntry {
      student_id: decode_uuid(&self.user_id)?,
      name:       self.name,
      xp:         self.xp,
    })
  }
}

/// One class-progress row: `users` columns joined with attempt aggregates.
/// `avg_score` is `None` for students with no recorded attempts.
pub struct RawClassRow {
  pub user_id:            String,
  pub name:               String,
  pub xp:                 i64,
  pub quizzes_attempted:  i64,
  pub countries_explored: String,
  pub avg_score:          Option<f64>,
}

impl RawClassRow {
  pub fn into_row(self) -> Result<ClassProgressRow> {
    Ok(ClassProgressRow {
      student_id:         decode_uuid(&self.user_id)?,
      name:               self.name,
      xp:                 self.xp,
      total_quizzes:      self.quizzes_attempted,
      avg_score:          self.avg_score.map(|a| a.round() as i64).unwrap_or(0),
      explored_countries: decode_string_list(&self.countries_explored)?,
    })
  }
}
