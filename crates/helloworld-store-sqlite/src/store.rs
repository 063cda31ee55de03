//! [`SqliteStore`] — the SQLite implementation of [`PlatformStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use helloworld_core::{
  analytics::{CountryPopularity, QuizStats},
  badge::{Badge, BadgePatch, DEFAULT_XP_REWARD, NewBadge},
  chat::{ChatMessage, NewChatMessage},
  classroom::{Enrollment, NewClass, TeacherClass},
  content::{NewTeacherContent, TeacherContent},
  notebook::{DEFAULT_NOTE_TYPE, NewNote, Note},
  progress::{
    ClassProgressRow, LeaderboardEntry, ProgressPatch, PronunciationRecord,
    pronunciation_xp,
  },
  quiz::{NewTeacherQuiz, QuizAttempt, TeacherQuiz},
  store::PlatformStore,
  user::{NewUser, Role, User},
};

use crate::{
  Error, Result,
  encode::{
    RawAttempt, RawBadge, RawClass, RawClassRow, RawContent, RawLeader,
    RawMessage, RawNote, RawPronunciation, RawQuiz, RawUser, encode_content_kind,
    encode_difficulty, encode_dt, encode_message_kind, encode_questions,
    encode_role, encode_string_list, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Row readers ─────────────────────────────────────────────────────────────

const USER_COLUMNS: &str = "user_id, name, email, password_hash, role, xp, \
   level, streak_days, quizzes_attempted, ai_chats_completed, \
   countries_explored, badges, created_at";

fn read_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:            row.get(0)?,
    name:               row.get(1)?,
    email:              row.get(2)?,
    password_hash:      row.get(3)?,
    role:               row.get(4)?,
    xp:                 row.get(5)?,
    level:              row.get(6)?,
    streak_days:        row.get(7)?,
    quizzes_attempted:  row.get(8)?,
    ai_chats_completed: row.get(9)?,
    countries_explored: row.get(10)?,
    badges:             row.get(11)?,
    created_at:         row.get(12)?,
  })
}

const CLASS_COLUMNS: &str = "class_id, name, code, teacher_id, created_at";

fn read_class(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawClass> {
  Ok(RawClass {
    class_id:   row.get(0)?,
    name:       row.get(1)?,
    code:       row.get(2)?,
    teacher_id: row.get(3)?,
    created_at: row.get(4)?,
  })
}

const QUIZ_COLUMNS: &str =
  "quiz_id, teacher_id, class_id, title, country, difficulty, questions, \
   created_at";

fn read_quiz(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawQuiz> {
  Ok(RawQuiz {
    quiz_id:    row.get(0)?,
    teacher_id: row.get(1)?,
    class_id:   row.get(2)?,
    title:      row.get(3)?,
    country:    row.get(4)?,
    difficulty: row.get(5)?,
    questions:  row.get(6)?,
    created_at: row.get(7)?,
  })
}

fn read_attempt(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAttempt> {
  Ok(RawAttempt {
    attempt_id:  row.get(0)?,
    student_id:  row.get(1)?,
    country:     row.get(2)?,
    score:       row.get(3)?,
    total:       row.get(4)?,
    recorded_at: row.get(5)?,
  })
}

fn read_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawMessage> {
  Ok(RawMessage {
    message_id:  row.get(0)?,
    sender_id:   row.get(1)?,
    receiver_id: row.get(2)?,
    body:        row.get(3)?,
    kind:        row.get(4)?,
    is_read:     row.get(5)?,
    sent_at:     row.get(6)?,
  })
}

fn read_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawNote> {
  Ok(RawNote {
    note_id:     row.get(0)?,
    student_id:  row.get(1)?,
    phrase:      row.get(2)?,
    translation: row.get(3)?,
    note_type:   row.get(4)?,
    created_at:  row.get(5)?,
  })
}

fn read_content(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContent> {
  Ok(RawContent {
    content_id: row.get(0)?,
    teacher_id: row.get(1)?,
    title:      row.get(2)?,
    kind:       row.get(3)?,
    body:       row.get(4)?,
    created_at: row.get(5)?,
  })
}

const BADGE_COLUMNS: &str =
  "badge_id, name, description, icon, criteria, xp_reward";

fn read_badge(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawBadge> {
  Ok(RawBadge {
    badge_id:    row.get(0)?,
    name:        row.get(1)?,
    description: row.get(2)?,
    icon:        row.get(3)?,
    criteria:    row.get(4)?,
    xp_reward:   row.get(5)?,
  })
}

/// Box a serde error so it can cross a connection closure boundary.
fn json_err(e: serde_json::Error) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A HelloWorld platform store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn user_where(
    &self,
    condition: &'static str,
    value: String,
  ) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE {condition}"),
              rusqlite::params![value],
              read_user,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}

// ─── PlatformStore impl ──────────────────────────────────────────────────────

impl PlatformStore for SqliteStore {
  type Error = Error;

  // ── Accounts ──────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      id:                 Uuid::new_v4(),
      name:               input.name,
      email:              input.email,
      password_hash:      input.password_hash,
      role:               input.role,
      xp:                 0,
      level:              1,
      streak_days:        0,
      quizzes_attempted:  0,
      ai_chats_completed: 0,
      countries_explored: Vec::new(),
      badges:             Vec::new(),
      created_at:         Utc::now(),
    };

    let id_str        = encode_uuid(user.id);
    let name          = user.name.clone();
    let email         = user.email.clone();
    let password_hash = user.password_hash.clone();
    let role_str      = encode_role(user.role).to_owned();
    let countries_str = encode_string_list(&user.countries_explored)?;
    let badges_str    = encode_string_list(&user.badges)?;
    let at_str        = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             user_id, name, email, password_hash, role,
             xp, level, streak_days, quizzes_attempted, ai_chats_completed,
             countries_explored, badges, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, 0, 1, 0, 0, 0, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            name,
            email,
            password_hash,
            role_str,
            countries_str,
            badges_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    self.user_where("user_id = ?1", encode_uuid(id)).await
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    self.user_where("email = ?1", email.to_owned()).await
  }

  // ── Progress and gamification ─────────────────────────────────────────────

  async fn submit_quiz_attempt(
    &self,
    student_id: Uuid,
    country:    String,
    score:      i64,
    total:      i64,
  ) -> Result<QuizAttempt> {
    let attempt = QuizAttempt {
      id: Uuid::new_v4(),
      student_id,
      country,
      score,
      total,
      recorded_at: Utc::now(),
    };

    let attempt_id_str = encode_uuid(attempt.id);
    let student_id_str = encode_uuid(student_id);
    let country        = attempt.country.clone();
    let at_str         = encode_dt(attempt.recorded_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO quiz_attempts (
             attempt_id, student_id, country, score, total, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            attempt_id_str,
            student_id_str,
            country,
            score,
            total,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    // Second write: credit the student. Runs after the attempt insert with
    // no surrounding transaction, so a crash here leaves an attempt that
    // never credited its student.
    let student_id_str = encode_uuid(student_id);
    let country        = attempt.country.clone();

    self
      .conn
      .call(move |conn| {
        let explored: String = conn.query_row(
          "SELECT countries_explored FROM users WHERE user_id = ?1",
          rusqlite::params![student_id_str],
          |row| row.get(0),
        )?;

        let mut countries: Vec<String> =
          serde_json::from_str(&explored).map_err(json_err)?;
        if !countries.iter().any(|c| c == &country) {
          countries.push(country);
        }
        let countries_str =
          serde_json::to_string(&countries).map_err(json_err)?;

        conn.execute(
          "UPDATE users
           SET xp = xp + ?2,
               quizzes_attempted = quizzes_attempted + 1,
               countries_explored = ?3
           WHERE user_id = ?1",
          rusqlite::params![student_id_str, score, countries_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(attempt)
  }

  async fn quiz_history(&self, student_id: Uuid) -> Result<Vec<QuizAttempt>> {
    let id_str = encode_uuid(student_id);

    let raws: Vec<RawAttempt> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT attempt_id, student_id, country, score, total, recorded_at
           FROM quiz_attempts
           WHERE student_id = ?1
           ORDER BY recorded_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], read_attempt)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAttempt::into_attempt).collect()
  }

  async fn submit_pronunciation(
    &self,
    student_id: Uuid,
    phrase:     String,
    accuracy:   i64,
  ) -> Result<PronunciationRecord> {
    let record = PronunciationRecord {
      id: Uuid::new_v4(),
      student_id,
      phrase,
      accuracy,
      recorded_at: Utc::now(),
    };

    let record_id_str  = encode_uuid(record.id);
    let student_id_str = encode_uuid(student_id);
    let phrase         = record.phrase.clone();
    let at_str         = encode_dt(record.recorded_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO pronunciations (
             pronunciation_id, student_id, phrase, accuracy, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            record_id_str,
            student_id_str,
            phrase,
            accuracy,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    // Second write, same shape as submit_quiz_attempt.
    let student_id_str = encode_uuid(student_id);
    let award          = pronunciation_xp(accuracy);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET xp = xp + ?2 WHERE user_id = ?1",
          rusqlite::params![student_id_str, award],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn pronunciation_history(
    &self,
    student_id: Uuid,
  ) -> Result<Vec<PronunciationRecord>> {
    let id_str = encode_uuid(student_id);

    let raws: Vec<RawPronunciation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT pronunciation_id, student_id, phrase, accuracy, recorded_at
           FROM pronunciations
           WHERE student_id = ?1
           ORDER BY recorded_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawPronunciation {
              pronunciation_id: row.get(0)?,
              student_id:       row.get(1)?,
              phrase:           row.get(2)?,
              accuracy:         row.get(3)?,
              recorded_at:      row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPronunciation::into_record).collect()
  }

  async fn update_progress(
    &self,
    user_id: Uuid,
    patch:   ProgressPatch,
  ) -> Result<Option<User>> {
    let id_str = encode_uuid(user_id);

    let countries_str = patch
      .countries_explored
      .as_deref()
      .map(encode_string_list)
      .transpose()?;
    let badges_str = patch.badges.as_deref().map(encode_string_list).transpose()?;

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE users
           SET xp                 = COALESCE(?2, xp),
               level              = COALESCE(?3, level),
               streak_days        = COALESCE(?4, streak_days),
               quizzes_attempted  = COALESCE(?5, quizzes_attempted),
               ai_chats_completed = COALESCE(?6, ai_chats_completed),
               countries_explored = COALESCE(?7, countries_explored),
               badges             = COALESCE(?8, badges)
           WHERE user_id = ?1",
          rusqlite::params![
            id_str,
            patch.xp,
            patch.level,
            patch.streak_days,
            patch.quizzes_attempted,
            patch.ai_chats_completed,
            countries_str,
            badges_str,
          ],
        )?;

        if updated == 0 {
          return Ok(None);
        }

        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
              rusqlite::params![id_str],
              read_user,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
    let role_str  = encode_role(Role::Student).to_owned();
    let limit_val = limit as i64;

    let raws: Vec<RawLeader> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT user_id, name, xp
           FROM users
           WHERE role = ?1
           ORDER BY xp DESC, created_at ASC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![role_str, limit_val], |row| {
            Ok(RawLeader {
              user_id: row.get(0)?,
              name:    row.get(1)?,
              xp:      row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLeader::into_entry).collect()
  }

  async fn class_progress(&self, class_id: Uuid) -> Result<Vec<ClassProgressRow>> {
    let id_str = encode_uuid(class_id);

    let raws: Vec<RawClassRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT u.user_id, u.name, u.xp, u.quizzes_attempted,
                  u.countries_explored, AVG(a.score) AS avg_score
           FROM enrollments e
           JOIN users u            ON u.user_id = e.student_id
           LEFT JOIN quiz_attempts a ON a.student_id = u.user_id
           WHERE e.class_id = ?1
           GROUP BY u.user_id, u.name, u.xp, u.quizzes_attempted,
                    u.countries_explored, u.created_at
           ORDER BY u.xp DESC, u.created_at ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawClassRow {
              user_id:            row.get(0)?,
              name:               row.get(1)?,
              xp:                 row.get(2)?,
              quizzes_attempted:  row.get(3)?,
              countries_explored: row.get(4)?,
              avg_score:          row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClassRow::into_row).collect()
  }

  // ── Classes ───────────────────────────────────────────────────────────────

  async fn create_class(&self, input: NewClass) -> Result<TeacherClass> {
    let class = TeacherClass {
      id:         Uuid::new_v4(),
      name:       input.name,
      code:       input.code,
      teacher_id: input.teacher_id,
      created_at: Utc::now(),
    };

    let id_str      = encode_uuid(class.id);
    let name        = class.name.clone();
    let code        = class.code.clone();
    let teacher_str = encode_uuid(class.teacher_id);
    let at_str      = encode_dt(class.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO classes (class_id, name, code, teacher_id, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, code, teacher_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(class)
  }

  async fn get_class(&self, id: Uuid) -> Result<Option<TeacherClass>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawClass> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CLASS_COLUMNS} FROM classes WHERE class_id = ?1"),
              rusqlite::params![id_str],
              read_class,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawClass::into_class).transpose()
  }

  async fn find_class_by_code(&self, code: &str) -> Result<Option<TeacherClass>> {
    let code = code.to_owned();

    let raw: Option<RawClass> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CLASS_COLUMNS} FROM classes WHERE code = ?1"),
              rusqlite::params![code],
              read_class,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawClass::into_class).transpose()
  }

  async fn classes_by_teacher(&self, teacher_id: Uuid) -> Result<Vec<TeacherClass>> {
    let id_str = encode_uuid(teacher_id);

    let raws: Vec<RawClass> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CLASS_COLUMNS} FROM classes
           WHERE teacher_id = ?1
           ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], read_class)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClass::into_class).collect()
  }

  async fn enroll_student(
    &self,
    student_id: Uuid,
    class_id:   Uuid,
  ) -> Result<Enrollment> {
    let student_str = encode_uuid(student_id);
    let class_str   = encode_uuid(class_id);
    let at_str      = encode_dt(Utc::now());

    // INSERT OR IGNORE + read-back makes re-joining idempotent: the original
    // joined_at survives.
    let joined_at: String = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO enrollments (student_id, class_id, joined_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![student_str, class_str, at_str],
        )?;

        Ok(conn.query_row(
          "SELECT joined_at FROM enrollments
           WHERE student_id = ?1 AND class_id = ?2",
          rusqlite::params![student_str, class_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(Enrollment {
      student_id,
      class_id,
      joined_at: crate::encode::decode_dt(&joined_at)?,
    })
  }

  async fn delete_class(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM classes WHERE class_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Ok(false);
    }

    // Second write: clear enrollments. Best-effort, not transactional with
    // the class delete.
    let id_str = encode_uuid(id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM enrollments WHERE class_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(true)
  }

  // ── Teacher quizzes ───────────────────────────────────────────────────────

  async fn create_quiz(&self, input: NewTeacherQuiz) -> Result<TeacherQuiz> {
    let quiz = TeacherQuiz {
      id:         Uuid::new_v4(),
      teacher_id: input.teacher_id,
      class_id:   input.class_id,
      title:      input.title,
      country:    input.country,
      difficulty: input.difficulty,
      questions:  input.questions,
      created_at: Utc::now(),
    };

    let id_str         = encode_uuid(quiz.id);
    let teacher_str    = encode_uuid(quiz.teacher_id);
    let class_str      = quiz.class_id.map(encode_uuid);
    let title          = quiz.title.clone();
    let country        = quiz.country.clone();
    let difficulty_str = encode_difficulty(quiz.difficulty).to_owned();
    let questions_str  = encode_questions(&quiz.questions)?;
    let at_str         = encode_dt(quiz.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO teacher_quizzes (
             quiz_id, teacher_id, class_id, title, country,
             difficulty, questions, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            teacher_str,
            class_str,
            title,
            country,
            difficulty_str,
            questions_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(quiz)
  }

  async fn get_quiz(&self, id: Uuid) -> Result<Option<TeacherQuiz>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawQuiz> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {QUIZ_COLUMNS} FROM teacher_quizzes WHERE quiz_id = ?1"
              ),
              rusqlite::params![id_str],
              read_quiz,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawQuiz::into_quiz).transpose()
  }

  async fn quizzes_by_teacher(&self, teacher_id: Uuid) -> Result<Vec<TeacherQuiz>> {
    let id_str = encode_uuid(teacher_id);

    let raws: Vec<RawQuiz> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {QUIZ_COLUMNS} FROM teacher_quizzes
           WHERE teacher_id = ?1
           ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], read_quiz)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuiz::into_quiz).collect()
  }

  async fn quizzes_by_class(&self, class_id: Uuid) -> Result<Vec<TeacherQuiz>> {
    let id_str = encode_uuid(class_id);

    let raws: Vec<RawQuiz> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {QUIZ_COLUMNS} FROM teacher_quizzes
           WHERE class_id = ?1
           ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], read_quiz)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuiz::into_quiz).collect()
  }

  async fn delete_quiz(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM teacher_quizzes WHERE quiz_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Chat ──────────────────────────────────────────────────────────────────

  async fn send_message(&self, input: NewChatMessage) -> Result<ChatMessage> {
    let message = ChatMessage {
      id:          Uuid::new_v4(),
      sender_id:   input.sender_id,
      receiver_id: input.receiver_id,
      body:        input.body,
      kind:        input.kind,
      is_read:     false,
      sent_at:     Utc::now(),
    };

    let id_str       = encode_uuid(message.id);
    let sender_str   = encode_uuid(message.sender_id);
    let receiver_str = encode_uuid(message.receiver_id);
    let body         = message.body.clone();
    let kind_str     = encode_message_kind(message.kind).to_owned();
    let at_str       = encode_dt(message.sent_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO chat_messages (
             message_id, sender_id, receiver_id, body, kind, is_read, sent_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
          rusqlite::params![
            id_str,
            sender_str,
            receiver_str,
            body,
            kind_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(message)
  }

  async fn thread(&self, a: Uuid, b: Uuid) -> Result<Vec<ChatMessage>> {
    let a_str = encode_uuid(a);
    let b_str = encode_uuid(b);

    let raws: Vec<RawMessage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT message_id, sender_id, receiver_id, body, kind, is_read,
                  sent_at
           FROM chat_messages
           WHERE (sender_id = ?1 AND receiver_id = ?2)
              OR (sender_id = ?2 AND receiver_id = ?1)
           ORDER BY sent_at ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![a_str, b_str], read_message)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }

  async fn mark_read(&self, receiver_id: Uuid, sender_id: Uuid) -> Result<u64> {
    let receiver_str = encode_uuid(receiver_id);
    let sender_str   = encode_uuid(sender_id);

    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE chat_messages
           SET is_read = 1
           WHERE receiver_id = ?1 AND sender_id = ?2 AND is_read = 0",
          rusqlite::params![receiver_str, sender_str],
        )?)
      })
      .await?;

    Ok(updated as u64)
  }

  async fn delete_message(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM chat_messages WHERE message_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Notebook ──────────────────────────────────────────────────────────────

  async fn add_note(&self, input: NewNote) -> Result<Note> {
    let note = Note {
      id:          Uuid::new_v4(),
      student_id:  input.student_id,
      phrase:      input.phrase,
      translation: input.translation,
      note_type:   input
        .note_type
        .unwrap_or_else(|| DEFAULT_NOTE_TYPE.to_owned()),
      created_at:  Utc::now(),
    };

    let id_str      = encode_uuid(note.id);
    let student_str = encode_uuid(note.student_id);
    let phrase      = note.phrase.clone();
    let translation = note.translation.clone();
    let note_type   = note.note_type.clone();
    let at_str      = encode_dt(note.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notes (
             note_id, student_id, phrase, translation, note_type, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            student_str,
            phrase,
            translation,
            note_type,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(note)
  }

  async fn notes_for(&self, student_id: Uuid) -> Result<Vec<Note>> {
    let id_str = encode_uuid(student_id);

    let raws: Vec<RawNote> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT note_id, student_id, phrase, translation, note_type,
                  created_at
           FROM notes
           WHERE student_id = ?1
           ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], read_note)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }

  async fn delete_note(&self, note_id: Uuid, student_id: Uuid) -> Result<bool> {
    let note_str    = encode_uuid(note_id);
    let student_str = encode_uuid(student_id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM notes WHERE note_id = ?1 AND student_id = ?2",
          rusqlite::params![note_str, student_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Teacher content ───────────────────────────────────────────────────────

  async fn add_content(&self, input: NewTeacherContent) -> Result<TeacherContent> {
    let content = TeacherContent {
      id:         Uuid::new_v4(),
      teacher_id: input.teacher_id,
      title:      input.title,
      kind:       input.kind,
      body:       input.body,
      created_at: Utc::now(),
    };

    let id_str      = encode_uuid(content.id);
    let teacher_str = encode_uuid(content.teacher_id);
    let title       = content.title.clone();
    let kind_str    = encode_content_kind(content.kind).to_owned();
    let body        = content.body.clone();
    let at_str      = encode_dt(content.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO teacher_content (
             content_id, teacher_id, title, kind, body, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, teacher_str, title, kind_str, body, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(content)
  }

  async fn all_content(&self) -> Result<Vec<TeacherContent>> {
    let raws: Vec<RawContent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT content_id, teacher_id, title, kind, body, created_at
           FROM teacher_content
           ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map([], read_content)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContent::into_content).collect()
  }

  async fn content_by_teacher(
    &self,
    teacher_id: Uuid,
  ) -> Result<Vec<TeacherContent>> {
    let id_str = encode_uuid(teacher_id);

    let raws: Vec<RawContent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT content_id, teacher_id, title, kind, body, created_at
           FROM teacher_content
           WHERE teacher_id = ?1
           ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], read_content)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContent::into_content).collect()
  }

  async fn get_content(&self, id: Uuid) -> Result<Option<TeacherContent>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawContent> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT content_id, teacher_id, title, kind, body, created_at
               FROM teacher_content
               WHERE content_id = ?1",
              rusqlite::params![id_str],
              read_content,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContent::into_content).transpose()
  }

  async fn delete_content(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM teacher_content WHERE content_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Badges ────────────────────────────────────────────────────────────────

  async fn create_badge(&self, input: NewBadge) -> Result<Badge> {
    let badge = Badge {
      id:          Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      icon:        input.icon,
      criteria:    input.criteria,
      xp_reward:   input.xp_reward.unwrap_or(DEFAULT_XP_REWARD),
    };

    let id_str      = encode_uuid(badge.id);
    let name        = badge.name.clone();
    let description = badge.description.clone();
    let icon        = badge.icon.clone();
    let criteria    = badge.criteria.clone();
    let xp_reward   = badge.xp_reward;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO badges (
             badge_id, name, description, icon, criteria, xp_reward
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, description, icon, criteria, xp_reward],
        )?;
        Ok(())
      })
      .await?;

    Ok(badge)
  }

  async fn all_badges(&self) -> Result<Vec<Badge>> {
    let raws: Vec<RawBadge> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {BADGE_COLUMNS} FROM badges"))?;
        let rows = stmt
          .query_map([], read_badge)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBadge::into_badge).collect()
  }

  async fn get_badge(&self, id: Uuid) -> Result<Option<Badge>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawBadge> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {BADGE_COLUMNS} FROM badges WHERE badge_id = ?1"),
              rusqlite::params![id_str],
              read_badge,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawBadge::into_badge).transpose()
  }

  async fn update_badge(
    &self,
    id:    Uuid,
    patch: BadgePatch,
  ) -> Result<Option<Badge>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawBadge> = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE badges
           SET name        = COALESCE(?2, name),
               description = COALESCE(?3, description),
               icon        = COALESCE(?4, icon),
               criteria    = COALESCE(?5, criteria),
               xp_reward   = COALESCE(?6, xp_reward)
           WHERE badge_id = ?1",
          rusqlite::params![
            id_str,
            patch.name,
            patch.description,
            patch.icon,
            patch.criteria,
            patch.xp_reward,
          ],
        )?;

        if updated == 0 {
          return Ok(None);
        }

        Ok(
          conn
            .query_row(
              &format!("SELECT {BADGE_COLUMNS} FROM badges WHERE badge_id = ?1"),
              rusqlite::params![id_str],
              read_badge,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawBadge::into_badge).transpose()
  }

  async fn delete_badge(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM badges WHERE badge_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  // ── Analytics ─────────────────────────────────────────────────────────────

  async fn average_xp(&self) -> Result<i64> {
    let role_str = encode_role(Role::Student).to_owned();

    let avg: Option<f64> = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT AVG(xp) FROM users WHERE role = ?1",
          rusqlite::params![role_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(avg.map(|a| a.round() as i64).unwrap_or(0))
  }

  async fn country_popularity(&self) -> Result<Vec<CountryPopularity>> {
    let role_str = encode_role(Role::Student).to_owned();

    let lists: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT countries_explored FROM users WHERE role = ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![role_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // Each country counts once per student; the per-user lists are already
    // duplicate-free.
    let mut counts: HashMap<String, i64> = HashMap::new();
    for list in lists {
      for country in crate::encode::decode_string_list(&list)? {
        *counts.entry(country).or_insert(0) += 1;
      }
    }

    let mut ranked: Vec<CountryPopularity> = counts
      .into_iter()
      .map(|(country, count)| CountryPopularity { country, count })
      .collect();
    ranked.sort_by(|a, b| {
      b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country))
    });

    Ok(ranked)
  }

  async fn quiz_stats(&self) -> Result<QuizStats> {
    let (count, avg): (i64, Option<f64>) = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*), AVG(score) FROM quiz_attempts",
          [],
          |row| Ok((row.get(0)?, row.get(1)?)),
        )?)
      })
      .await?;

    Ok(QuizStats {
      total_quiz_attempts: count,
      average_score:       avg.map(|a| a.round() as i64).unwrap_or(0),
    })
  }
}
