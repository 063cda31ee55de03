//! The `PlatformStore` trait.
//!
//! Implemented by storage backends (e.g. `helloworld-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.
//!
//! Each method is an atomic unit of work on the backend. Operations that the
//! platform treats as multi-step (a quiz submission writes an attempt and
//! then updates the student; deleting a class removes the class and then its
//! enrollments) are expressed as separate methods or documented as two
//! sequential writes — there is no cross-method transaction.

use std::future::Future;

use uuid::Uuid;

use crate::{
  analytics::{CountryPopularity, QuizStats},
  badge::{Badge, BadgePatch, NewBadge},
  chat::{ChatMessage, NewChatMessage},
  classroom::{Enrollment, NewClass, TeacherClass},
  content::{NewTeacherContent, TeacherContent},
  notebook::{NewNote, Note},
  progress::{
    ClassProgressRow, LeaderboardEntry, ProgressPatch, PronunciationRecord,
  },
  quiz::{NewTeacherQuiz, QuizAttempt, TeacherQuiz},
  user::{NewUser, User},
};

/// Abstraction over a HelloWorld storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PlatformStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Accounts ──────────────────────────────────────────────────────────

  /// Create and persist a new account with zeroed progress counters.
  ///
  /// Returns an error if the email address is already registered; callers
  /// that want a friendly message should check
  /// [`find_user_by_email`](Self::find_user_by_email) first.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve an account by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look up an account by its (unique) email address.
  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  // ── Progress and gamification ─────────────────────────────────────────

  /// Record a quiz attempt and credit the student: XP grows by the raw
  /// `score`, `quizzes_attempted` by one, and `country` is set-inserted
  /// into the explored list.
  ///
  /// The attempt insert and the student update are two sequential writes; a
  /// crash in between leaves an attempt that never credited its student.
  fn submit_quiz_attempt(
    &self,
    student_id: Uuid,
    country: String,
    score: i64,
    total: i64,
  ) -> impl Future<Output = Result<QuizAttempt, Self::Error>> + Send + '_;

  /// A student's quiz attempts, newest first.
  fn quiz_history(
    &self,
    student_id: Uuid,
  ) -> impl Future<Output = Result<Vec<QuizAttempt>, Self::Error>> + Send + '_;

  /// Record a pronunciation attempt and credit the student
  /// [`pronunciation_xp`](crate::progress::pronunciation_xp) XP. The same
  /// two-write shape as [`submit_quiz_attempt`](Self::submit_quiz_attempt).
  fn submit_pronunciation(
    &self,
    student_id: Uuid,
    phrase: String,
    accuracy: i64,
  ) -> impl Future<Output = Result<PronunciationRecord, Self::Error>> + Send + '_;

  /// A student's pronunciation attempts, newest first.
  fn pronunciation_history(
    &self,
    student_id: Uuid,
  ) -> impl Future<Output = Result<Vec<PronunciationRecord>, Self::Error>>
  + Send
  + '_;

  /// Apply a merge-patch to a student's progress counters and return the
  /// updated account. Returns `None` if the account does not exist.
  fn update_progress(
    &self,
    user_id: Uuid,
    patch: ProgressPatch,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// The top `limit` students by XP, descending. Ties rank the older
  /// account first. Teachers never appear.
  fn leaderboard(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<LeaderboardEntry>, Self::Error>>
  + Send
  + '_;

  /// Per-student progress for everyone enrolled in a class, ordered like
  /// the leaderboard. Empty if the class does not exist.
  fn class_progress(
    &self,
    class_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ClassProgressRow>, Self::Error>>
  + Send
  + '_;

  // ── Classes ───────────────────────────────────────────────────────────

  /// Persist a new class. The join code must be unique; the store rejects
  /// duplicates.
  fn create_class(
    &self,
    input: NewClass,
  ) -> impl Future<Output = Result<TeacherClass, Self::Error>> + Send + '_;

  fn get_class(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<TeacherClass>, Self::Error>>
  + Send
  + '_;

  /// Look up a class by its join code.
  fn find_class_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<TeacherClass>, Self::Error>>
  + Send
  + 'a;

  /// All classes owned by a teacher, newest first.
  fn classes_by_teacher(
    &self,
    teacher_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TeacherClass>, Self::Error>> + Send + '_;

  /// Enroll a student in a class. Idempotent: re-joining returns the
  /// existing enrollment unchanged.
  fn enroll_student(
    &self,
    student_id: Uuid,
    class_id: Uuid,
  ) -> impl Future<Output = Result<Enrollment, Self::Error>> + Send + '_;

  /// Delete a class and then its enrollments (two sequential writes).
  /// Quizzes pinned to the class are left in place. Returns `false` if the
  /// class did not exist.
  fn delete_class(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Teacher quizzes ───────────────────────────────────────────────────

  fn create_quiz(
    &self,
    input: NewTeacherQuiz,
  ) -> impl Future<Output = Result<TeacherQuiz, Self::Error>> + Send + '_;

  fn get_quiz(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<TeacherQuiz>, Self::Error>>
  + Send
  + '_;

  /// All quizzes authored by a teacher, newest first.
  fn quizzes_by_teacher(
    &self,
    teacher_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TeacherQuiz>, Self::Error>> + Send + '_;

  /// All quizzes pinned to a class, newest first.
  fn quizzes_by_class(
    &self,
    class_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TeacherQuiz>, Self::Error>> + Send + '_;

  /// Returns `false` if the quiz did not exist.
  fn delete_quiz(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Chat ──────────────────────────────────────────────────────────────

  /// Persist a message. It starts unread. The receiver id is taken as
  /// given; the store does not require it to name an existing account.
  fn send_message(
    &self,
    input: NewChatMessage,
  ) -> impl Future<Output = Result<ChatMessage, Self::Error>> + Send + '_;

  /// Every message between two users, in both directions, oldest first.
  fn thread(
    &self,
    a: Uuid,
    b: Uuid,
  ) -> impl Future<Output = Result<Vec<ChatMessage>, Self::Error>> + Send + '_;

  /// Mark all messages from `sender_id` to `receiver_id` as read. Returns
  /// the number of messages updated; already-read messages make this 0,
  /// which is still success.
  fn mark_read(
    &self,
    receiver_id: Uuid,
    sender_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Returns `false` if the message did not exist.
  fn delete_message(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Notebook ──────────────────────────────────────────────────────────

  fn add_note(
    &self,
    input: NewNote,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  /// A student's notes, newest first.
  fn notes_for(
    &self,
    student_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  /// Delete a note, but only if `student_id` owns it. Returns `false` when
  /// the note does not exist or belongs to someone else; callers cannot
  /// tell the two apart.
  fn delete_note(
    &self,
    note_id: Uuid,
    student_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Teacher content ───────────────────────────────────────────────────

  fn add_content(
    &self,
    input: NewTeacherContent,
  ) -> impl Future<Output = Result<TeacherContent, Self::Error>> + Send + '_;

  /// Every published item from every teacher, newest first.
  fn all_content(
    &self,
  ) -> impl Future<Output = Result<Vec<TeacherContent>, Self::Error>>
  + Send
  + '_;

  /// One teacher's published items, newest first.
  fn content_by_teacher(
    &self,
    teacher_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TeacherContent>, Self::Error>>
  + Send
  + '_;

  fn get_content(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<TeacherContent>, Self::Error>>
  + Send
  + '_;

  /// Returns `false` if the content did not exist.
  fn delete_content(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Badges ────────────────────────────────────────────────────────────

  /// Persist a badge definition. A missing XP reward defaults to
  /// [`DEFAULT_XP_REWARD`](crate::badge::DEFAULT_XP_REWARD).
  fn create_badge(
    &self,
    input: NewBadge,
  ) -> impl Future<Output = Result<Badge, Self::Error>> + Send + '_;

  fn all_badges(
    &self,
  ) -> impl Future<Output = Result<Vec<Badge>, Self::Error>> + Send + '_;

  fn get_badge(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Badge>, Self::Error>> + Send + '_;

  /// Apply a merge-patch to a badge definition and return the updated
  /// badge. Returns `None` if the badge does not exist.
  fn update_badge(
    &self,
    id: Uuid,
    patch: BadgePatch,
  ) -> impl Future<Output = Result<Option<Badge>, Self::Error>> + Send + '_;

  /// Returns `false` if the badge did not exist.
  fn delete_badge(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Analytics ─────────────────────────────────────────────────────────

  /// Rounded mean XP across all student accounts; `0` when there are none.
  fn average_xp(
    &self,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Countries by how many students explored them, most popular first.
  /// Ties order alphabetically so the ranking is stable.
  fn country_popularity(
    &self,
  ) -> impl Future<Output = Result<Vec<CountryPopularity>, Self::Error>>
  + Send
  + '_;

  /// Attempt count and rounded mean score across all quiz attempts.
  fn quiz_stats(
    &self,
  ) -> impl Future<Output = Result<QuizStats, Self::Error>> + Send + '_;
}
