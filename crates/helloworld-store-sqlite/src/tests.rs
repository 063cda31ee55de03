//! Integration tests for `SqliteStore` against an in-memory database.

use helloworld_core::{
  badge::NewBadge,
  chat::{MessageKind, NewChatMessage},
  classroom::NewClass,
  content::{ContentKind, NewTeacherContent},
  notebook::NewNote,
  progress::ProgressPatch,
  quiz::{Difficulty, NewTeacherQuiz, Question},
  store::PlatformStore,
  user::{NewUser, Role, User},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn add_student(s: &SqliteStore, name: &str, email: &str) -> User {
  s.add_user(NewUser {
    name:          name.into(),
    email:         email.into(),
    password_hash: "$argon2id$stub".into(),
    role:          Role::Student,
  })
  .await
  .unwrap()
}

async fn add_teacher(s: &SqliteStore, name: &str, email: &str) -> User {
  s.add_user(NewUser {
    name:          name.into(),
    email:         email.into(),
    password_hash: "$argon2id$stub".into(),
    role:          Role::Teacher,
  })
  .await
  .unwrap()
}

fn xp_patch(xp: i64) -> ProgressPatch {
  ProgressPatch { xp: Some(xp), ..Default::default() }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;

  let user = add_student(&s, "Aiko", "aiko@example.com").await;
  assert_eq!(user.role, Role::Student);
  assert_eq!(user.xp, 0);
  assert_eq!(user.level, 1);
  assert_eq!(user.quizzes_attempted, 0);
  assert!(user.countries_explored.is_empty());

  let fetched = s.get_user(user.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, user.id);
  assert_eq!(fetched.name, "Aiko");
  assert_eq!(fetched.email, "aiko@example.com");
  assert_eq!(fetched.password_hash, "$argon2id$stub");
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn find_user_by_email() {
  let s = store().await;
  let user = add_student(&s, "Aiko", "aiko@example.com").await;

  let found = s.find_user_by_email("aiko@example.com").await.unwrap();
  assert_eq!(found.unwrap().id, user.id);

  let missing = s.find_user_by_email("nobody@example.com").await.unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
  let s = store().await;
  add_student(&s, "Aiko", "aiko@example.com").await;

  let err = s
    .add_user(NewUser {
      name:          "Imposter".into(),
      email:         "aiko@example.com".into(),
      password_hash: "$argon2id$stub".into(),
      role:          Role::Teacher,
    })
    .await;
  assert!(err.is_err());
}

// ─── Quiz attempts ───────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_attempt_credits_student() {
  let s = store().await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  let attempt = s
    .submit_quiz_attempt(student.id, "Japan".into(), 8, 10)
    .await
    .unwrap();
  assert_eq!(attempt.student_id, student.id);
  assert_eq!(attempt.score, 8);

  let after = s.get_user(student.id).await.unwrap().unwrap();
  assert_eq!(after.xp, 8);
  assert_eq!(after.quizzes_attempted, 1);
  assert_eq!(after.countries_explored, &["Japan"]);
}

#[tokio::test]
async fn repeat_country_is_not_duplicated() {
  let s = store().await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  s.submit_quiz_attempt(student.id, "Japan".into(), 8, 10)
    .await
    .unwrap();
  s.submit_quiz_attempt(student.id, "Japan".into(), 5, 10)
    .await
    .unwrap();
  s.submit_quiz_attempt(student.id, "Mexico".into(), 3, 5)
    .await
    .unwrap();

  let after = s.get_user(student.id).await.unwrap().unwrap();
  assert_eq!(after.xp, 16);
  assert_eq!(after.quizzes_attempted, 3);
  assert_eq!(after.countries_explored, &["Japan", "Mexico"]);
}

#[tokio::test]
async fn quiz_history_is_newest_first() {
  let s = store().await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  s.submit_quiz_attempt(student.id, "Japan".into(), 1, 5)
    .await
    .unwrap();
  s.submit_quiz_attempt(student.id, "Mexico".into(), 2, 5)
    .await
    .unwrap();
  s.submit_quiz_attempt(student.id, "Kenya".into(), 3, 5)
    .await
    .unwrap();

  let history = s.quiz_history(student.id).await.unwrap();
  let countries: Vec<_> =
    history.iter().map(|a| a.country.as_str()).collect();
  assert_eq!(countries, &["Kenya", "Mexico", "Japan"]);
}

// ─── Pronunciation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn pronunciation_awards_rounded_xp() {
  let s = store().await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  s.submit_pronunciation(student.id, "konnichiwa".into(), 85)
    .await
    .unwrap();
  let after = s.get_user(student.id).await.unwrap().unwrap();
  assert_eq!(after.xp, 9);

  s.submit_pronunciation(student.id, "arigatou".into(), 75)
    .await
    .unwrap();
  let after = s.get_user(student.id).await.unwrap().unwrap();
  assert_eq!(after.xp, 17);

  // Pronunciation does not touch the quiz counter or country set.
  assert_eq!(after.quizzes_attempted, 0);
  assert!(after.countries_explored.is_empty());
}

#[tokio::test]
async fn pronunciation_history_is_newest_first() {
  let s = store().await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  s.submit_pronunciation(student.id, "hola".into(), 60)
    .await
    .unwrap();
  s.submit_pronunciation(student.id, "gracias".into(), 90)
    .await
    .unwrap();

  let history = s.pronunciation_history(student.id).await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].phrase, "gracias");
  assert_eq!(history[0].accuracy, 90);
  assert_eq!(history[1].phrase, "hola");
}

// ─── Progress patch ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_progress_merges_only_given_fields() {
  let s = store().await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  s.update_progress(
    student.id,
    ProgressPatch {
      xp:          Some(40),
      streak_days: Some(3),
      ..Default::default()
    },
  )
  .await
  .unwrap();

  let updated = s
    .update_progress(
      student.id,
      ProgressPatch {
        level:  Some(2),
        badges: Some(vec!["Explorer".into()]),
        ..Default::default()
      },
    )
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.xp, 40);
  assert_eq!(updated.streak_days, 3);
  assert_eq!(updated.level, 2);
  assert_eq!(updated.badges, &["Explorer"]);
  assert_eq!(updated.quizzes_attempted, 0);
}

#[tokio::test]
async fn update_progress_missing_user_returns_none() {
  let s = store().await;
  let result = s.update_progress(Uuid::new_v4(), xp_patch(10)).await.unwrap();
  assert!(result.is_none());
}

// ─── Leaderboard ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn leaderboard_orders_by_xp_and_limits() {
  let s = store().await;
  let a = add_student(&s, "A", "a@example.com").await;
  let b = add_student(&s, "B", "b@example.com").await;
  let c = add_student(&s, "C", "c@example.com").await;

  s.update_progress(a.id, xp_patch(10)).await.unwrap();
  s.update_progress(b.id, xp_patch(30)).await.unwrap();
  s.update_progress(c.id, xp_patch(20)).await.unwrap();

  let top = s.leaderboard(2).await.unwrap();
  assert_eq!(top.len(), 2);
  assert_eq!(top[0].name, "B");
  assert_eq!(top[0].xp, 30);
  assert_eq!(top[1].name, "C");
}

#[tokio::test]
async fn leaderboard_tie_ranks_older_account_first() {
  let s = store().await;
  let first = add_student(&s, "First", "first@example.com").await;
  let second = add_student(&s, "Second", "second@example.com").await;

  s.update_progress(first.id, xp_patch(25)).await.unwrap();
  s.update_progress(second.id, xp_patch(25)).await.unwrap();

  let top = s.leaderboard(10).await.unwrap();
  assert_eq!(top[0].student_id, first.id);
  assert_eq!(top[1].student_id, second.id);
}

#[tokio::test]
async fn leaderboard_excludes_teachers() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  s.update_progress(teacher.id, xp_patch(999)).await.unwrap();
  s.update_progress(student.id, xp_patch(5)).await.unwrap();

  let top = s.leaderboard(10).await.unwrap();
  assert_eq!(top.len(), 1);
  assert_eq!(top[0].student_id, student.id);
}

// ─── Classes and enrollment ──────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_class_by_code() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;

  let class = s
    .create_class(NewClass {
      name:       "Japanese 101".into(),
      code:       "AB23CD".into(),
      teacher_id: teacher.id,
    })
    .await
    .unwrap();

  let found = s.find_class_by_code("AB23CD").await.unwrap().unwrap();
  assert_eq!(found.id, class.id);
  assert_eq!(found.name, "Japanese 101");
  assert_eq!(found.teacher_id, teacher.id);

  assert!(s.find_class_by_code("ZZZZZZ").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_join_code_is_rejected() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;

  s.create_class(NewClass {
    name:       "First".into(),
    code:       "SAME01".into(),
    teacher_id: teacher.id,
  })
  .await
  .unwrap();

  let err = s
    .create_class(NewClass {
      name:       "Second".into(),
      code:       "SAME01".into(),
      teacher_id: teacher.id,
    })
    .await;
  assert!(err.is_err());
}

#[tokio::test]
async fn classes_by_teacher_newest_first() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let other = add_teacher(&s, "Other", "other@example.com").await;

  s.create_class(NewClass {
    name:       "Older".into(),
    code:       "AAAA11".into(),
    teacher_id: teacher.id,
  })
  .await
  .unwrap();
  s.create_class(NewClass {
    name:       "Newer".into(),
    code:       "BBBB22".into(),
    teacher_id: teacher.id,
  })
  .await
  .unwrap();
  s.create_class(NewClass {
    name:       "Unrelated".into(),
    code:       "CCCC33".into(),
    teacher_id: other.id,
  })
  .await
  .unwrap();

  let classes = s.classes_by_teacher(teacher.id).await.unwrap();
  let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, &["Newer", "Older"]);
}

#[tokio::test]
async fn enrolling_twice_keeps_a_single_row() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;
  let class = s
    .create_class(NewClass {
      name:       "Japanese 101".into(),
      code:       "AB23CD".into(),
      teacher_id: teacher.id,
    })
    .await
    .unwrap();

  let first = s.enroll_student(student.id, class.id).await.unwrap();
  let second = s.enroll_student(student.id, class.id).await.unwrap();
  assert_eq!(first.joined_at, second.joined_at);

  let rows = s.class_progress(class.id).await.unwrap();
  assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn delete_class_removes_enrollments() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;
  let class = s
    .create_class(NewClass {
      name:       "Japanese 101".into(),
      code:       "AB23CD".into(),
      teacher_id: teacher.id,
    })
    .await
    .unwrap();
  s.enroll_student(student.id, class.id).await.unwrap();

  assert!(s.delete_class(class.id).await.unwrap());
  assert!(s.get_class(class.id).await.unwrap().is_none());
  assert!(s.class_progress(class.id).await.unwrap().is_empty());

  // Already gone: reports false rather than erroring.
  assert!(!s.delete_class(class.id).await.unwrap());
}

// ─── Class progress ──────────────────────────────────────────────────────────

#[tokio::test]
async fn class_progress_reports_zeros_for_inactive_students() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let student = add_student(&s, "Fresh", "fresh@example.com").await;
  let class = s
    .create_class(NewClass {
      name:       "Japanese 101".into(),
      code:       "AB23CD".into(),
      teacher_id: teacher.id,
    })
    .await
    .unwrap();
  s.enroll_student(student.id, class.id).await.unwrap();

  let rows = s.class_progress(class.id).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].name, "Fresh");
  assert_eq!(rows[0].xp, 0);
  assert_eq!(rows[0].total_quizzes, 0);
  assert_eq!(rows[0].avg_score, 0);
  assert!(rows[0].explored_countries.is_empty());
}

#[tokio::test]
async fn class_progress_aggregates_and_orders_by_xp() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let strong = add_student(&s, "Strong", "strong@example.com").await;
  let weak = add_student(&s, "Weak", "weak@example.com").await;
  let class = s
    .create_class(NewClass {
      name:       "Japanese 101".into(),
      code:       "AB23CD".into(),
      teacher_id: teacher.id,
    })
    .await
    .unwrap();
  s.enroll_student(strong.id, class.id).await.unwrap();
  s.enroll_student(weak.id, class.id).await.unwrap();

  s.submit_quiz_attempt(strong.id, "Japan".into(), 8, 10)
    .await
    .unwrap();
  s.submit_quiz_attempt(strong.id, "Mexico".into(), 7, 10)
    .await
    .unwrap();
  s.submit_quiz_attempt(weak.id, "Japan".into(), 2, 10)
    .await
    .unwrap();

  let rows = s.class_progress(class.id).await.unwrap();
  assert_eq!(rows.len(), 2);

  assert_eq!(rows[0].name, "Strong");
  assert_eq!(rows[0].xp, 15);
  assert_eq!(rows[0].total_quizzes, 2);
  assert_eq!(rows[0].avg_score, 8); // (8 + 7) / 2 = 7.5, rounded up
  assert_eq!(rows[0].explored_countries, &["Japan", "Mexico"]);

  assert_eq!(rows[1].name, "Weak");
  assert_eq!(rows[1].avg_score, 2);
}

// ─── Teacher quizzes ─────────────────────────────────────────────────────────

fn sample_questions() -> Vec<Question> {
  vec![Question {
    text:           "Capital of Japan?".into(),
    options:        vec!["Tokyo".into(), "Kyoto".into(), "Osaka".into()],
    correct_answer: "Tokyo".into(),
  }]
}

#[tokio::test]
async fn quiz_round_trips_questions() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;

  let quiz = s
    .create_quiz(NewTeacherQuiz {
      teacher_id: teacher.id,
      class_id:   None,
      title:      "Japan basics".into(),
      country:    "Japan".into(),
      difficulty: Difficulty::Medium,
      questions:  sample_questions(),
    })
    .await
    .unwrap();

  let fetched = s.get_quiz(quiz.id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Japan basics");
  assert_eq!(fetched.difficulty, Difficulty::Medium);
  assert_eq!(fetched.questions.len(), 1);
  assert_eq!(fetched.questions[0].correct_answer, "Tokyo");
  assert!(fetched.class_id.is_none());
}

#[tokio::test]
async fn quizzes_by_teacher_and_class() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let class = s
    .create_class(NewClass {
      name:       "Japanese 101".into(),
      code:       "AB23CD".into(),
      teacher_id: teacher.id,
    })
    .await
    .unwrap();

  s.create_quiz(NewTeacherQuiz {
    teacher_id: teacher.id,
    class_id:   Some(class.id),
    title:      "For the class".into(),
    country:    "Japan".into(),
    difficulty: Difficulty::Easy,
    questions:  sample_questions(),
  })
  .await
  .unwrap();
  s.create_quiz(NewTeacherQuiz {
    teacher_id: teacher.id,
    class_id:   None,
    title:      "Unpinned".into(),
    country:    "Mexico".into(),
    difficulty: Difficulty::Easy,
    questions:  vec![],
  })
  .await
  .unwrap();

  let mine = s.quizzes_by_teacher(teacher.id).await.unwrap();
  assert_eq!(mine.len(), 2);

  let for_class = s.quizzes_by_class(class.id).await.unwrap();
  assert_eq!(for_class.len(), 1);
  assert_eq!(for_class[0].title, "For the class");
}

#[tokio::test]
async fn delete_quiz_reports_existence() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;

  let quiz = s
    .create_quiz(NewTeacherQuiz {
      teacher_id: teacher.id,
      class_id:   None,
      title:      "Doomed".into(),
      country:    "Japan".into(),
      difficulty: Difficulty::Easy,
      questions:  vec![],
    })
    .await
    .unwrap();

  assert!(s.delete_quiz(quiz.id).await.unwrap());
  assert!(s.get_quiz(quiz.id).await.unwrap().is_none());
  assert!(!s.delete_quiz(quiz.id).await.unwrap());
}

// ─── Chat ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn thread_spans_both_directions_oldest_first() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  s.send_message(NewChatMessage {
    sender_id:   teacher.id,
    receiver_id: student.id,
    body:        "Well done on the quiz".into(),
    kind:        MessageKind::Feedback,
  })
  .await
  .unwrap();
  s.send_message(NewChatMessage {
    sender_id:   student.id,
    receiver_id: teacher.id,
    body:        "Thank you!".into(),
    kind:        MessageKind::Question,
  })
  .await
  .unwrap();

  let thread = s.thread(teacher.id, student.id).await.unwrap();
  assert_eq!(thread.len(), 2);
  assert_eq!(thread[0].body, "Well done on the quiz");
  assert!(!thread[0].is_read);
  assert_eq!(thread[1].sender_id, student.id);

  // Same thread regardless of argument order.
  let reversed = s.thread(student.id, teacher.id).await.unwrap();
  assert_eq!(reversed.len(), 2);
}

#[tokio::test]
async fn mark_read_flips_one_direction_only() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  s.send_message(NewChatMessage {
    sender_id:   teacher.id,
    receiver_id: student.id,
    body:        "One".into(),
    kind:        MessageKind::Feedback,
  })
  .await
  .unwrap();
  s.send_message(NewChatMessage {
    sender_id:   student.id,
    receiver_id: teacher.id,
    body:        "Two".into(),
    kind:        MessageKind::Feedback,
  })
  .await
  .unwrap();

  // The student reads everything the teacher sent them.
  let updated = s.mark_read(student.id, teacher.id).await.unwrap();
  assert_eq!(updated, 1);

  let thread = s.thread(teacher.id, student.id).await.unwrap();
  let from_teacher = thread.iter().find(|m| m.sender_id == teacher.id).unwrap();
  let from_student = thread.iter().find(|m| m.sender_id == student.id).unwrap();
  assert!(from_teacher.is_read);
  assert!(!from_student.is_read);

  // Idempotent: nothing left to update.
  assert_eq!(s.mark_read(student.id, teacher.id).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_message_reports_existence() {
  let s = store().await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  let message = s
    .send_message(NewChatMessage {
      sender_id:   teacher.id,
      receiver_id: student.id,
      body:        "Oops".into(),
      kind:        MessageKind::Feedback,
    })
    .await
    .unwrap();

  assert!(s.delete_message(message.id).await.unwrap());
  assert!(!s.delete_message(message.id).await.unwrap());
  assert!(s.thread(teacher.id, student.id).await.unwrap().is_empty());
}

// ─── Notebook ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn note_type_defaults_to_ai_chat() {
  let s = store().await;
  let student = add_student(&s, "Aiko", "aiko@example.com").await;

  let defaulted = s
    .add_note(NewNote {
      student_id:  student.id,
      phrase:      "konnichiwa".into(),
      translation: Some("hello".into()),
      note_type:   None,
    })
    .await
    .unwrap();
  assert_eq!(defaulted.note_type, "AI Chat");

  let labelled = s
    .add_note(NewNote {
      student_id:  student.id,
      phrase:      "sayonara".into(),
      translation: None,
      note_type:   Some("Lesson".into()),
    })
    .await
    .unwrap();
  assert_eq!(labelled.note_type, "Lesson");

  let notes = s.notes_for(student.id).await.unwrap();
  assert_eq!(notes.len(), 2);
  assert_eq!(notes[0].phrase, "sayonara"); // newest first
}

#[tokio::test]
async fn delete_note_is_scoped_to_owner() {
  let s = store().await;
  let owner = add_student(&s, "Owner", "owner@example.com").await;
  let other = add_student(&s, "Other", "other@example.com").await;

  let note = s
    .add_note(NewNote {
      student_id:  owner.id,
      phrase:      "mine".into(),
      translation: None,
      note_type:   None,
    })
    .await
    .unwrap();

  assert!(!s.delete_note(note.id, other.id).await.unwrap());
  assert_eq!(s.notes_for(owner.id).await.unwrap().len(), 1);

  assert!(s.delete_note(note.id, owner.id).await.unwrap());
  assert!(s.notes_for(owner.id).await.unwrap().is_empty());
}

// ─── Teacher content ─────────────────────────────────────────────────────────

#[tokio::test]
async fn content_listings_and_delete() {
  let s = store().await;
  let one = add_teacher(&s, "One", "one@example.com").await;
  let two = add_teacher(&s, "Two", "two@example.com").await;

  s.add_content(NewTeacherContent {
    teacher_id: one.id,
    title:      "Older fact".into(),
    kind:       ContentKind::Fact,
    body:       "Japan has 47 prefectures.".into(),
  })
  .await
  .unwrap();
  let newer = s
    .add_content(NewTeacherContent {
      teacher_id: two.id,
      title:      "Newer challenge".into(),
      kind:       ContentKind::Challenge,
      body:       "Order food in Spanish.".into(),
    })
    .await
    .unwrap();

  let all = s.all_content().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].title, "Newer challenge");

  let only_one = s.content_by_teacher(one.id).await.unwrap();
  assert_eq!(only_one.len(), 1);
  assert_eq!(only_one[0].kind, ContentKind::Fact);

  assert!(s.delete_content(newer.id).await.unwrap());
  assert!(s.get_content(newer.id).await.unwrap().is_none());
  assert!(!s.delete_content(newer.id).await.unwrap());
}

// ─── Badges ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn badge_xp_reward_defaults_to_fifty() {
  let s = store().await;

  let badge = s
    .create_badge(NewBadge {
      name:        "Explorer".into(),
      description: Some("Visit five countries".into()),
      icon:        None,
      criteria:    Some("countriesExplored >= 5".into()),
      xp_reward:   None,
    })
    .await
    .unwrap();
  assert_eq!(badge.xp_reward, 50);

  let custom = s
    .create_badge(NewBadge {
      name:        "Marathon".into(),
      description: None,
      icon:        None,
      criteria:    None,
      xp_reward:   Some(200),
    })
    .await
    .unwrap();
  assert_eq!(custom.xp_reward, 200);

  assert_eq!(s.all_badges().await.unwrap().len(), 2);
}

#[tokio::test]
async fn badge_patch_updates_only_given_fields() {
  let s = store().await;

  let badge = s
    .create_badge(NewBadge {
      name:        "Explorer".into(),
      description: Some("Visit five countries".into()),
      icon:        None,
      criteria:    None,
      xp_reward:   Some(75),
    })
    .await
    .unwrap();

  let updated = s
    .update_badge(
      badge.id,
      helloworld_core::badge::BadgePatch {
        name: Some("Globetrotter".into()),
        ..Default::default()
      },
    )
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.name, "Globetrotter");
  assert_eq!(updated.description.as_deref(), Some("Visit five countries"));
  assert_eq!(updated.xp_reward, 75);

  let missing = s
    .update_badge(Uuid::new_v4(), Default::default())
    .await
    .unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn delete_badge_reports_existence() {
  let s = store().await;

  let badge = s
    .create_badge(NewBadge {
      name:        "Doomed".into(),
      description: None,
      icon:        None,
      criteria:    None,
      xp_reward:   None,
    })
    .await
    .unwrap();

  assert!(s.delete_badge(badge.id).await.unwrap());
  assert!(s.get_badge(badge.id).await.unwrap().is_none());
  assert!(!s.delete_badge(badge.id).await.unwrap());
}

// ─── Analytics ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn average_xp_rounds_and_ignores_teachers() {
  let s = store().await;
  assert_eq!(s.average_xp().await.unwrap(), 0);

  let a = add_student(&s, "A", "a@example.com").await;
  let b = add_student(&s, "B", "b@example.com").await;
  let teacher = add_teacher(&s, "Sensei", "sensei@example.com").await;

  s.update_progress(a.id, xp_patch(10)).await.unwrap();
  s.update_progress(b.id, xp_patch(15)).await.unwrap();
  s.update_progress(teacher.id, xp_patch(1000)).await.unwrap();

  // (10 + 15) / 2 = 12.5, rounded up.
  assert_eq!(s.average_xp().await.unwrap(), 13);
}

#[tokio::test]
async fn country_popularity_counts_each_student_once() {
  let s = store().await;
  let a = add_student(&s, "A", "a@example.com").await;
  let b = add_student(&s, "B", "b@example.com").await;

  s.submit_quiz_attempt(a.id, "Japan".into(), 5, 10).await.unwrap();
  s.submit_quiz_attempt(a.id, "Japan".into(), 7, 10).await.unwrap();
  s.submit_quiz_attempt(a.id, "Mexico".into(), 4, 10).await.unwrap();
  s.submit_quiz_attempt(b.id, "Japan".into(), 6, 10).await.unwrap();

  let ranked = s.country_popularity().await.unwrap();
  assert_eq!(ranked.len(), 2);
  assert_eq!(ranked[0].country, "Japan");
  assert_eq!(ranked[0].count, 2);
  assert_eq!(ranked[1].country, "Mexico");
  assert_eq!(ranked[1].count, 1);
}

#[tokio::test]
async fn country_popularity_breaks_ties_alphabetically() {
  let s = store().await;
  let a = add_student(&s, "A", "a@example.com").await;

  s.submit_quiz_attempt(a.id, "Mexico".into(), 5, 10).await.unwrap();
  s.submit_quiz_attempt(a.id, "Japan".into(), 5, 10).await.unwrap();

  let ranked = s.country_popularity().await.unwrap();
  let countries: Vec<_> = ranked.iter().map(|c| c.country.as_str()).collect();
  assert_eq!(countries, &["Japan", "Mexico"]);
}

#[tokio::test]
async fn quiz_stats_counts_and_rounds() {
  let s = store().await;

  let empty = s.quiz_stats().await.unwrap();
  assert_eq!(empty.total_quiz_attempts, 0);
  assert_eq!(empty.average_score, 0);

  let a = add_student(&s, "A", "a@example.com").await;
  s.submit_quiz_attempt(a.id, "Japan".into(), 5, 10).await.unwrap();
  s.submit_quiz_attempt(a.id, "Mexico".into(), 10, 10).await.unwrap();

  let stats = s.quiz_stats().await.unwrap();
  assert_eq!(stats.total_quiz_attempts, 2);
  assert_eq!(stats.average_score, 8); // 7.5 rounded up
}
