//! SQL schema for the HelloWorld SQLite store.
//!
//! Executed at every connection startup. `PRAGMA user_version` records the
//! schema revision; future migrations will be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id            TEXT PRIMARY KEY,
    name               TEXT NOT NULL,
    email              TEXT NOT NULL UNIQUE,
    password_hash      TEXT NOT NULL,   -- argon2 PHC string
    role               TEXT NOT NULL,   -- 'student' | 'teacher'
    xp                 INTEGER NOT NULL DEFAULT 0,
    level              INTEGER NOT NULL DEFAULT 1,
    streak_days        INTEGER NOT NULL DEFAULT 0,
    quizzes_attempted  INTEGER NOT NULL DEFAULT 0,
    ai_chats_completed INTEGER NOT NULL DEFAULT 0,
    countries_explored TEXT NOT NULL DEFAULT '[]',  -- JSON array, no dupes
    badges             TEXT NOT NULL DEFAULT '[]',  -- JSON array of names
    created_at         TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS classes (
    class_id   TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    code       TEXT NOT NULL UNIQUE,    -- six-character join code
    teacher_id TEXT NOT NULL REFERENCES users(user_id),
    created_at TEXT NOT NULL
);

-- One row per (student, class). Deleting a class removes the class row and
-- then these rows in two separate statements, so class_id carries no FK.
CREATE TABLE IF NOT EXISTS enrollments (
    student_id TEXT NOT NULL REFERENCES users(user_id),
    class_id   TEXT NOT NULL,
    joined_at  TEXT NOT NULL,
    PRIMARY KEY (student_id, class_id)
);

-- class_id has no FK: a quiz keeps its class link after the class is gone.
CREATE TABLE IF NOT EXISTS teacher_quizzes (
    quiz_id    TEXT PRIMARY KEY,
    teacher_id TEXT NOT NULL REFERENCES users(user_id),
    class_id   TEXT,
    title      TEXT NOT NULL,
    country    TEXT NOT NULL,
    difficulty TEXT NOT NULL DEFAULT 'easy',  -- 'easy' | 'medium' | 'hard'
    questions  TEXT NOT NULL DEFAULT '[]',    -- JSON array of questions
    created_at TEXT NOT NULL
);

-- Attempts are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS quiz_attempts (
    attempt_id  TEXT PRIMARY KEY,
    student_id  TEXT NOT NULL REFERENCES users(user_id),
    country     TEXT NOT NULL,
    score       INTEGER NOT NULL,   -- raw points, credited to XP as-is
    total       INTEGER NOT NULL,
    recorded_at TEXT NOT NULL
);

-- Append-only, like quiz_attempts.
CREATE TABLE IF NOT EXISTS pronunciations (
    pronunciation_id TEXT PRIMARY KEY,
    student_id       TEXT NOT NULL REFERENCES users(user_id),
    phrase           TEXT NOT NULL,
    accuracy         INTEGER NOT NULL,   -- 0..=100
    recorded_at      TEXT NOT NULL
);

-- receiver_id carries no FK: the sender may name any id.
CREATE TABLE IF NOT EXISTS chat_messages (
    message_id  TEXT PRIMARY KEY,
    sender_id   TEXT NOT NULL REFERENCES users(user_id),
    receiver_id TEXT NOT NULL,
    body        TEXT NOT NULL,
    kind        TEXT NOT NULL DEFAULT 'feedback',  -- 'feedback' | 'question'
    is_read     INTEGER NOT NULL DEFAULT 0,
    sent_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notes (
    note_id     TEXT PRIMARY KEY,
    student_id  TEXT NOT NULL REFERENCES users(user_id),
    phrase      TEXT NOT NULL,
    translation TEXT,
    note_type   TEXT NOT NULL DEFAULT 'AI Chat',
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teacher_content (
    content_id TEXT PRIMARY KEY,
    teacher_id TEXT NOT NULL REFERENCES users(user_id),
    title      TEXT NOT NULL,
    kind       TEXT NOT NULL,   -- 'fact' | 'challenge' | 'resource'
    body       TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS badges (
    badge_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    icon        TEXT,
    criteria    TEXT,
    xp_reward   INTEGER NOT NULL DEFAULT 50
);

CREATE INDEX IF NOT EXISTS users_role_xp_idx        ON users(role, xp);
CREATE INDEX IF NOT EXISTS classes_teacher_idx      ON classes(teacher_id);
CREATE INDEX IF NOT EXISTS enrollments_class_idx    ON enrollments(class_id);
CREATE INDEX IF NOT EXISTS quizzes_teacher_idx      ON teacher_quizzes(teacher_id);
CREATE INDEX IF NOT EXISTS quizzes_class_idx        ON teacher_quizzes(class_id);
CREATE INDEX IF NOT EXISTS attempts_student_idx     ON quiz_attempts(student_id);
CREATE INDEX IF NOT EXISTS pronunciation_student_idx ON pronunciations(student_id);
CREATE INDEX IF NOT EXISTS chat_pair_idx            ON chat_messages(sender_id, receiver_id);
CREATE INDEX IF NOT EXISTS notes_student_idx        ON notes(student_id);
CREATE INDEX IF NOT EXISTS content_teacher_idx      ON teacher_content(teacher_id);

PRAGMA user_version = 1;
";
