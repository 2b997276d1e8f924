//! SQLite-backed record store.
//!
//! One database file per installation. The schema is versioned through
//! SQLite's `user_version` pragma and migrations are strictly additive, so
//! records written by an older schema survive an upgrade untouched.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use statquiz_core::error::StoreError;
use statquiz_core::records::{ExerciseAttempt, SessionRecord, UserProfile};
use statquiz_core::store::{partition, RecordStore};

/// Current schema version. Version 1 introduced profiles and attempts,
/// version 2 added the session table.
const SCHEMA_VERSION: i64 = 2;

/// SQLite-backed implementation of [`RecordStore`].
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    /// Open (or create) the database at `path` and bring its schema up to
    /// date. Any failure here means the store never opened; callers degrade
    /// to a history-free mode rather than aborting.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!(
                    "cannot create {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("cannot open {}: {e}", path.display())))?;

        Self::from_connection(conn)
    }

    /// Open a store backed by a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(format!("cannot open in-memory db: {e}")))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| StoreError::Unavailable(format!("cannot configure db: {e}")))?;

        migrate(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Bring the schema from whatever `user_version` records up to
/// [`SCHEMA_VERSION`]. Each step only creates what its version added.
fn migrate(conn: &Connection) -> Result<(), StoreError> {
    let version: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StoreError::Unavailable(format!("cannot read schema version: {e}")))?;

    if version < 1 {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS user_profile (
                user_id TEXT PRIMARY KEY,
                user_name TEXT
            );

            CREATE TABLE IF NOT EXISTS exercise_attempt (
                exercise_id INTEGER PRIMARY KEY,
                topic_id INTEGER NOT NULL,
                status TEXT NOT NULL,
                selected_answer TEXT NOT NULL,
                is_correct INTEGER NOT NULL,
                score REAL,
                time_spent_secs INTEGER,
                recorded_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| StoreError::Unavailable(format!("migration to v1 failed: {e}")))?;
    }

    if version < 2 {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS quiz_session (
                session_id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                total_questions INTEGER NOT NULL,
                correct_answers INTEGER NOT NULL,
                incorrect_answers INTEGER NOT NULL,
                total_time_secs INTEGER NOT NULL,
                completion_percentage INTEGER NOT NULL,
                started_at TEXT NOT NULL,
                ended_at TEXT NOT NULL,
                is_completed INTEGER NOT NULL
            );
            "#,
        )
        .map_err(|e| StoreError::Unavailable(format!("migration to v2 failed: {e}")))?;
    }

    if version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(|e| StoreError::Unavailable(format!("cannot record schema version: {e}")))?;
        tracing::debug!(from = version, to = SCHEMA_VERSION, "schema migrated");
    }

    Ok(())
}

/// Attempt row as stored, before decoding timestamps and status.
struct RawAttempt {
    exercise_id: i64,
    topic_id: i64,
    status: String,
    selected_answer: String,
    is_correct: i64,
    score: Option<f64>,
    time_spent_secs: Option<i64>,
    recorded_at: String,
}

impl RawAttempt {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            exercise_id: row.get(0)?,
            topic_id: row.get(1)?,
            status: row.get(2)?,
            selected_answer: row.get(3)?,
            is_correct: row.get(4)?,
            score: row.get(5)?,
            time_spent_secs: row.get(6)?,
            recorded_at: row.get(7)?,
        })
    }

    fn decode(self) -> Result<ExerciseAttempt, StoreError> {
        Ok(ExerciseAttempt {
            exercise_id: self.exercise_id as u32,
            topic_id: self.topic_id as u32,
            status: self
                .status
                .parse()
                .map_err(|e: String| corrupt(partition::EXERCISE_ATTEMPT, e))?,
            selected_answer: self.selected_answer,
            is_correct: self.is_correct != 0,
            score: self.score,
            time_spent_secs: self.time_spent_secs.map(|t| t as u64),
            recorded_at: parse_timestamp(partition::EXERCISE_ATTEMPT, &self.recorded_at)?,
        })
    }
}

struct RawSession {
    session_id: String,
    user_id: String,
    total_questions: i64,
    correct_answers: i64,
    incorrect_answers: i64,
    total_time_secs: i64,
    completion_percentage: i64,
    started_at: String,
    ended_at: String,
    is_completed: i64,
}

impl RawSession {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            session_id: row.get(0)?,
            user_id: row.get(1)?,
            total_questions: row.get(2)?,
            correct_answers: row.get(3)?,
            incorrect_answers: row.get(4)?,
            total_time_secs: row.get(5)?,
            completion_percentage: row.get(6)?,
            started_at: row.get(7)?,
            ended_at: row.get(8)?,
            is_completed: row.get(9)?,
        })
    }

    fn decode(self) -> Result<SessionRecord, StoreError> {
        Ok(SessionRecord {
            started_at: parse_timestamp(partition::QUIZ_SESSION, &self.started_at)?,
            ended_at: parse_timestamp(partition::QUIZ_SESSION, &self.ended_at)?,
            session_id: self.session_id,
            user_id: self.user_id,
            total_questions: self.total_questions as u32,
            correct_answers: self.correct_answers as u32,
            incorrect_answers: self.incorrect_answers as u32,
            total_time_secs: self.total_time_secs as u64,
            completion_percentage: self.completion_percentage as u8,
            is_completed: self.is_completed != 0,
        })
    }
}

fn parse_timestamp(partition: &'static str, value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| corrupt(partition, format!("bad timestamp {value:?}: {e}")))
}

fn corrupt(partition: &'static str, message: impl Into<String>) -> StoreError {
    StoreError::Corrupt {
        partition,
        message: message.into(),
    }
}

fn read_err(partition: &'static str) -> impl Fn(rusqlite::Error) -> StoreError {
    move |e| StoreError::ReadFailed {
        partition,
        message: e.to_string(),
    }
}

fn write_err(partition: &'static str, key: String) -> impl FnOnce(rusqlite::Error) -> StoreError {
    move |e| StoreError::WriteFailed {
        partition,
        key,
        message: e.to_string(),
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT user_id, user_name FROM user_profile WHERE user_id = ?1",
            params![user_id],
            |row| {
                Ok(UserProfile {
                    user_id: row.get(0)?,
                    user_name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(read_err(partition::USER_PROFILE))
    }

    async fn put_user_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO user_profile (user_id, user_name) VALUES (?1, ?2)",
            params![profile.user_id, profile.user_name],
        )
        .map_err(write_err(partition::USER_PROFILE, profile.user_id.clone()))?;
        Ok(())
    }

    async fn attempt(&self, exercise_id: u32) -> Result<Option<ExerciseAttempt>, StoreError> {
        let conn = self.conn.lock().await;
        let raw = conn
            .query_row(
                "SELECT exercise_id, topic_id, status, selected_answer, is_correct,
                        score, time_spent_secs, recorded_at
                 FROM exercise_attempt WHERE exercise_id = ?1",
                params![exercise_id as i64],
                RawAttempt::from_row,
            )
            .optional()
            .map_err(read_err(partition::EXERCISE_ATTEMPT))?;

        raw.map(RawAttempt::decode).transpose()
    }

    async fn put_attempt(&self, attempt: &ExerciseAttempt) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"INSERT OR REPLACE INTO exercise_attempt
               (exercise_id, topic_id, status, selected_answer, is_correct,
                score, time_spent_secs, recorded_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
            params![
                attempt.exercise_id as i64,
                attempt.topic_id as i64,
                attempt.status.to_string(),
                attempt.selected_answer,
                attempt.is_correct as i64,
                attempt.score,
                attempt.time_spent_secs.map(|t| t as i64),
                attempt.recorded_at.to_rfc3339(),
            ],
        )
        .map_err(write_err(
            partition::EXERCISE_ATTEMPT,
            attempt.exercise_id.to_string(),
        ))?;
        Ok(())
    }

    async fn attempts(&self) -> Result<Vec<ExerciseAttempt>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare_cached(
                "SELECT exercise_id, topic_id, status, selected_answer, is_correct,
                        score, time_spent_secs, recorded_at
                 FROM exercise_attempt",
            )
            .map_err(read_err(partition::EXERCISE_ATTEMPT))?;

        let raw: Vec<RawAttempt> = stmt
            .query_map([], RawAttempt::from_row)
            .map_err(read_err(partition::EXERCISE_ATTEMPT))?
            .collect::<Result<_, _>>()
            .map_err(read_err(partition::EXERCISE_ATTEMPT))?;

        raw.into_iter().map(RawAttempt::decode).collect()
    }

    async fn session(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let conn = self.conn.lock().await;
        let raw = conn
            .query_row(
                "SELECT session_id, user_id, total_questions, correct_answers,
                        incorrect_answers, total_time_secs, completion_percentage,
                        started_at, ended_at, is_completed
                 FROM quiz_session WHERE session_id = ?1",
                params![session_id],
                RawSession::from_row,
            )
            .optional()
            .map_err(read_err(partition::QUIZ_SESSION))?;

        raw.map(RawSession::decode).transpose()
    }

    async fn put_session(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"INSERT OR REPLACE INTO quiz_session
               (session_id, user_id, total_questions, correct_answers,
                incorrect_answers, total_time_secs, completion_percentage,
                started_at, ended_at, is_completed)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            params![
                record.session_id,
                record.user_id,
                record.total_questions as i64,
                record.correct_answers as i64,
                record.incorrect_answers as i64,
                record.total_time_secs as i64,
                record.completion_percentage as i64,
                record.started_at.to_rfc3339(),
                record.ended_at.to_rfc3339(),
                record.is_completed as i64,
            ],
        )
        .map_err(write_err(partition::QUIZ_SESSION, record.session_id.clone()))?;
        Ok(())
    }

    async fn sessions(&self) -> Result<Vec<SessionRecord>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare_cached(
                "SELECT session_id, user_id, total_questions, correct_answers,
                        incorrect_answers, total_time_secs, completion_percentage,
                        started_at, ended_at, is_completed
                 FROM quiz_session",
            )
            .map_err(read_err(partition::QUIZ_SESSION))?;

        let raw: Vec<RawSession> = stmt
            .query_map([], RawSession::from_row)
            .map_err(read_err(partition::QUIZ_SESSION))?
            .collect::<Result<_, _>>()
            .map_err(read_err(partition::QUIZ_SESSION))?;

        raw.into_iter().map(RawSession::decode).collect()
    }
}
