//! In-memory record store.
//!
//! Used by tests and as the degraded backend when the SQLite database
//! cannot be opened: the quiz remains fully playable, nothing survives the
//! process. Write-failure injection exercises the session engine's
//! best-effort persistence path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use statquiz_core::error::StoreError;
use statquiz_core::records::{ExerciseAttempt, SessionRecord, UserProfile};
use statquiz_core::store::{partition, RecordStore};

/// HashMap-backed implementation of [`RecordStore`].
#[derive(Default)]
pub struct MemoryRecordStore {
    profiles: Mutex<HashMap<String, UserProfile>>,
    attempts: Mutex<HashMap<u32, ExerciseAttempt>>,
    sessions: Mutex<HashMap<String, SessionRecord>>,
    fail_writes: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every put fails with [`StoreError::WriteFailed`]. Reads
    /// are unaffected.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_write(&self, partition: &'static str, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::WriteFailed {
                partition,
                key: key.to_string(),
                message: "write failure injected".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn put_user_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.check_write(partition::USER_PROFILE, &profile.user_id)?;
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn attempt(&self, exercise_id: u32) -> Result<Option<ExerciseAttempt>, StoreError> {
        Ok(self.attempts.lock().unwrap().get(&exercise_id).cloned())
    }

    async fn put_attempt(&self, attempt: &ExerciseAttempt) -> Result<(), StoreError> {
        self.check_write(partition::EXERCISE_ATTEMPT, &attempt.exercise_id.to_string())?;
        self.attempts
            .lock()
            .unwrap()
            .insert(attempt.exercise_id, attempt.clone());
        Ok(())
    }

    async fn attempts(&self) -> Result<Vec<ExerciseAttempt>, StoreError> {
        Ok(self.attempts.lock().unwrap().values().cloned().collect())
    }

    async fn session(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn put_session(&self, record: &SessionRecord) -> Result<(), StoreError> {
        self.check_write(partition::QUIZ_SESSION, &record.session_id)?;
        self.sessions
            .lock()
            .unwrap()
            .insert(record.session_id.clone(), record.clone());
        Ok(())
    }

    async fn sessions(&self) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(self.sessions.lock().unwrap().values().cloned().collect())
    }
}
