//! The record store contract between the session engine and its backends.
//!
//! Three named partitions, one per record kind, each keyed by the record's
//! natural identifier. `put` is insert-or-overwrite (last write wins); list
//! order is unspecified. Implementations live in `statquiz-store`.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::records::{ExerciseAttempt, SessionRecord, UserProfile};

/// Partition names, shared by error reporting and the SQLite backend's
/// table layout.
pub mod partition {
    pub const USER_PROFILE: &str = "user_profile";
    pub const EXERCISE_ATTEMPT: &str = "exercise_attempt";
    pub const QUIZ_SESSION: &str = "quiz_session";
}

/// Keyed, partitioned storage for the three persisted record kinds.
///
/// Absence is not an error: `get`-style methods return `Ok(None)` for a
/// missing key. A failed put fails atomically; the caller must treat the
/// record as unsaved.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;
    async fn put_user_profile(&self, profile: &UserProfile) -> Result<(), StoreError>;

    async fn attempt(&self, exercise_id: u32) -> Result<Option<ExerciseAttempt>, StoreError>;
    async fn put_attempt(&self, attempt: &ExerciseAttempt) -> Result<(), StoreError>;
    /// Every stored attempt, order unspecified.
    async fn attempts(&self) -> Result<Vec<ExerciseAttempt>, StoreError>;

    async fn session(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError>;
    async fn put_session(&self, record: &SessionRecord) -> Result<(), StoreError>;
    /// Every stored session, order unspecified.
    async fn sessions(&self) -> Result<Vec<SessionRecord>, StoreError>;
}
