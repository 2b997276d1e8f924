//! Store and session error types.
//!
//! `StoreError` is defined here, next to the `RecordStore` trait, so the
//! session engine and the display layer can classify persistence failures
//! without string matching. `QuizError` covers controller misuse; none of
//! its variants leave a record behind.

use thiserror::Error;

/// Errors from the local record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be opened at all. Fatal to features
    /// that depend on persistence; callers degrade to "no history".
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A single put failed after the store was opened. Terminal for that
    /// record only; never retried, never rolled back.
    #[error("write to {partition} failed for key {key}: {message}")]
    WriteFailed {
        partition: &'static str,
        key: String,
        message: String,
    },

    /// A read query failed.
    #[error("read from {partition} failed: {message}")]
    ReadFailed {
        partition: &'static str,
        message: String,
    },

    /// A stored value could not be decoded.
    #[error("corrupt record in {partition}: {message}")]
    Corrupt {
        partition: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Returns `true` when the store never opened, as opposed to a failure
    /// on one record.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Rejected session operations. The controller's state is unchanged after
/// any of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// A session cannot start over an empty question set.
    #[error("question set is empty")]
    EmptyQuestionSet,

    /// Submit was called with no option selected.
    #[error("no option is selected")]
    NoSelection,

    /// The selected option is not offered by the current question.
    #[error("option not offered by the current question: {0}")]
    UnknownOption(String),

    /// The current question's answer has already been revealed.
    #[error("answer already revealed for the current question")]
    AlreadyRevealed,

    /// Advance was called before the current answer was revealed.
    #[error("answer not yet revealed for the current question")]
    NotRevealed,

    /// The session has already completed; only restart is valid.
    #[error("session is already completed")]
    SessionCompleted,
}
