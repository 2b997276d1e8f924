//! Persisted record kinds.
//!
//! Three record kinds survive application restarts: the user profile, one
//! attempt per exercise, and one immutable summary per completed session.
//! Each is keyed by a natural identifier and owned exclusively by the record
//! store; the session engine builds values, hands them over, and keeps no
//! reference into stored data.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's display profile. One record per user identifier, overwritten
/// whenever the display name is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Primary key.
    pub user_id: String,
    /// Optional display name.
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Outcome classification of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    /// The question was answered, incorrectly.
    Attempted,
    /// The question was answered correctly.
    Completed,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptStatus::Attempted => write!(f, "attempted"),
            AttemptStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attempted" => Ok(AttemptStatus::Attempted),
            "completed" => Ok(AttemptStatus::Completed),
            other => Err(format!("unknown attempt status: {other}")),
        }
    }
}

/// One user response to one exercise question.
///
/// Keyed by `exercise_id`, so a repeat attempt at the same exercise
/// overwrites the prior record — only the latest attempt per exercise is
/// retained, across sessions. That mirrors the original schema; keying by
/// `(session_id, exercise_id)` would be the change to make if attempt
/// history is ever wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseAttempt {
    /// Primary key.
    pub exercise_id: u32,
    /// Topic (lapso) of the exercise, denormalized for progress grouping.
    pub topic_id: u32,
    /// `completed` when correct, `attempted` otherwise.
    pub status: AttemptStatus,
    /// The option the user locked in.
    pub selected_answer: String,
    /// Exact-match comparison against the canonical answer.
    pub is_correct: bool,
    /// Per-attempt score as a percentage (100 or 0). Optional on read for
    /// rows written before the field existed.
    #[serde(default)]
    pub score: Option<f64>,
    /// Seconds from the question becoming current to submission, rounded
    /// to the nearest whole second.
    #[serde(default)]
    pub time_spent_secs: Option<u64>,
    /// When the attempt was submitted.
    pub recorded_at: DateTime<Utc>,
}

/// Summary of one continuous run through a shuffled question set. Written
/// once, when the final question is answered; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Primary key, client-generated (UUID v4).
    pub session_id: String,
    /// The user the session belongs to. Not a foreign key; sessions and
    /// attempts are independent write paths.
    pub user_id: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    /// Wall-clock seconds from the first answer selection to the final
    /// submission.
    pub total_time_secs: u64,
    /// `round(100 * correct_answers / total_questions)`, computed at
    /// completion time.
    pub completion_percentage: u8,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_and_parse() {
        assert_eq!(AttemptStatus::Attempted.to_string(), "attempted");
        assert_eq!(AttemptStatus::Completed.to_string(), "completed");
        assert_eq!(
            "attempted".parse::<AttemptStatus>().unwrap(),
            AttemptStatus::Attempted
        );
        assert_eq!(
            "completed".parse::<AttemptStatus>().unwrap(),
            AttemptStatus::Completed
        );
        assert!("done".parse::<AttemptStatus>().is_err());
    }

    #[test]
    fn attempt_serde_roundtrip() {
        let attempt = ExerciseAttempt {
            exercise_id: 7,
            topic_id: 2,
            status: AttemptStatus::Completed,
            selected_answer: "B".into(),
            is_correct: true,
            score: Some(100.0),
            time_spent_secs: Some(12),
            recorded_at: Utc::now(),
        };
        let json = serde_json::to_string(&attempt).unwrap();
        let back: ExerciseAttempt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attempt);
    }

    #[test]
    fn session_serde_roundtrip() {
        let record = SessionRecord {
            session_id: "s-1".into(),
            user_id: "defaultUser".into(),
            total_questions: 10,
            correct_answers: 7,
            incorrect_answers: 3,
            total_time_secs: 95,
            completion_percentage: 70,
            started_at: Utc::now(),
            ended_at: Utc::now(),
            is_completed: true,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn profile_without_name_deserializes() {
        let profile: UserProfile = serde_json::from_str(r#"{"user_id":"u1"}"#).unwrap();
        assert_eq!(profile.user_id, "u1");
        assert!(profile.user_name.is_none());
    }
}
