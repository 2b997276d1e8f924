//! Progress summarization over stored records.
//!
//! Pure aggregation; the display layer fetches records from the store and
//! hands them here.

use std::collections::BTreeMap;

use crate::records::{ExerciseAttempt, SessionRecord};

/// Headline figures across a user's stored history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total_sessions: u32,
    /// Sessions whose `is_completed` flag is set.
    pub completed_sessions: u32,
    /// Rounded mean of per-session scores, where a session's score is
    /// `100 * correct / total`. Zero when no sessions exist.
    pub average_score_pct: u32,
    pub attempts_recorded: u32,
    pub correct_attempts: u32,
    /// Sum of session durations, in seconds.
    pub total_time_secs: u64,
}

/// Per-topic attempt figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub topic_id: u32,
    pub attempted: u32,
    pub correct: u32,
}

/// Aggregate stored attempts and sessions into headline figures.
pub fn summarize(attempts: &[ExerciseAttempt], sessions: &[SessionRecord]) -> ProgressSummary {
    let total_sessions = sessions.len() as u32;
    let completed_sessions = sessions.iter().filter(|s| s.is_completed).count() as u32;

    let average_score_pct = if sessions.is_empty() {
        0
    } else {
        let sum: f64 = sessions
            .iter()
            .map(|s| {
                if s.total_questions == 0 {
                    0.0
                } else {
                    100.0 * f64::from(s.correct_answers) / f64::from(s.total_questions)
                }
            })
            .sum();
        (sum / sessions.len() as f64).round() as u32
    };

    ProgressSummary {
        total_sessions,
        completed_sessions,
        average_score_pct,
        attempts_recorded: attempts.len() as u32,
        correct_attempts: attempts.iter().filter(|a| a.is_correct).count() as u32,
        total_time_secs: sessions.iter().map(|s| s.total_time_secs).sum(),
    }
}

/// Group attempts by topic, ordered by topic identifier.
pub fn by_topic(attempts: &[ExerciseAttempt]) -> Vec<TopicSummary> {
    let mut topics: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for attempt in attempts {
        let entry = topics.entry(attempt.topic_id).or_default();
        entry.0 += 1;
        if attempt.is_correct {
            entry.1 += 1;
        }
    }

    topics
        .into_iter()
        .map(|(topic_id, (attempted, correct))| TopicSummary {
            topic_id,
            attempted,
            correct,
        })
        .collect()
}
