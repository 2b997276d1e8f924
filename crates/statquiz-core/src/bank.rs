//! Question bank types.
//!
//! A bank is a static, read-only collection of multiple-choice questions
//! grouped by topic (course term, "lapso"). The session engine receives a
//! subset of a bank's questions and never mutates the bank itself.

use serde::{Deserialize, Serialize};

/// A single multiple-choice exercise question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank; doubles as the attempt key.
    pub id: u32,
    /// Course-term grouping ("lapso") the question belongs to.
    pub topic: u32,
    /// Short title shown above the prompt.
    pub title: String,
    /// The question text.
    pub prompt: String,
    /// Answer options, in presentation order.
    pub options: Vec<String>,
    /// The canonical answer; compared by exact, case-sensitive equality.
    pub correct_answer: String,
    /// Optional explanation shown after the answer is revealed.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A collection of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of the bank's subject matter.
    #[serde(default)]
    pub description: String,
    /// The questions in this bank.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Distinct topics present in the bank, ascending.
    pub fn topics(&self) -> Vec<u32> {
        let mut topics: Vec<u32> = self.questions.iter().map(|q| q.topic).collect();
        topics.sort_unstable();
        topics.dedup();
        topics
    }

    /// Questions belonging to one topic, or the full set when `topic` is
    /// `None`. Bank order is preserved; shuffling is the session's job.
    pub fn for_topic(&self, topic: Option<u32>) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| topic.is_none_or(|t| q.topic == t))
            .cloned()
            .collect()
    }
}
