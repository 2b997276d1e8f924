//! Quiz session state machine.
//!
//! One [`QuizController`] drives a single run through a shuffled question
//! set: select an option, submit it, see the revealed answer, advance.
//! Completed attempt and session records are emitted to a [`RecordStore`];
//! persistence is best-effort relative to the interactive flow — a failed
//! write is logged and surfaced, never blocking the next transition.
//!
//! Instantiate one controller per active session. The controller owns only
//! transient state (position, selection, running counts, timers) and keeps
//! no reference into stored data.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::bank::Question;
use crate::error::QuizError;
use crate::records::{AttemptStatus, ExerciseAttempt, SessionRecord};
use crate::store::RecordStore;

/// Observable phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A question is current and its answer has not been revealed.
    Answering,
    /// The current question has been submitted and its answer revealed.
    Revealed,
    /// The final question has been submitted. Terminal; only restart
    /// leaves this phase.
    Completed,
}

/// Outcome of a single submission, for the display layer to render.
#[derive(Debug, Clone)]
pub struct Submission {
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: Option<String>,
    /// Whether the attempt record reached the store.
    pub attempt_persisted: bool,
    /// Present when this submission completed the session.
    pub summary: Option<SessionSummary>,
}

/// Aggregates reported when the final question is submitted.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session_id: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub completion_percentage: u8,
    pub total_time_secs: u64,
    /// Whether the session record reached the store.
    pub session_persisted: bool,
}

/// Session clock, started at the first answer selection (not at load).
struct SessionClock {
    started: Instant,
    started_at: DateTime<Utc>,
}

/// Drives one run through a randomized question set.
pub struct QuizController {
    user_id: String,
    session_id: String,
    questions: Vec<Question>,
    position: usize,
    selection: Option<String>,
    revealed: bool,
    correct: u32,
    incorrect: u32,
    question_started: Instant,
    session_clock: Option<SessionClock>,
    completed: bool,
}

impl QuizController {
    /// Start a session over `questions`, applying an unbiased Fisher-Yates
    /// shuffle. The shuffle happens once per session start.
    ///
    /// Fails with [`QuizError::EmptyQuestionSet`] for an empty set; no
    /// shuffle is attempted and no records are ever written for such a
    /// session.
    pub fn start<R: Rng + ?Sized>(
        user_id: impl Into<String>,
        mut questions: Vec<Question>,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        questions.shuffle(rng);

        Ok(Self {
            user_id: user_id.into(),
            session_id: Uuid::new_v4().to_string(),
            questions,
            position: 0,
            selection: None,
            revealed: false,
            correct: 0,
            incorrect: 0,
            question_started: Instant::now(),
            session_clock: None,
            completed: false,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else if self.revealed {
            Phase::Revealed
        } else {
            Phase::Answering
        }
    }

    /// The current question (the final one, once completed).
    pub fn current(&self) -> &Question {
        &self.questions[self.position]
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of questions in this session.
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct
    }

    pub fn incorrect_answers(&self) -> u32 {
        self.incorrect
    }

    /// The currently held selection, if any.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// True once at least one answer has been submitted and the session is
    /// not yet completed. The hosting layer queries this before allowing
    /// navigation away.
    pub fn has_unsaved_progress(&self) -> bool {
        self.correct + self.incorrect > 0 && !self.completed
    }

    /// Hold `option` as the answer for the current question. At most one
    /// selection is held; selecting again replaces the prior one. The
    /// session clock starts on the first selection of the session.
    pub fn select(&mut self, option: &str) -> Result<(), QuizError> {
        if self.completed {
            return Err(QuizError::SessionCompleted);
        }
        if self.revealed {
            return Err(QuizError::AlreadyRevealed);
        }
        if !self.current().options.iter().any(|o| o == option) {
            return Err(QuizError::UnknownOption(option.to_string()));
        }

        if self.session_clock.is_none() {
            self.session_clock = Some(SessionClock {
                started: Instant::now(),
                started_at: Utc::now(),
            });
        }
        self.selection = Some(option.to_string());
        Ok(())
    }

    /// Lock in the current selection: score it by exact string equality,
    /// update the running counts, and persist one attempt record. On the
    /// final question, additionally persist the session record and
    /// transition to [`Phase::Completed`].
    ///
    /// Rejected with [`QuizError::NoSelection`] when nothing is selected;
    /// nothing changes and nothing is written. Store failures do not block
    /// the transition — they are logged and reflected in the returned
    /// [`Submission`].
    pub async fn submit(&mut self, store: &dyn RecordStore) -> Result<Submission, QuizError> {
        if self.completed {
            return Err(QuizError::SessionCompleted);
        }
        if self.revealed {
            return Err(QuizError::AlreadyRevealed);
        }
        let Some(selected) = self.selection.clone() else {
            return Err(QuizError::NoSelection);
        };

        let question = self.questions[self.position].clone();
        let is_correct = selected == question.correct_answer;
        let time_spent = round_secs(self.question_started.elapsed());

        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.revealed = true;
        tracing::debug!(
            session_id = %self.session_id,
            exercise_id = question.id,
            is_correct,
            "answer submitted"
        );

        let attempt = ExerciseAttempt {
            exercise_id: question.id,
            topic_id: question.topic,
            status: if is_correct {
                AttemptStatus::Completed
            } else {
                AttemptStatus::Attempted
            },
            selected_answer: selected,
            is_correct,
            score: Some(if is_correct { 100.0 } else { 0.0 }),
            time_spent_secs: Some(time_spent),
            recorded_at: Utc::now(),
        };
        let attempt_persisted = match store.put_attempt(&attempt).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(exercise_id = question.id, "failed to persist attempt: {e}");
                false
            }
        };

        let summary = if self.position + 1 == self.questions.len() {
            self.completed = true;
            Some(self.complete_session(store).await)
        } else {
            None
        };

        Ok(Submission {
            is_correct,
            correct_answer: question.correct_answer,
            explanation: question.explanation,
            attempt_persisted,
            summary,
        })
    }

    async fn complete_session(&mut self, store: &dyn RecordStore) -> SessionSummary {
        let total = self.questions.len() as u32;
        let completion_percentage =
            (100.0 * f64::from(self.correct) / f64::from(total)).round() as u8;
        let ended_at = Utc::now();
        // Completion implies at least one submission, which implies a
        // selection, so the clock is running; the fallback is belt only.
        let (total_time_secs, started_at) = match &self.session_clock {
            Some(clock) => (round_secs(clock.started.elapsed()), clock.started_at),
            None => (0, ended_at),
        };

        let record = SessionRecord {
            session_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
            total_questions: total,
            correct_answers: self.correct,
            incorrect_answers: self.incorrect,
            total_time_secs,
            completion_percentage,
            started_at,
            ended_at,
            is_completed: true,
        };
        let session_persisted = match store.put_session(&record).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(session_id = %record.session_id, "failed to persist session: {e}");
                false
            }
        };

        SessionSummary {
            session_id: record.session_id,
            total_questions: total,
            correct_answers: self.correct,
            incorrect_answers: self.incorrect,
            completion_percentage,
            total_time_secs,
            session_persisted,
        }
    }

    /// Move to the next question: clears the selection and reveal flag and
    /// restarts the per-question timer. Only valid from [`Phase::Revealed`];
    /// the final question's submission transitions to completion on its own.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        if self.completed {
            return Err(QuizError::SessionCompleted);
        }
        if !self.revealed {
            return Err(QuizError::NotRevealed);
        }

        self.position += 1;
        self.selection = None;
        self.revealed = false;
        self.question_started = Instant::now();
        Ok(())
    }

    /// Reinitialize for a fresh run: new shuffle, new session ID, zeroed
    /// counters. The prior session is never resumed or appended to.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
        self.session_id = Uuid::new_v4().to_string();
        self.position = 0;
        self.selection = None;
        self.revealed = false;
        self.correct = 0;
        self.incorrect = 0;
        self.question_started = Instant::now();
        self.session_clock = None;
        self.completed = false;
    }
}

fn round_secs(elapsed: Duration) -> u64 {
    elapsed.as_secs_f64().round() as u64
}
