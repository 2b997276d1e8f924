//! End-to-end session scenarios against real store backends.

use rand::rngs::StdRng;
use rand::SeedableRng;

use statquiz_core::bank::Question;
use statquiz_core::error::QuizError;
use statquiz_core::records::AttemptStatus;
use statquiz_core::session::{Phase, QuizController};
use statquiz_core::store::RecordStore;
use statquiz_store::{MemoryRecordStore, SqliteRecordStore};

fn question(id: u32, topic: u32, options: &[&str], correct: &str) -> Question {
    Question {
        id,
        topic,
        title: format!("Q{id}"),
        prompt: format!("Question {id}?"),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct.into(),
        explanation: None,
    }
}

fn questions() -> Vec<Question> {
    vec![
        question(1, 1, &["3", "4"], "4"),
        question(2, 2, &["1", "3", "9"], "3"),
    ]
}

#[tokio::test]
async fn scored_run_persists_attempts_and_session() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let mut controller = QuizController::start("defaultUser", questions(), &mut rng).unwrap();

    // First question right, second wrong.
    let answer = controller.current().correct_answer.clone();
    controller.select(&answer).unwrap();
    controller.submit(&store).await.unwrap();
    controller.advance().unwrap();

    let wrong = {
        let q = controller.current();
        q.options
            .iter()
            .find(|o| **o != q.correct_answer)
            .unwrap()
            .clone()
    };
    controller.select(&wrong).unwrap();
    let last = controller.submit(&store).await.unwrap();

    let summary = last.summary.expect("final submission carries a summary");
    assert_eq!(summary.completion_percentage, 50);
    assert!(summary.session_persisted);

    let attempts = store.attempts().await.unwrap();
    assert_eq!(attempts.len(), 2);
    let correct = attempts.iter().find(|a| a.is_correct).unwrap();
    assert_eq!(correct.status, AttemptStatus::Completed);
    assert_eq!(correct.score, Some(100.0));
    let incorrect = attempts.iter().find(|a| !a.is_correct).unwrap();
    assert_eq!(incorrect.status, AttemptStatus::Attempted);
    assert_eq!(incorrect.score, Some(0.0));

    let record = store
        .session(controller.session_id())
        .await
        .unwrap()
        .expect("session record stored");
    assert_eq!(record.user_id, "defaultUser");
    assert_eq!(
        record.correct_answers + record.incorrect_answers,
        record.total_questions
    );
    assert!(record.is_completed);
    assert!(record.started_at <= record.ended_at);
}

#[tokio::test]
async fn empty_set_leaves_no_records() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let result = QuizController::start("defaultUser", Vec::new(), &mut rng);
    assert_eq!(result.err(), Some(QuizError::EmptyQuestionSet));

    assert!(store.attempts().await.unwrap().is_empty());
    assert!(store.sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn repeat_attempt_overwrites_by_exercise() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    let single = vec![question(5, 1, &["A", "B"], "A")];

    let mut rng = StdRng::seed_from_u64(2);
    let mut controller = QuizController::start("defaultUser", single.clone(), &mut rng).unwrap();
    controller.select("B").unwrap();
    controller.submit(&store).await.unwrap();

    // A second run over the same exercise replaces the stored attempt.
    let mut controller = QuizController::start("defaultUser", single, &mut rng).unwrap();
    controller.select("A").unwrap();
    controller.submit(&store).await.unwrap();

    let attempts = store.attempts().await.unwrap();
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].is_correct);
    // Each run wrote its own session record.
    assert_eq!(store.sessions().await.unwrap().len(), 2);
}

#[tokio::test]
async fn write_failures_do_not_block_completion() {
    let store = MemoryRecordStore::new();
    store.set_fail_writes(true);

    let mut rng = StdRng::seed_from_u64(3);
    let mut controller =
        QuizController::start("defaultUser", vec![question(1, 1, &["A", "B"], "A")], &mut rng)
            .unwrap();

    controller.select("A").unwrap();
    let submission = controller.submit(&store).await.unwrap();

    assert!(submission.is_correct);
    assert!(!submission.attempt_persisted);
    assert!(!submission.summary.unwrap().session_persisted);
    assert_eq!(controller.phase(), Phase::Completed);
    assert!(store.attempts().await.unwrap().is_empty());
}

#[tokio::test]
async fn restart_starts_a_distinct_session() {
    let store = SqliteRecordStore::open_in_memory().unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    let mut controller =
        QuizController::start("defaultUser", vec![question(1, 1, &["A", "B"], "A")], &mut rng)
            .unwrap();

    controller.select("A").unwrap();
    controller.submit(&store).await.unwrap();
    let first_session = controller.session_id().to_string();

    controller.restart(&mut rng);
    assert!(!controller.has_unsaved_progress());
    controller.select("A").unwrap();
    controller.submit(&store).await.unwrap();

    assert_ne!(controller.session_id(), first_session);
    assert_eq!(store.sessions().await.unwrap().len(), 2);
}
