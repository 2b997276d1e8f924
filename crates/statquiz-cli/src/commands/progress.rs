//! The `statquiz progress` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use statquiz_core::progress::{by_topic, summarize};

use super::{format_secs, open_store};

pub async fn execute(user: String, db: Option<PathBuf>) -> Result<()> {
    let store = open_store(db);

    match store.user_profile(&user).await {
        Ok(Some(profile)) => match profile.user_name {
            Some(name) => println!("Profile: {name} ({user})"),
            None => println!("Profile: {user}"),
        },
        Ok(None) => println!("Profile: {user}"),
        Err(e) => tracing::warn!("could not load profile: {e}"),
    }

    let attempts = store.attempts().await.unwrap_or_else(|e| {
        tracing::warn!("could not load attempts: {e}");
        Vec::new()
    });
    let mut sessions = store.sessions().await.unwrap_or_else(|e| {
        tracing::warn!("could not load sessions: {e}");
        Vec::new()
    });

    if attempts.is_empty() && sessions.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    let summary = summarize(&attempts, &sessions);
    println!(
        "Sessions: {} ({} completed)   Average score: {}%   Total time: {}",
        summary.total_sessions,
        summary.completed_sessions,
        summary.average_score_pct,
        format_secs(summary.total_time_secs),
    );
    println!(
        "Attempts: {} recorded, {} correct",
        summary.attempts_recorded, summary.correct_attempts
    );

    if !sessions.is_empty() {
        sessions.sort_by(|a, b| b.ended_at.cmp(&a.ended_at));

        let mut table = Table::new();
        table.set_header(vec!["When", "Questions", "Correct", "Score", "Time"]);
        for s in &sessions {
            table.add_row(vec![
                s.ended_at.format("%Y-%m-%d %H:%M").to_string(),
                s.total_questions.to_string(),
                s.correct_answers.to_string(),
                format!("{}%", s.completion_percentage),
                format_secs(s.total_time_secs),
            ]);
        }
        println!("\nSessions:");
        println!("{table}");
    }

    let topics = by_topic(&attempts);
    if !topics.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Topic", "Attempted", "Correct"]);
        for t in &topics {
            table.add_row(vec![
                t.topic_id.to_string(),
                t.attempted.to_string(),
                t.correct.to_string(),
            ]);
        }
        println!("\nBy topic:");
        println!("{table}");
    }

    Ok(())
}
