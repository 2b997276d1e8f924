//! The `statquiz quiz` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use statquiz_core::session::{QuizController, SessionSummary};

use super::{format_secs, load_questions, open_store};

pub async fn execute(
    bank: PathBuf,
    topic: Option<u32>,
    user: String,
    db: Option<PathBuf>,
) -> Result<()> {
    let questions = load_questions(&bank, topic)?;
    if questions.is_empty() {
        match topic {
            Some(t) => println!("No questions available for topic {t}."),
            None => println!("No questions available."),
        }
        return Ok(());
    }

    let store = open_store(db);
    let mut rng = rand::rng();
    let mut controller = QuizController::start(user, questions, &mut rng)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    loop {
        let question = controller.current().clone();
        println!(
            "\nQuestion {}/{}: {}",
            controller.position() + 1,
            controller.total(),
            question.title
        );
        println!("{}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }

        // Prompt until a valid option number arrives.
        let choice = loop {
            print!("Answer (1-{}, q to quit): ", question.options.len());
            std::io::stdout().flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                println!("\nSession abandoned.");
                return Ok(());
            }
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("q") {
                println!("Session abandoned.");
                return Ok(());
            }
            match trimmed.parse::<usize>() {
                Ok(n) if (1..=question.options.len()).contains(&n) => break n - 1,
                _ => println!("Enter a number between 1 and {}.", question.options.len()),
            }
        };

        controller.select(&question.options[choice])?;
        let submission = controller.submit(store.as_ref()).await?;

        if submission.is_correct {
            println!("Correct!");
        } else {
            println!("Incorrect. The answer is: {}", submission.correct_answer);
        }
        if let Some(explanation) = &submission.explanation {
            println!("  {explanation}");
        }
        if !submission.attempt_persisted {
            println!("  (progress could not be saved)");
        }

        match submission.summary {
            Some(summary) => {
                print_summary(&summary);
                return Ok(());
            }
            None => controller.advance()?,
        }
    }
}

fn print_summary(summary: &SessionSummary) {
    let mut table = Table::new();
    table.set_header(vec!["Questions", "Correct", "Incorrect", "Score", "Time"]);
    table.add_row(vec![
        summary.total_questions.to_string(),
        summary.correct_answers.to_string(),
        summary.incorrect_answers.to_string(),
        format!("{}%", summary.completion_percentage),
        format_secs(summary.total_time_secs),
    ]);

    println!("\nSession complete!");
    println!("{table}");
    if !summary.session_persisted {
        println!("(session could not be saved)");
    }
}
