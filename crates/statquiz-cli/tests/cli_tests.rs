//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn statquiz() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("statquiz").unwrap()
}

const SMALL_BANK: &str = r#"[bank]
id = "small"
name = "Small Bank"

[[questions]]
id = 1
topic = 1
title = "Mean"
prompt = "The values are 2, 4 and 6. What is the mean?"
options = ["3", "4"]
correct_answer = "4"
explanation = "12 / 3 = 4."

[[questions]]
id = 2
topic = 2
title = "Median"
prompt = "For 1, 3, 9, what is the median?"
options = ["1", "3", "9"]
correct_answer = "3"
"#;

const SINGLE_QUESTION_BANK: &str = r#"[bank]
id = "single"
name = "Single"

[[questions]]
id = 10
topic = 1
title = "Mode"
prompt = "For 2, 2, 5, what is the mode?"
options = ["2", "5"]
correct_answer = "2"
"#;

const BROKEN_BANK: &str = r#"[bank]
id = "broken"
name = "Broken"

[[questions]]
id = 1
topic = 1
title = "Broken"
prompt = "Pick one"
options = ["A", "B"]
correct_answer = "C"
"#;

fn write_bank(dir: &TempDir, file: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn help_output() {
    statquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("quiz trainer"));
}

#[test]
fn version_output() {
    statquiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("statquiz"));
}

#[test]
fn validate_valid_bank() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "small.toml", SMALL_BANK);

    statquiz()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("Small Bank (2 questions)"))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "broken.toml", BROKEN_BANK);

    statquiz()
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("not among the options"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    write_bank(&dir, "a.toml", SMALL_BANK);
    write_bank(&dir, "b.toml", SINGLE_QUESTION_BANK);

    statquiz()
        .arg("validate")
        .arg("--bank")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Small Bank"))
        .stdout(predicate::str::contains("Single"));
}

#[test]
fn validate_nonexistent_file() {
    statquiz()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    statquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created question-banks/bioestadistica.toml",
        ));

    assert!(dir.path().join("question-banks/bioestadistica.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    statquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    statquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_output_passes_validation() {
    let dir = TempDir::new().unwrap();

    statquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    statquiz()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("question-banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn profile_set_and_show() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");

    statquiz()
        .arg("profile")
        .arg("--name")
        .arg("Ana")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved display name: Ana"));

    statquiz()
        .arg("profile")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Display name: Ana"));
}

#[test]
fn profile_show_unset() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");

    statquiz()
        .arg("profile")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No display name set"));
}

#[test]
fn progress_with_no_history() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("quiz.db");

    statquiz()
        .arg("progress")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No history recorded yet"));
}

#[test]
fn quiz_with_empty_topic() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "small.toml", SMALL_BANK);
    let db = dir.path().join("quiz.db");

    statquiz()
        .arg("quiz")
        .arg("--bank")
        .arg(&bank)
        .arg("--topic")
        .arg("99")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No questions available for topic 99"));
}

#[test]
fn quiz_quit_abandons_session() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "small.toml", SMALL_BANK);
    let db = dir.path().join("quiz.db");

    statquiz()
        .arg("quiz")
        .arg("--bank")
        .arg(&bank)
        .arg("--db")
        .arg(&db)
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session abandoned"));
}

#[test]
fn quiz_full_run_then_progress() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "single.toml", SINGLE_QUESTION_BANK);
    let db = dir.path().join("quiz.db");

    // One question with "2" as option 1, the correct answer.
    statquiz()
        .arg("quiz")
        .arg("--bank")
        .arg(&bank)
        .arg("--db")
        .arg(&db)
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Session complete"));

    statquiz()
        .arg("progress")
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sessions: 1 (1 completed)"))
        .stdout(predicate::str::contains("Average score: 100%"));
}

#[test]
fn quiz_rejects_garbage_then_accepts() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "single.toml", SINGLE_QUESTION_BANK);
    let db = dir.path().join("quiz.db");

    statquiz()
        .arg("quiz")
        .arg("--bank")
        .arg(&bank)
        .arg("--db")
        .arg(&db)
        .write_stdin("banana\n7\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter a number between 1 and 2"))
        .stdout(predicate::str::contains("Session complete"));
}
