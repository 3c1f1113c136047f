//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dmvprep() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("dmvprep").unwrap()
}

#[test]
fn help_lists_subcommands() {
    dmvprep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("prompt"));
}

#[test]
fn history_starts_empty() {
    let dir = TempDir::new().unwrap();

    dmvprep()
        .arg("history")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Seen questions recorded: 0"));
}

#[test]
fn demo_play_passes_and_records_history() {
    let dir = TempDir::new().unwrap();

    // The demo quiz has one question; answer A (Triangle), the correct one.
    dmvprep()
        .arg("play")
        .arg("--demo")
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("PERFECT!"))
        .stdout(predicate::str::contains("EXAM PASSED!"))
        .stdout(predicate::str::contains("100% score"));

    dmvprep()
        .arg("history")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Seen questions recorded: 1"));
}

#[test]
fn demo_play_wrong_answer_fails() {
    let dir = TempDir::new().unwrap();

    dmvprep()
        .arg("play")
        .arg("--demo")
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("b\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("WRONG! The correct answer is: Triangle"))
        .stdout(predicate::str::contains("EXAM FAILED"));
}

#[test]
fn replaying_the_demo_does_not_grow_history() {
    let dir = TempDir::new().unwrap();

    for _ in 0..2 {
        dmvprep()
            .arg("play")
            .arg("--demo")
            .arg("--data-dir")
            .arg(dir.path())
            .write_stdin("a\n")
            .assert()
            .success();
    }

    dmvprep()
        .arg("history")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Seen questions recorded: 1"));
}

#[test]
fn history_clear_resets_count() {
    let dir = TempDir::new().unwrap();

    dmvprep()
        .arg("play")
        .arg("--demo")
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("a\n")
        .assert()
        .success();

    dmvprep()
        .arg("history")
        .arg("--clear")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Question history cleared."));

    dmvprep()
        .arg("history")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Seen questions recorded: 0"));
}

#[test]
fn prompt_prints_the_generation_instructions() {
    let dir = TempDir::new().unwrap();

    dmvprep()
        .arg("prompt")
        .arg("--count")
        .arg("25")
        .arg("--focus")
        .arg("signs")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("- Count: 25"))
        .stdout(predicate::str::contains("MUST focus on Traffic Signs"))
        .stdout(predicate::str::contains("CALIFORNIA DRIVER'S HANDBOOK (2025 EDITION)"));
}

#[test]
fn play_without_a_key_reports_the_failure() {
    let dir = TempDir::new().unwrap();

    dmvprep()
        .arg("play")
        .arg("--data-dir")
        .arg(dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generation failed:"))
        .stdout(predicate::str::contains("API key is missing"));
}

#[test]
fn rejects_unknown_difficulty() {
    dmvprep()
        .arg("play")
        .arg("--demo")
        .arg("--difficulty")
        .arg("impossible")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn rejects_zero_count() {
    dmvprep()
        .arg("prompt")
        .arg("--count")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("count must be at least 1"));
}
