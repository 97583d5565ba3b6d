use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tracequiz"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tracequiz");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().expect("Failed to wait on tracequiz")
}

#[test]
fn test_check_bundled_banks() {
    let dir = data_dir();
    let out = run(&["check", "--bank-dir", dir.to_str().unwrap()], "");
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout.contains("BANK CHECK"));
    for mode in ["result", "step-trace", "trace-table"] {
        assert!(stdout.contains(mode), "missing {} in summary", mode);
    }
}

#[test]
fn test_check_fails_on_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(&["check", "--bank-dir", dir.path().to_str().unwrap()], "");
    assert!(!out.status.success());
}

#[test]
fn test_play_trace_table_row() {
    let dir = data_dir();
    let out = run(
        &["play", "trace-table", "--seed", "1", "--bank-dir", dir.to_str().unwrap()],
        "place n 1\nplace total 1\nconfirm\nquit\n",
    );
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout.contains("(Row 1/"));
    assert!(Regex::new(r"Pieces: \[1\] \S+").unwrap().is_match(&stdout));
    assert!(stdout.contains("All slots filled"));
    assert!(Regex::new(r"(?m)^\[next\] next row$").unwrap().is_match(&stdout));
}

#[test]
fn test_play_result_answer() {
    let dir = data_dir();
    let out = run(
        &["play", "result", "--seed", "7", "--bank-dir", dir.to_str().unwrap()],
        "a\nquit\n",
    );
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success());
    assert!(Regex::new(r"Correct!|Not quite\.\.\.").unwrap().is_match(&stdout));
    assert!(stdout.contains("[next] next question"));
}

#[test]
fn test_missing_bank_shows_panel_and_returns_to_menu() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(
        &["play", "trace-table", "--bank-dir", dir.path().to_str().unwrap()],
        "quit\n",
    );
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success());
    assert!(stdout.contains("Failed to load the question data."));
    assert!(stdout.contains("[back to mode selection]"));
    assert!(stdout.contains("=== MODE SELECTION ==="));
}

#[test]
fn test_unknown_mode_is_rejected_by_parser() {
    let out = run(&["play", "bogus"], "");
    assert!(!out.status.success());
}

#[test]
fn test_slot_commands_on_result_question_report_wrong_kind() {
    let dir = data_dir();
    let out = run(
        &["play", "result", "--bank-dir", dir.to_str().unwrap()],
        "confirm\nremove x\nquit\n",
    );
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success());
    let wrong_kind = Regex::new(r"is a result question, expected trace-table").unwrap();
    assert_eq!(wrong_kind.find_iter(&stdout).count(), 2, "{}", stdout);
}
