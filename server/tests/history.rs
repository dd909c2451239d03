//! # Motiv CLI History Integration Tests
//!
//! File: server/tests/history.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! `motiv history` against temporary history directories.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_history_empty() {
    let temp_dir = tempdir().unwrap();
    motiv_cmd()
        .arg("--history-dir")
        .arg(temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No chat history yet."));
}

#[test]
fn test_history_prints_saved_transcript() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("chat_history.json"),
        r#"[{"role":"user","content":"Beri aku semangat"},{"role":"assistant","content":"Kamu pasti bisa!"}]"#,
    )
    .unwrap();

    motiv_cmd()
        .args(["history", "--history-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[you] Beri aku semangat"))
        .stdout(predicate::str::contains("[ai] Kamu pasti bisa!"));
}

#[test]
fn test_history_corrupt_file_reads_as_empty() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("chat_history.json"), "{oops").unwrap();

    motiv_cmd()
        .env("MOTIV_HISTORY_DIR", temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No chat history yet."));
}

#[test]
fn test_history_clear() {
    let temp_dir = tempdir().unwrap();
    let history_file = temp_dir.path().join("chat_history.json");
    fs::write(&history_file, "[]").unwrap();

    motiv_cmd()
        .args(["history", "--clear", "--history-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Chat history cleared."));
    assert!(!history_file.exists());
}
