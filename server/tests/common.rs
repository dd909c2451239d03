//! # Motiv Integration Test Common Helpers
//!
//! File: server/tests/common.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `server/tests/`. Each test
//! file runs the compiled `motiv` binary through `assert_cmd`.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;

/// Returns a `Command` for the `motiv` binary built for this test run.
///
/// Client environment variables are cleared so a developer's shell cannot
/// point the tests at a real server or history directory.
pub fn motiv_cmd() -> Command {
    let mut cmd = Command::cargo_bin("motiv").expect("Failed to find motiv binary for testing");
    cmd.env_remove("MOTIV_SERVER")
        .env_remove("MOTIV_HISTORY_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// A base URL with nothing listening behind it.
pub fn dead_server_url() -> String {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe listener");
    let port = listener
        .local_addr()
        .expect("Failed to read probe address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
