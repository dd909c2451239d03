//! # Motiv Error Types
//!
//! File: server/src/core/error.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! This module defines the error types shared by the server and the client
//! commands. It follows the same two-layer approach everywhere:
//! - `MotivError`: a `thiserror` enum for failures the code needs to tell apart
//! - `Result<T>`: an alias for `anyhow::Result<T>` used for propagation
//!
//! The HTTP layer downcasts to `MotivError` to choose a status code
//! (see `commands/serve/routes.rs`). Anything it does not recognise is an
//! upstream failure and is reported as a 500.
//!
//! ## Examples
//!
//! ```rust
//! if prompt.is_empty() {
//!     return Err(MotivError::MissingInput("prompt"))?;
//! }
//!
//! let body = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the Motiv application.
#[derive(Error, Debug)]
pub enum MotivError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required request field was absent or empty.
    #[error("Missing {0}")]
    MissingInput(&'static str),

    /// The upstream chat-completion API answered with a non-success status.
    #[error("{provider} error: {status} {body}")]
    Upstream {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("HTTP request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
