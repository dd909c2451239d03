//! # Motiv Client Configuration
//!
//! File: server/src/core/config.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Settings shared by the client subcommands (`ask`, `quote`, `share`,
//! `history`): where the server lives and where the transcript cache is kept.
//! Server-side settings live with the `serve` command
//! (`commands/serve/config.rs`).
//!
//! Sources, in order of precedence:
//! 1. Command-line flags (`--server`, `--history-dir`)
//! 2. Environment variables (`MOTIV_SERVER`, `MOTIV_HISTORY_DIR`), also read from `.env`
//! 3. Defaults: `http://localhost:3000` and the platform data directory
//!
use crate::core::error::{MotivError, Result};
use anyhow::anyhow;
use clap::Args;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Default base URL of a locally running `motiv serve`.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Flags shared by every client subcommand.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Base URL of the Motiv server.
    #[arg(long, env = "MOTIV_SERVER", default_value = DEFAULT_SERVER_URL, global = true)]
    pub server: String,

    /// Directory holding the local chat transcript cache.
    #[arg(long, env = "MOTIV_HISTORY_DIR", global = true)]
    pub history_dir: Option<String>,
}

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub history_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_args(args: &ClientArgs) -> Result<Self> {
        let server_url = args.server.trim().trim_end_matches('/').to_string();
        if server_url.is_empty() {
            return Err(anyhow!(MotivError::Config(
                "Server URL cannot be empty.".to_string()
            )));
        }

        let history_dir = match &args.history_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).into_owned()),
            None => default_history_dir()?,
        };
        debug!("Transcript cache directory: {}", history_dir.display());

        Ok(Self {
            server_url,
            history_dir,
        })
    }
}

fn default_history_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "Motiv", "motiv")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            anyhow!(MotivError::Config(
                "Could not determine a data directory; pass --history-dir.".to_string()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_trims_trailing_slash() {
        let args = ClientArgs {
            server: "http://127.0.0.1:4000/".to_string(),
            history_dir: Some("/tmp/motiv-history".to_string()),
        };
        let config = ClientConfig::from_args(&args).unwrap();
        assert_eq!(config.server_url, "http://127.0.0.1:4000");
        assert_eq!(config.history_dir, PathBuf::from("/tmp/motiv-history"));
    }

    #[test]
    fn test_from_args_expands_tilde() {
        let args = ClientArgs {
            server: DEFAULT_SERVER_URL.to_string(),
            history_dir: Some("~/motiv".to_string()),
        };
        let config = ClientConfig::from_args(&args).unwrap();
        assert!(!config.history_dir.to_string_lossy().starts_with('~'));
        assert!(config.history_dir.ends_with("motiv"));
    }

    #[test]
    fn test_from_args_rejects_empty_server() {
        let args = ClientArgs {
            server: "  ".to_string(),
            history_dir: Some("/tmp".to_string()),
        };
        let err = ClientConfig::from_args(&args).unwrap_err();
        assert!(err.to_string().contains("Server URL cannot be empty"));
    }
}
