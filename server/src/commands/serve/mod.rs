//! # Motiv Server Command
//!
//! File: server/src/commands/serve/mod.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! `motiv serve` runs the HTTP backend: the prompt relay, the quote endpoint,
//! the share-link endpoint and static files from a directory.
//!
//! ## Architecture
//!
//! - `config.rs`: argument, environment and `.motiv.toml` merging
//! - `routes.rs`: the `/api/*` handlers and their error mapping
//! - `server_logic.rs`: router assembly, port selection, serving and shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve the current directory on port 3000
//! motiv serve
//!
//! # Serve ./public on port 8080, using a Groq key and endpoint
//! GROQ_API_KEY=gsk-... AI_API_URL=https://api.groq.com/openai/v1/chat/completions \
//!     motiv serve --port 8080 ./public
//! ```
//!
use crate::core::error::Result;
use tracing::info;

pub use config::ServeArgs;

/// Configuration loading and merging for the server.
pub mod config;

/// The JSON API handlers.
pub mod routes;

/// Axum server setup and lifecycle.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Loads the effective configuration and runs the server until shutdown.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command");

    let config = config::load_and_merge_config(args).await?;
    info!("Effective server config: {:?}", config);

    server_logic::run_server(config).await?;
    Ok(())
}
