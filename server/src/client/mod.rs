//! # Motiv Client
//!
//! File: server/src/client/mod.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Helpers for talking to a running Motiv server, plus the local transcript
//! cache (`transcript`). None of the helpers return errors: every failure
//! degrades to a default value the caller can show as-is.
//!
//! | Helper          | On failure                                       |
//! |-----------------|--------------------------------------------------|
//! | `send_to_ai`    | `AiReply` with `error` set to the failure message |
//! | `fetch_quote`   | [`QUOTE_FALLBACK`]                               |
//! | `share_link`    | `ShareReply` with `error` set                    |
//!
//! ## Examples
//!
//! ```rust
//! let client = ApiClient::new("http://localhost:3000");
//! let reply = client.send_to_ai("Beri aku semangat", "").await;
//! println!("{}", reply.reply.or(reply.error).unwrap_or_default());
//! ```
//!
pub mod transcript;

use crate::models::{AiReply, AiRequest, QuoteResponse, ShareReply, ShareRequest};
use tracing::debug;

/// Shown when no quote can be fetched.
pub const QUOTE_FALLBACK: &str = "Tidak dapat mengambil quote sekarang.";

/// HTTP client for the `/api/*` endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Posts a prompt to `/api/ai` and returns whatever JSON the server sent back.
    ///
    /// An empty `model` lets the server use its default.
    pub async fn send_to_ai(&self, prompt: &str, model: &str) -> AiReply {
        let request = AiRequest {
            prompt: Some(prompt.to_string()),
            model: Some(model.to_string()),
        };
        let result = async {
            self.http
                .post(self.url("/api/ai"))
                .json(&request)
                .send()
                .await?
                .json::<AiReply>()
                .await
        }
        .await;

        result.unwrap_or_else(|e| {
            debug!("AI request failed: {}", e);
            AiReply::error(describe(&e))
        })
    }

    /// Fetches a random quote, or [`QUOTE_FALLBACK`] if the server can't be reached.
    pub async fn fetch_quote(&self) -> String {
        let result = async {
            self.http
                .get(self.url("/api/quote"))
                .send()
                .await?
                .error_for_status()?
                .json::<QuoteResponse>()
                .await
        }
        .await;

        match result {
            Ok(body) => body.quote,
            Err(e) => {
                debug!("Quote request failed: {}", e);
                QUOTE_FALLBACK.to_string()
            }
        }
    }

    /// Asks the server for a share link.
    pub async fn share_link(&self, platform: &str, text: Option<&str>, url: Option<&str>) -> ShareReply {
        let request = ShareRequest {
            platform: Some(platform.to_string()),
            text: text.map(str::to_string),
            url: url.map(str::to_string),
        };
        let result = async {
            self.http
                .post(self.url("/api/social"))
                .json(&request)
                .send()
                .await?
                .json::<ShareReply>()
                .await
        }
        .await;

        result.unwrap_or_else(|e| {
            debug!("Share request failed: {}", e);
            ShareReply {
                error: Some(describe(&e)),
                ..Default::default()
            }
        })
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        "Network error".to_string()
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::serve::routes::{self, AppState};
    use crate::services::{
        quotes::{QuoteSet, QUOTES},
        relay::{ChatRelay, RelayConfig, PLACEHOLDER_REPLY},
    };
    use std::sync::Arc;
    use tokio::net::TcpListener;

    /// Runs the real API router on an ephemeral port and returns its base URL.
    async fn spawn_server() -> String {
        let state = Arc::new(AppState {
            relay: ChatRelay::new(RelayConfig::default()),
            quotes: QuoteSet::default(),
        });
        let app = routes::router().with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// A base URL nothing is listening on.
    async fn dead_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_send_to_ai_returns_reply() {
        let client = ApiClient::new(&spawn_server().await);
        let reply = client.send_to_ai("Beri aku semangat", "").await;
        assert_eq!(reply, AiReply::reply(PLACEHOLDER_REPLY));
    }

    #[tokio::test]
    async fn test_send_to_ai_surfaces_server_error_body() {
        let client = ApiClient::new(&spawn_server().await);
        let reply = client.send_to_ai("", "").await;
        assert_eq!(reply, AiReply::error("Missing prompt"));
    }

    #[tokio::test]
    async fn test_send_to_ai_network_failure() {
        let client = ApiClient::new(&dead_server().await);
        let reply = client.send_to_ai("hi", "").await;
        assert!(reply.reply.is_none());
        assert_eq!(reply.error.as_deref(), Some("Network error"));
    }

    #[tokio::test]
    async fn test_fetch_quote() {
        let client = ApiClient::new(&format!("{}/", spawn_server().await));
        let quote = client.fetch_quote().await;
        assert!(QUOTES.contains(&quote.as_str()));
    }

    #[tokio::test]
    async fn test_fetch_quote_fallback() {
        let client = ApiClient::new(&dead_server().await);
        assert_eq!(client.fetch_quote().await, QUOTE_FALLBACK);
    }

    #[tokio::test]
    async fn test_share_link() {
        let client = ApiClient::new(&spawn_server().await);
        let reply = client.share_link("twitter", Some("hi"), Some("http://x")).await;
        assert_eq!(
            reply.share_url.as_deref(),
            Some("https://twitter.com/intent/tweet?text=hi&url=http%3A%2F%2Fx")
        );

        let reply = client.share_link("", None, None).await;
        assert_eq!(reply.error.as_deref(), Some("Missing platform"));
    }
}
