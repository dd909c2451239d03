//! # Prompt Relay
//!
//! File: server/src/services/relay.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Forwards a single user prompt to an OpenAI-compatible chat-completion
//! endpoint and returns the text of the first completion.
//!
//! - No credential configured: returns [`PLACEHOLDER_REPLY`] without touching
//!   the network.
//! - Non-success upstream status: fails with `MotivError::Upstream`, carrying
//!   the status code and the raw response body.
//! - Success without a usable first choice: returns [`NO_REPLY`].
//!
//! ## Architecture
//!
//! All settings arrive in a [`RelayConfig`] built once at startup; the relay
//! reads nothing from the process environment. One pooled `reqwest::Client`
//! is shared by every request.
//!
//! Two credential sources are accepted (`OPENAI_API_KEY`, then
//! `GROQ_API_KEY`). Both go through the same request path; the source only
//! changes the label used in error messages. Point `AI_API_URL` at another
//! OpenAI-compatible endpoint to use a different provider.
//!
use crate::core::error::{MotivError, Result};
use crate::models::ChatMessage;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MAX_TOKENS: u32 = 500;

pub const PLACEHOLDER_REPLY: &str =
    "AI key not configured. Set OPENAI_API_KEY or GROQ_API_KEY to get real responses.";
pub const NO_REPLY: &str = "No reply";

/// Where the API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    OpenAi,
    Groq,
}

impl CredentialSource {
    fn error_label(self) -> &'static str {
        match self {
            CredentialSource::OpenAi => "OpenAI",
            CredentialSource::Groq => "AI",
        }
    }
}

/// A bearer token plus its source. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub source: CredentialSource,
    secret: String,
}

impl Credential {
    pub fn new(source: CredentialSource, secret: impl Into<String>) -> Self {
        Self {
            source,
            secret: secret.into(),
        }
    }

    /// Picks the OpenAI key if set, otherwise the Groq key. Blank values count as unset.
    pub fn resolve<'a>(openai_key: Option<&'a str>, groq_key: Option<&'a str>) -> Option<Self> {
        let present = |key: Option<&'a str>| key.map(str::trim).filter(|k| !k.is_empty());
        present(openai_key)
            .map(|k| Credential::new(CredentialSource::OpenAi, k))
            .or_else(|| present(groq_key).map(|k| Credential::new(CredentialSource::Groq, k)))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Everything the relay needs, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub credential: Option<Credential>,
    pub default_model: String,
    pub api_url: String,
    pub max_tokens: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            credential: None,
            default_model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage; 1],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for the upstream chat-completion API.
#[derive(Debug, Clone)]
pub struct ChatRelay {
    http: reqwest::Client,
    config: RelayConfig,
}

impl ChatRelay {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.credential.is_some()
    }

    /// Sends `prompt` as a single user message and returns the first completion's text.
    ///
    /// An absent or empty `model` falls back to the configured default.
    pub async fn complete(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        let Some(credential) = &self.config.credential else {
            debug!("No credential configured, returning placeholder reply");
            return Ok(PLACEHOLDER_REPLY.to_string());
        };

        let model = model
            .filter(|m| !m.is_empty())
            .unwrap_or(self.config.default_model.as_str());
        let request = CompletionRequest {
            model,
            messages: [ChatMessage::user(prompt)],
            max_tokens: self.config.max_tokens,
        };

        debug!("Relaying prompt to {} with model {}", self.config.api_url, model);
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&credential.secret)
            .json(&request)
            .send()
            .await
            .map_err(MotivError::from)?;

        let status = response.status();
        if !status.is_success() {
            // Keep the status even if the body can't be read.
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read upstream error body: {}", e);
                    String::new()
                }
            };
            warn!("Upstream returned {}: {}", status, body);
            return Err(MotivError::Upstream {
                provider: credential.source.error_label().to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to decode chat-completion response")?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_else(|| NO_REPLY.to_string()))
    }
}
