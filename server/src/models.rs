//! # Motiv Wire Models
//!
//! File: server/src/models.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Request and response payloads shared by the HTTP handlers and the client,
//! plus the chat message type kept in the transcript cache.
//!

use serde::{Deserialize, Serialize};

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/ai`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Response of `POST /api/ai`: either `reply`, or `error` with an optional `detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AiReply {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Response of `GET /api/quote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub quote: String,
}

/// Body of `POST /api/social`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareRequest {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Response of `POST /api/social`: either `shareUrl` or `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roles_serialize_lowercase() {
        let value = serde_json::to_value(ChatMessage::assistant("hai")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "hai"}));
    }

    #[test]
    fn test_ai_reply_omits_absent_fields() {
        let value = serde_json::to_value(AiReply::reply("ok")).unwrap();
        assert_eq!(value, json!({"reply": "ok"}));
    }

    #[test]
    fn test_share_reply_uses_camel_case() {
        let reply = ShareReply {
            share_url: Some("https://www.instagram.com/".into()),
            error: None,
        };
        let value = serde_json::to_value(reply).unwrap();
        assert_eq!(value, json!({"shareUrl": "https://www.instagram.com/"}));
    }

    #[test]
    fn test_requests_tolerate_missing_and_null_fields() {
        let req: AiRequest = serde_json::from_value(json!({"prompt": null})).unwrap();
        assert!(req.prompt.is_none());
        assert!(req.model.is_none());

        let req: ShareRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.platform.is_none());
    }
}
