//! # Share-Link Builder
//!
//! File: server/src/services/share.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Turns a platform name plus optional text and URL into a link that opens the
//! platform's share (or search) page pre-filled with that content.
//!
//! | Platform            | Link                                                             |
//! |---------------------|------------------------------------------------------------------|
//! | `facebook`, `fb`    | `https://www.facebook.com/sharer/sharer.php?u={url}&quote={text}` |
//! | `twitter`           | `https://twitter.com/intent/tweet?text={text}&url={url}`          |
//! | `instagram`, `ig`   | `https://www.instagram.com/`                                      |
//! | `tiktok`            | `https://www.tiktok.com/search?q={text}`                          |
//! | anything else       | the raw `url`, or an empty string                                 |
//!
//! Platform names are matched case-insensitively. Text and URL are
//! percent-encoded as URI components before substitution; the passthrough
//! case returns the URL exactly as given.
//!
//! ## Examples
//!
//! ```rust
//! let link = share::build_share_url("Twitter", Some("hi"), Some("http://x"));
//! assert_eq!(link, "https://twitter.com/intent/tweet?text=hi&url=http%3A%2F%2Fx");
//! ```
//!
use std::borrow::Cow;

/// Platforms with a dedicated share link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    Twitter,
    Instagram,
    TikTok,
    /// Unrecognised name; the URL is passed through untouched.
    Other,
}

impl Platform {
    /// Maps a user-supplied name, in any case, to a platform.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "facebook" | "fb" => Platform::Facebook,
            "twitter" => Platform::Twitter,
            "instagram" | "ig" => Platform::Instagram,
            "tiktok" => Platform::TikTok,
            _ => Platform::Other,
        }
    }

    /// Builds the share link for this platform.
    pub fn share_url(self, text: &str, url: &str) -> String {
        let encoded_text = encode_component(text);
        let encoded_url = encode_component(url);
        match self {
            Platform::Facebook => format!(
                "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
                encoded_url, encoded_text
            ),
            Platform::Twitter => format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encoded_text, encoded_url
            ),
            // Instagram has no web share intent; link to the home page.
            Platform::Instagram => "https://www.instagram.com/".to_string(),
            Platform::TikTok => format!("https://www.tiktok.com/search?q={}", encoded_text),
            Platform::Other => url.to_string(),
        }
    }
}

/// Builds a share link from raw request fields. Missing text or URL count as empty.
pub fn build_share_url(platform: &str, text: Option<&str>, url: Option<&str>) -> String {
    Platform::parse(platform).share_url(text.unwrap_or_default(), url.unwrap_or_default())
}

/// Percent-encodes a URI component.
///
/// Leaves the unreserved set plus `!'()*` as-is, matching the component
/// encoding browsers apply to query values.
fn encode_component(input: &str) -> Cow<'_, str> {
    let encoded = urlencoding::encode(input);
    if !encoded.contains("%2") {
        return encoded;
    }
    Cow::Owned(
        encoded
            .replace("%21", "!")
            .replace("%27", "'")
            .replace("%28", "(")
            .replace("%29", ")")
            .replace("%2A", "*"),
    )
}
