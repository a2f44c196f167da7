//! Payloads produced by upstream fetchers and stored in the caches.

use std::fmt;
use std::str::FromStr;

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A changelog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    /// Author date, ISO-8601
    pub date: String,
    pub author: String,
    /// First line of the commit message
    pub message: String,
}

impl CommitRecord {
    /// Builds a record, keeping only the first line of `message`.
    pub fn new(
        hash: impl Into<String>,
        date: impl Into<String>,
        author: impl Into<String>,
        message: &str,
    ) -> Self {
        Self {
            hash: hash.into(),
            date: date.into(),
            author: author.into(),
            message: first_line(message).to_string(),
        }
    }
}

/// Returns `text` up to its first line break.
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim_end_matches('\r')
}

/// Binary image with its content type.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    pub bytes: Bytes,
    pub content_type: String,
}

impl ImageAsset {
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// Wraps generated SVG markup.
    pub fn svg(markup: String) -> Self {
        Self::new(markup, "image/svg+xml")
    }
}

/// Cached project icon; `is_real` is false for generated fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectIcon {
    pub image: ImageAsset,
    pub is_real: bool,
}

/// Social platforms with a feed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Bluesky,
    Twitter,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Bluesky => "bluesky",
            Platform::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bluesky" | "bsky" => Ok(Platform::Bluesky),
            "twitter" | "x" => Ok(Platform::Twitter),
            other => Err(format!("Unsupported platform: {other}")),
        }
    }
}

/// A post normalized across platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: String,
    pub platform: Platform,
    pub author: SocialAuthor,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub metrics: SocialMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAuthor {
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMetrics {
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
}
