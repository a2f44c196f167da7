//! Upstream API Types
//!
//! Only the fields the fetchers read are declared; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

// == GitHub ==

/// Item of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Deserialize)]
pub struct GitHubCommitItem {
    pub sha: String,
    pub commit: GitHubCommitDetail,
}

#[derive(Debug, Deserialize)]
pub struct GitHubCommitDetail {
    /// Null for commits whose author data GitHub could not parse
    pub author: Option<GitHubCommitAuthor>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GitHubCommitAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

/// `GET /users/{username}`.
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    pub avatar_url: Option<String>,
}

/// `GET /repos/{owner}/{repo}`.
#[derive(Debug, Deserialize)]
pub struct GitHubRepository {
    pub default_branch: Option<String>,
}

// == Bluesky ==

/// `com.atproto.identity.resolveHandle`.
#[derive(Debug, Deserialize)]
pub struct ResolvedHandle {
    pub did: String,
}

/// `app.bsky.feed.getAuthorFeed`.
#[derive(Debug, Deserialize)]
pub struct AuthorFeed {
    #[serde(default)]
    pub feed: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
pub struct FeedItem {
    pub post: BlueskyPost,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueskyPost {
    pub uri: String,
    pub author: BlueskyAuthor,
    pub record: BlueskyRecord,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub repost_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueskyAuthor {
    pub handle: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueskyRecord {
    #[serde(default)]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// == Twitter ==

/// `GET /2/users/by/username/{username}`.
#[derive(Debug, Deserialize)]
pub struct TwitterUserLookup {
    pub data: TwitterUserId,
}

#[derive(Debug, Deserialize)]
pub struct TwitterUserId {
    pub id: String,
}

/// `GET /2/users/{id}/tweets`.
#[derive(Debug, Deserialize)]
pub struct TwitterTimeline {
    /// Absent when the user has no tweets
    #[serde(default)]
    pub data: Vec<Tweet>,
    pub includes: Option<TwitterIncludes>,
}

#[derive(Debug, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Option<String>,
    pub public_metrics: Option<TweetMetrics>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TweetMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TwitterIncludes {
    #[serde(default)]
    pub users: Vec<TwitterUser>,
}

#[derive(Debug, Deserialize)]
pub struct TwitterUser {
    pub id: String,
    pub name: String,
    pub username: String,
    pub profile_image_url: Option<String>,
}
