//! Social Feed Client
//!
//! Normalizes Bluesky and X/Twitter timelines into `SocialPost`s.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::{Platform, SocialAuthor, SocialMetrics, SocialPost};

use super::types::{AuthorFeed, FeedItem, ResolvedHandle, TwitterTimeline, TwitterUserLookup};
use super::{ensure_success, join_url, SocialFetcher};

/// Twitter rejects `max_results` below this
const TWITTER_MIN_RESULTS: u32 = 5;

/// Client for the public Bluesky AppView and the X/Twitter v2 API.
#[derive(Clone)]
pub struct SocialClient {
    http: Client,
    bluesky_base: String,
    twitter_base: String,
    twitter_token: Option<String>,
}

impl SocialClient {
    pub fn new(
        http: Client,
        bluesky_base: impl Into<String>,
        twitter_base: impl Into<String>,
        twitter_token: Option<String>,
    ) -> Self {
        Self {
            http,
            bluesky_base: bluesky_base.into(),
            twitter_base: twitter_base.into(),
            twitter_token,
        }
    }

    pub fn from_config(http: Client, config: &Config) -> Self {
        Self::new(
            http,
            &config.bluesky_api_base,
            &config.twitter_api_base,
            config.twitter_bearer_token.clone(),
        )
    }

    // == Bluesky ==
    /// Resolve `handle` to a DID, then read the author's feed.
    pub async fn bluesky_posts(&self, handle: &str, limit: u32) -> FetchResult<Vec<SocialPost>> {
        let url = join_url(
            &self.bluesky_base,
            &["xrpc", "com.atproto.identity.resolveHandle"],
        )?;
        let response = self.http.get(url).query(&[("handle", handle)]).send().await?;
        let resolved: ResolvedHandle = ensure_success(response, "Bluesky handle")?.json().await?;

        let url = join_url(&self.bluesky_base, &["xrpc", "app.bsky.feed.getAuthorFeed"])?;
        let limit = limit.to_string();
        let response = self
            .http
            .get(url)
            .query(&[("actor", resolved.did.as_str()), ("limit", limit.as_str())])
            .send()
            .await?;
        let feed: AuthorFeed = ensure_success(response, "Bluesky feed")?.json().await?;

        debug!(handle, count = feed.feed.len(), "Fetched Bluesky feed");
        Ok(feed.feed.into_iter().map(bluesky_post).collect())
    }

    // == Twitter ==
    /// Resolve `username` to a user id, then read recent tweets.
    pub async fn twitter_posts(&self, username: &str, limit: u32) -> FetchResult<Vec<SocialPost>> {
        let token = self
            .twitter_token
            .as_deref()
            .ok_or_else(|| FetchError::NotConfigured("Twitter API token".to_string()))?;

        let url = join_url(&self.twitter_base, &["2", "users", "by", "username", username])?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let user: TwitterUserLookup = ensure_success(response, "Twitter user")?.json().await?;

        let url = join_url(&self.twitter_base, &["2", "users", user.data.id.as_str(), "tweets"])?;
        let max_results = limit.max(TWITTER_MIN_RESULTS).to_string();
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("max_results", max_results.as_str()),
                ("tweet.fields", "created_at,public_metrics"),
                ("expansions", "author_id"),
                ("user.fields", "name,username,profile_image_url"),
            ])
            .send()
            .await?;
        let timeline: TwitterTimeline = ensure_success(response, "Twitter timeline")?.json().await?;

        debug!(username, count = timeline.data.len(), "Fetched Twitter timeline");
        Ok(twitter_posts(timeline, username, limit as usize))
    }
}

fn bluesky_post(item: FeedItem) -> SocialPost {
    let post = item.post;
    let rkey = post.uri.rsplit('/').next().unwrap_or_default().to_string();
    let url = format!("https://bsky.app/profile/{}/post/{}", post.author.handle, rkey);

    SocialPost {
        id: post.uri,
        platform: Platform::Bluesky,
        author: SocialAuthor {
            display_name: post
                .author
                .display_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| post.author.handle.clone()),
            username: post.author.handle,
            avatar: post.author.avatar,
        },
        content: post.record.text,
        timestamp: post.record.created_at,
        url,
        metrics: SocialMetrics {
            likes: post.like_count,
            reposts: post.repost_count,
            replies: post.reply_count,
        },
    }
}

fn twitter_posts(timeline: TwitterTimeline, username: &str, limit: usize) -> Vec<SocialPost> {
    let users = timeline.includes.map(|i| i.users).unwrap_or_default();

    timeline
        .data
        .into_iter()
        .take(limit)
        .map(|tweet| {
            let author = users
                .iter()
                .find(|u| Some(&u.id) == tweet.author_id.as_ref());
            let handle = author.map_or(username, |a| a.username.as_str()).to_string();
            let metrics = tweet.public_metrics.unwrap_or_default();

            SocialPost {
                url: format!("https://x.com/{}/status/{}", handle, tweet.id),
                id: tweet.id,
                platform: Platform::Twitter,
                author: SocialAuthor {
                    display_name: author.map_or(username, |a| a.name.as_str()).to_string(),
                    avatar: author.and_then(|a| a.profile_image_url.clone()),
                    username: handle,
                },
                content: tweet.text,
                timestamp: tweet.created_at,
                metrics: SocialMetrics {
                    likes: metrics.like_count,
                    reposts: metrics.retweet_count,
                    replies: metrics.reply_count,
                },
            }
        })
        .collect()
}

#[async_trait]
impl SocialFetcher for SocialClient {
    async fn fetch_posts(
        &self,
        platform: Platform,
        handle: &str,
        limit: u32,
    ) -> FetchResult<Vec<SocialPost>> {
        match platform {
            Platform::Bluesky => self.bluesky_posts(handle, limit).await,
            Platform::Twitter => self.twitter_posts(handle, limit).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bluesky_post_normalization() {
        let item: FeedItem = serde_json::from_value(serde_json::json!({
            "post": {
                "uri": "at://did:plc:abc/app.bsky.feed.post/3kxyz",
                "author": {"handle": "cat.bsky.social", "displayName": ""},
                "record": {"text": "meow", "createdAt": "2025-03-01T10:00:00Z"},
                "likeCount": 4,
                "replyCount": 1
            }
        }))
        .unwrap();

        let post = bluesky_post(item);
        assert_eq!(post.url, "https://bsky.app/profile/cat.bsky.social/post/3kxyz");
        assert_eq!(post.author.display_name, "cat.bsky.social");
        assert_eq!(post.metrics, SocialMetrics { likes: 4, reposts: 0, replies: 1 });
        assert_eq!(post.platform, Platform::Bluesky);
    }

    #[test]
    fn test_twitter_posts_join_authors_and_truncate() {
        let timeline: TwitterTimeline = serde_json::from_value(serde_json::json!({
            "data": [
                {"id": "1", "text": "one", "created_at": "2025-01-01T00:00:00.000Z", "author_id": "9",
                 "public_metrics": {"like_count": 3, "retweet_count": 2, "reply_count": 1}},
                {"id": "2", "text": "two", "created_at": "2025-01-02T00:00:00.000Z", "author_id": "9"},
                {"id": "3", "text": "three", "created_at": "2025-01-03T00:00:00.000Z"}
            ],
            "includes": {"users": [{"id": "9", "name": "Lunar", "username": "lunar", "profile_image_url": "https://img"}]}
        }))
        .unwrap();

        let posts = twitter_posts(timeline, "fallback", 2);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].url, "https://x.com/lunar/status/1");
        assert_eq!(posts[0].author.display_name, "Lunar");
        assert_eq!(posts[0].metrics.reposts, 2);
        assert_eq!(posts[1].metrics, SocialMetrics::default());
    }

    #[test]
    fn test_twitter_posts_unknown_author_uses_username() {
        let timeline: TwitterTimeline = serde_json::from_value(serde_json::json!({
            "data": [{"id": "7", "text": "hi", "created_at": "2025-01-01T00:00:00Z"}]
        }))
        .unwrap();

        let posts = twitter_posts(timeline, "someone", 5);
        assert_eq!(posts[0].author.username, "someone");
        assert_eq!(posts[0].url, "https://x.com/someone/status/7");
        assert!(posts[0].author.avatar.is_none());
    }

    #[tokio::test]
    async fn test_twitter_requires_token() {
        let client =
            SocialClient::new(Client::new(), "http://127.0.0.1:9", "http://127.0.0.1:9", None);
        let result = client.fetch_posts(Platform::Twitter, "x", 5).await;
        assert!(matches!(result, Err(FetchError::NotConfigured(_))));
    }
}
