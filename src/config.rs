//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Timeout in seconds for every outbound HTTP call
    pub http_timeout: u64,

    /// GitHub REST API base URL
    pub github_api_base: String,
    /// Raw file host used for project icon lookups
    pub github_raw_base: String,
    /// Optional token sent to the GitHub API
    pub github_token: Option<String>,
    /// Bluesky public AppView base URL
    pub bluesky_api_base: String,
    /// X/Twitter API base URL
    pub twitter_api_base: String,
    /// Bearer token for the X/Twitter API
    pub twitter_bearer_token: Option<String>,

    /// `owner/repo` whose commits make up the changelog
    pub changelog_repo: String,
    /// When set, the changelog is read with `git log` from this checkout
    pub changelog_local_path: Option<String>,
    /// Changelog TTL in seconds
    pub changelog_ttl: u64,

    /// Maximum number of cached avatars
    pub avatar_cache_size: usize,
    /// Avatar TTL in seconds
    pub avatar_ttl: u64,
    /// Maximum number of cached project icons
    pub icon_cache_size: usize,
    /// Project icon TTL in seconds
    pub icon_ttl: u64,
    /// Seconds an expired entry can still be served when the upstream fails
    pub stale_grace: u64,

    /// Bluesky handle used when a request names none
    pub bluesky_handle: String,
    /// X/Twitter username used when a request names none
    pub twitter_username: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 600)
    /// - `HTTP_TIMEOUT_SECS` - Outbound request timeout (default: 15)
    /// - `GITHUB_API_BASE`, `GITHUB_RAW_BASE`, `GITHUB_TOKEN`
    /// - `BLUESKY_API_BASE`, `TWITTER_API_BASE`, `TWITTER_BEARER_TOKEN`
    /// - `CHANGELOG_REPO` (default: LunarcatOwO/portfolio-v2),
    ///   `CHANGELOG_LOCAL_PATH`, `CHANGELOG_TTL` (default: 21600)
    /// - `AVATAR_CACHE_SIZE` (500), `AVATAR_TTL` (3600)
    /// - `ICON_CACHE_SIZE` (1000), `ICON_TTL` (3600)
    /// - `STALE_GRACE` (default: 86400)
    /// - `BLUESKY_HANDLE`, `TWITTER_USERNAME`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: parse_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            http_timeout: parse_or("HTTP_TIMEOUT_SECS", defaults.http_timeout),
            github_api_base: string_or("GITHUB_API_BASE", defaults.github_api_base),
            github_raw_base: string_or("GITHUB_RAW_BASE", defaults.github_raw_base),
            github_token: optional("GITHUB_TOKEN"),
            bluesky_api_base: string_or("BLUESKY_API_BASE", defaults.bluesky_api_base),
            twitter_api_base: string_or("TWITTER_API_BASE", defaults.twitter_api_base),
            twitter_bearer_token: optional("TWITTER_BEARER_TOKEN"),
            changelog_repo: string_or("CHANGELOG_REPO", defaults.changelog_repo),
            changelog_local_path: optional("CHANGELOG_LOCAL_PATH"),
            changelog_ttl: parse_or("CHANGELOG_TTL", defaults.changelog_ttl),
            avatar_cache_size: parse_or("AVATAR_CACHE_SIZE", defaults.avatar_cache_size),
            avatar_ttl: parse_or("AVATAR_TTL", defaults.avatar_ttl),
            icon_cache_size: parse_or("ICON_CACHE_SIZE", defaults.icon_cache_size),
            icon_ttl: parse_or("ICON_TTL", defaults.icon_ttl),
            stale_grace: parse_or("STALE_GRACE", defaults.stale_grace),
            bluesky_handle: string_or("BLUESKY_HANDLE", defaults.bluesky_handle),
            twitter_username: string_or("TWITTER_USERNAME", defaults.twitter_username),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cleanup_interval: 600,
            http_timeout: 15,
            github_api_base: "https://api.github.com".to_string(),
            github_raw_base: "https://raw.githubusercontent.com".to_string(),
            github_token: None,
            bluesky_api_base: "https://public.api.bsky.app".to_string(),
            twitter_api_base: "https://api.twitter.com".to_string(),
            twitter_bearer_token: None,
            changelog_repo: "LunarcatOwO/portfolio-v2".to_string(),
            changelog_local_path: None,
            changelog_ttl: 6 * 60 * 60,
            avatar_cache_size: 500,
            avatar_ttl: 60 * 60,
            icon_cache_size: 1000,
            icon_ttl: 60 * 60,
            stale_grace: 24 * 60 * 60,
            bluesky_handle: "lunarcatowo.space".to_string(),
            twitter_username: "LunarcatOwO".to_string(),
        }
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn string_or(name: &str, default: String) -> String {
    optional(name).unwrap_or(default)
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 600);
        assert_eq!(config.changelog_ttl, 21_600);
        assert_eq!(config.avatar_cache_size, 500);
        assert_eq!(config.avatar_ttl, 3600);
        assert_eq!(config.icon_cache_size, 1000);
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        env::set_var("PORTFOLIO_TEST_PARSE", "not-a-number");
        assert_eq!(parse_or("PORTFOLIO_TEST_PARSE", 42u64), 42);

        env::set_var("PORTFOLIO_TEST_PARSE", "7");
        assert_eq!(parse_or("PORTFOLIO_TEST_PARSE", 42u64), 7);
        env::remove_var("PORTFOLIO_TEST_PARSE");
    }

    #[test]
    fn test_optional_ignores_blank() {
        env::set_var("PORTFOLIO_TEST_BLANK", "  ");
        assert!(optional("PORTFOLIO_TEST_BLANK").is_none());
        env::remove_var("PORTFOLIO_TEST_BLANK");
        assert!(optional("PORTFOLIO_TEST_BLANK").is_none());
    }
}
