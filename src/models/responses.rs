//! Response DTOs for the portfolio API
//!
//! Defines the structure of outgoing JSON bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{CommitRecord, SocialPost};

/// Response body for `GET /changelog`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogResponse {
    pub success: bool,
    pub commits: Vec<CommitRecord>,
    pub total: usize,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<bool>,
    /// Milliseconds since the cached copy was fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChangelogResponse {
    /// Freshly fetched commits.
    pub fn fresh(commits: Vec<CommitRecord>) -> Self {
        Self {
            success: true,
            total: commits.len(),
            commits,
            cached: false,
            stale: None,
            cache_age: None,
            error: None,
        }
    }

    /// Commits served from a fresh cache entry.
    pub fn cached(commits: Vec<CommitRecord>, cache_age: u64) -> Self {
        Self {
            cached: true,
            cache_age: Some(cache_age),
            ..Self::fresh(commits)
        }
    }

    /// Commits served from an expired entry because the upstream failed.
    pub fn stale(commits: Vec<CommitRecord>) -> Self {
        Self {
            cached: true,
            stale: Some(true),
            error: Some("Using stale cache due to error".to_string()),
            ..Self::fresh(commits)
        }
    }
}

/// Response body for `GET /social/:platform`
#[derive(Debug, Clone, Serialize)]
pub struct SocialFeedResponse {
    pub posts: Vec<SocialPost>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Per-store statistics in `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for StoreStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub avatars: StoreStatsResponse,
    pub icons: StoreStatsResponse,
    pub changelog: StoreStatsResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit() -> CommitRecord {
        CommitRecord::new("abc123", "2025-01-01T00:00:00Z", "A", "Initial commit")
    }

    #[test]
    fn test_changelog_fresh_serialize() {
        let json = serde_json::to_value(ChangelogResponse::fresh(vec![commit()])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["total"], 1);
        assert_eq!(json["cached"], false);
        assert!(json.get("stale").is_none());
        assert!(json.get("cacheAge").is_none());
        assert_eq!(json["commits"][0]["message"], "Initial commit");
    }

    #[test]
    fn test_changelog_cached_serialize() {
        let json = serde_json::to_value(ChangelogResponse::cached(vec![commit()], 1500)).unwrap();
        assert_eq!(json["cached"], true);
        assert_eq!(json["cacheAge"], 1500);
    }

    #[test]
    fn test_changelog_stale_serialize() {
        let json = serde_json::to_value(ChangelogResponse::stale(vec![commit()])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["cached"], true);
        assert_eq!(json["stale"], true);
        assert!(json["error"].as_str().unwrap().contains("stale"));
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_store_stats_flatten() {
        let mut stats = CacheStats::new(10);
        stats.record_hit();
        stats.record_miss();
        let json = serde_json::to_value(StoreStatsResponse::from(stats)).unwrap();
        assert_eq!(json["max_size"], 10);
        assert_eq!(json["hits"], 1);
        assert_eq!(json["hit_rate"], 0.5);
    }
}
