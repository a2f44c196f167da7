//! Domain payloads plus request and response models
//!
//! Payloads flow from upstream fetchers into the caches; the DTOs define
//! the HTTP query strings and JSON bodies.

pub mod payloads;
pub mod repo;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use payloads::{
    first_line, CommitRecord, ImageAsset, Platform, ProjectIcon, SocialAuthor, SocialMetrics,
    SocialPost,
};
pub use repo::RepoId;
pub use requests::{AvatarQuery, IconQuery, SocialQuery};
pub use responses::{
    ChangelogResponse, HealthResponse, SocialFeedResponse, StatsResponse, StoreStatsResponse,
};
