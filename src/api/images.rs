//! Image Routes
//!
//! GitHub avatars and project icons. Both always answer with an image;
//! when upstream has nothing to offer a generated lettered SVG takes its
//! place.

use axum::{
    extract::{Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap, HeaderName, HeaderValue,
    },
    response::{IntoResponse, Response},
};

use crate::error::{AppError, FetchError, Result};
use crate::fallback::fallback_icon;
use crate::models::{AvatarQuery, IconQuery, ImageAsset, ProjectIcon};

use super::handlers::AppState;
use super::resolve::{resolve_cached, Resolved};

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
pub const X_PROJECT_ICON: HeaderName = HeaderName::from_static("x-project-icon");

const IMAGE_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

/// Value of the `X-Cache` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Stale,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Stale => "STALE",
        }
    }
}

fn image_response(image: ImageAsset, status: CacheStatus, icon: Option<bool>) -> Response {
    let mut headers = HeaderMap::new();
    let content_type = HeaderValue::from_str(&image.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    headers.insert(CONTENT_TYPE, content_type);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(IMAGE_CACHE_CONTROL));
    headers.insert(X_CACHE, HeaderValue::from_static(status.as_str()));
    if let Some(is_real) = icon {
        let kind = if is_real { "real" } else { "fallback" };
        headers.insert(X_PROJECT_ICON, HeaderValue::from_static(kind));
    }

    (headers, image.bytes).into_response()
}

/// Handler for GET /avatar
///
/// A user that cannot be resolved gets a fallback lettered after the
/// username. Fallbacks are not cached.
pub async fn avatar_handler(
    State(state): State<AppState>,
    Query(query): Query<AvatarQuery>,
) -> Result<Response> {
    let username = query.validate().map_err(AppError::InvalidInput)?;
    let key = format!("avatar:{username}");
    let fetcher = &state.upstreams.avatars;
    let name = username.as_str();

    let resolved = resolve_cached(&state.caches.avatars, &key, move || async move {
        fetcher.fetch_avatar(name).await
    })
    .await;

    let response = match resolved {
        Resolved::Hit { value, .. } => image_response(value, CacheStatus::Hit, None),
        Resolved::Fresh(image) => image_response(image, CacheStatus::Miss, None),
        Resolved::Stale { value, .. } => image_response(value, CacheStatus::Stale, None),
        Resolved::Unavailable(_) => {
            image_response(ImageAsset::svg(fallback_icon(&username)), CacheStatus::Miss, None)
        }
    };
    Ok(response)
}

/// Handler for GET and HEAD /icon
///
/// Serves `project-icon.<ext>` from the repository. A repository without
/// one gets a fallback lettered after the repository name, which is cached
/// like a real icon; a fallback produced because GitHub was unreachable is
/// not.
pub async fn icon_handler(
    State(state): State<AppState>,
    Query(query): Query<IconQuery>,
) -> Result<Response> {
    let repo = query.validate().map_err(AppError::InvalidInput)?;
    let key = format!("project-icon:{repo}");
    let fetcher = &state.upstreams.icons;
    let repo_ref = &repo;

    let resolved = resolve_cached(&state.caches.icons, &key, move || async move {
        let icon = match fetcher.fetch_icon(repo_ref).await? {
            Some(image) => ProjectIcon {
                image,
                is_real: true,
            },
            None => ProjectIcon {
                image: ImageAsset::svg(fallback_icon(&repo_ref.repo)),
                is_real: false,
            },
        };
        Ok::<_, FetchError>(icon)
    })
    .await;

    let (icon, status) = match resolved {
        Resolved::Hit { value, .. } => (value, CacheStatus::Hit),
        Resolved::Fresh(icon) => (icon, CacheStatus::Miss),
        Resolved::Stale { value, .. } => (value, CacheStatus::Stale),
        Resolved::Unavailable(_) => (
            ProjectIcon {
                image: ImageAsset::svg(fallback_icon(&repo.repo)),
                is_real: false,
            },
            CacheStatus::Miss,
        ),
    };
    Ok(image_response(icon.image, status, Some(icon.is_real)))
}
