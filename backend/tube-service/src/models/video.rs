use crate::error::{AppError, Result};
use crate::models::OwnerProfile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    /// Whole seconds
    pub duration: i32,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Video with its owner's profile and like count.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: String,
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `None` when the owner row no longer exists
    pub owner: Option<Json<OwnerProfile>>,
    pub likes_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    pub duration: i32,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl VideoUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.thumbnail.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSort {
    #[default]
    CreatedAt,
    Views,
    Duration,
    Title,
}

impl VideoSort {
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None | Some("createdAt") => Ok(VideoSort::CreatedAt),
            Some("views") => Ok(VideoSort::Views),
            Some("duration") => Ok(VideoSort::Duration),
            Some("title") => Ok(VideoSort::Title),
            Some(other) => Err(AppError::BadRequest(format!(
                "Invalid sortBy field: {other}. Allowed: createdAt, views, duration, title"
            ))),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            VideoSort::CreatedAt => "v.created_at",
            VideoSort::Views => "v.views",
            VideoSort::Duration => "v.duration",
            VideoSort::Title => "v.title",
        }
    }
}

/// Filters for the public video listing.
#[derive(Debug, Clone, Default)]
pub struct VideoListFilter {
    /// Case-insensitive substring of the title
    pub query: Option<String>,
    pub owner_id: Option<Uuid>,
    pub sort: VideoSort,
    pub ascending: bool,
}

impl VideoListFilter {
    /// `asc` sorts ascending; anything else is descending.
    pub fn ascending_from(raw: Option<&str>) -> bool {
        raw.map(|s| s.trim().eq_ignore_ascii_case("asc"))
            .unwrap_or(false)
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside ILIKE.
pub fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
