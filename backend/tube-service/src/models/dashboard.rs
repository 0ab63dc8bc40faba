use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_views: i64,
    pub total_videos: i64,
    pub total_subscribers: i64,
    /// Likes received on the channel's videos
    pub total_likes: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVideo {
    pub id: Uuid,
    pub title: String,
    pub thumbnail: String,
    pub views: i64,
    pub duration: i32,
    pub created_at: DateTime<Utc>,
}
