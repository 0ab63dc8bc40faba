use crate::models::OwnerProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    /// Ordered, duplicate-free
    pub videos: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Playlist entry resolved to the video it names. Decoded from `json_agg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub video_file: String,
    pub duration: i32,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub owner: Option<OwnerProfile>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PlaylistRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: Option<Json<OwnerProfile>>,
    pub videos: Json<Vec<PlaylistVideo>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: Option<OwnerProfile>,
    pub videos: Vec<PlaylistVideo>,
    pub total_videos: usize,
    pub total_views: i64,
}

impl From<PlaylistRow> for PlaylistView {
    fn from(row: PlaylistRow) -> Self {
        let videos = row.videos.0;
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner: row.owner.map(|o| o.0),
            total_videos: videos.len(),
            total_views: videos.iter().map(|v| v.views).sum(),
            videos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(views: i64) -> PlaylistVideo {
        PlaylistVideo {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: "d".into(),
            thumbnail: "thumb".into(),
            video_file: "file".into(),
            duration: 12,
            views,
            is_published: true,
            created_at: Utc::now(),
            owner: None,
        }
    }

    #[test]
    fn totals_are_computed_from_resolved_videos() {
        let row = PlaylistRow {
            id: Uuid::new_v4(),
            name: "mix".into(),
            description: "songs".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            owner: None,
            videos: Json(vec![entry(3), entry(4)]),
        };

        let view = PlaylistView::from(row);
        assert_eq!(view.total_videos, 2);
        assert_eq!(view.total_views, 7);
    }

    #[test]
    fn decodes_aggregated_json() {
        let raw = serde_json::json!([{
            "id": Uuid::nil(),
            "title": "a",
            "description": "b",
            "thumbnail": "c",
            "videoFile": "d",
            "duration": 5,
            "views": 9,
            "isPublished": false,
            "createdAt": "2024-03-01T10:00:00.123456+00:00",
            "owner": null
        }]);
        let videos: Vec<PlaylistVideo> = serde_json::from_value(raw).unwrap();
        assert_eq!(videos[0].views, 9);
        assert!(videos[0].owner.is_none());
    }
}
