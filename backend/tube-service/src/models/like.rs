use crate::models::VideoDetails;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// What a like points at. Stored as the `like_target_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type, utoipa::ToSchema)]
#[sqlx(type_name = "like_target_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LikeKind {
    Video,
    Comment,
    Tweet,
}

impl LikeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeKind::Video => "video",
            LikeKind::Comment => "comment",
            LikeKind::Tweet => "tweet",
        }
    }

    /// Capitalised name for response messages.
    pub fn label(&self) -> &'static str {
        match self {
            LikeKind::Video => "Video",
            LikeKind::Comment => "Comment",
            LikeKind::Tweet => "Tweet",
        }
    }
}

/// Exactly one liked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeTarget {
    pub kind: LikeKind,
    pub id: Uuid,
}

impl LikeTarget {
    pub fn video(id: Uuid) -> Self {
        Self {
            kind: LikeKind::Video,
            id,
        }
    }

    pub fn comment(id: Uuid) -> Self {
        Self {
            kind: LikeKind::Comment,
            id,
        }
    }

    pub fn tweet(id: Uuid) -> Self {
        Self {
            kind: LikeKind::Tweet,
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub liked_by: Uuid,
    pub target_kind: LikeKind,
    pub target_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of flipping a like or subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome<T> {
    Created(T),
    Removed,
}

impl<T> ToggleOutcome<T> {
    pub fn metric_label(&self) -> &'static str {
        match self {
            ToggleOutcome::Created(_) => "created",
            ToggleOutcome::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideo {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub video: VideoDetails,
    pub liked_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideos {
    pub liked_by: Uuid,
    pub total_videos: usize,
    pub videos: Vec<LikedVideo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_carry_their_kind() {
        let id = Uuid::new_v4();
        assert_eq!(LikeTarget::video(id).kind, LikeKind::Video);
        assert_eq!(LikeTarget::comment(id).kind.as_str(), "comment");
        assert_eq!(LikeTarget::tweet(id).kind.label(), "Tweet");
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_value(LikeKind::Tweet).unwrap(), "tweet");
    }
}
