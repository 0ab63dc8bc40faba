/// Like service - alternating likes on videos, comments and tweets
use crate::db::{comment_repo, like_repo, tweet_repo, video_repo};
use crate::error::{AppError, Result};
use crate::metrics::record_toggle;
use crate::models::{Like, LikeKind, LikeTarget, LikedVideos, ToggleOutcome};
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Like when absent, unlike when present. The target must exist.
    pub async fn toggle(&self, user_id: Uuid, target: LikeTarget) -> Result<ToggleOutcome<Like>> {
        let exists = match target.kind {
            LikeKind::Video => video_repo::video_exists(&self.pool, target.id).await?,
            LikeKind::Comment => comment_repo::comment_exists(&self.pool, target.id).await?,
            LikeKind::Tweet => tweet_repo::tweet_exists(&self.pool, target.id).await?,
        };
        if !exists {
            return Err(AppError::NotFound(format!("{} not found", target.kind.label())));
        }

        let outcome = like_repo::toggle_like(&self.pool, user_id, target).await?;
        record_toggle(target.kind.as_str(), outcome.metric_label());
        tracing::debug!(
            user_id = %user_id,
            target_kind = target.kind.as_str(),
            target_id = %target.id,
            outcome = outcome.metric_label(),
            "like toggled"
        );
        Ok(outcome)
    }

    pub async fn liked_videos(&self, user_id: Uuid) -> Result<LikedVideos> {
        let videos = like_repo::liked_videos(&self.pool, user_id).await?;
        if videos.is_empty() {
            return Err(AppError::NotFound("No liked videos found".to_string()));
        }

        Ok(LikedVideos {
            liked_by: user_id,
            total_videos: videos.len(),
            videos,
        })
    }
}
