/// Video service - publishing, listing and owner-only mutations
use crate::db::video_repo;
use crate::error::{AppError, Result};
use crate::middleware::ensure_owner;
use crate::models::{NewVideo, Video, VideoDetails, VideoListFilter, VideoUpdate};
use crate::pagination::{Page, Pagination};
use crate::services::media::{MediaUploader, UploadFile};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Validated input for a new video.
#[derive(Debug, Clone)]
pub struct VideoDraft {
    pub title: String,
    pub description: String,
    pub video_file: UploadFile,
    pub thumbnail: UploadFile,
}

/// Validated partial update. Unset fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct VideoEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<UploadFile>,
}

impl VideoEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.thumbnail.is_none()
    }
}

pub struct VideoService {
    pool: PgPool,
}

impl VideoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_videos(
        &self,
        filter: &VideoListFilter,
        pagination: Pagination,
    ) -> Result<Page<VideoDetails>> {
        let (docs, total) = video_repo::list_published(&self.pool, filter, pagination).await?;
        Ok(Page::new(docs, total, pagination))
    }

    /// Upload both files, then store the video owned by `owner_id`.
    pub async fn publish_video(
        &self,
        uploader: &dyn MediaUploader,
        owner_id: Uuid,
        draft: VideoDraft,
    ) -> Result<Video> {
        let video_upload = uploader.upload(draft.video_file).await?;
        let thumbnail_upload = uploader.upload(draft.thumbnail).await?;

        let duration = video_upload
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(|d| d.floor().min(i32::MAX as f64) as i32)
            .unwrap_or(0);

        let video = video_repo::insert_video(
            &self.pool,
            &NewVideo {
                owner_id,
                title: draft.title,
                description: draft.description,
                video_file: video_upload.url,
                thumbnail: thumbnail_upload.url,
                duration,
            },
        )
        .await?;

        info!(video_id = %video.id, owner_id = %owner_id, "video published");
        Ok(video)
    }

    /// Unpublished videos are only visible to their owner. Views from anyone
    /// else are counted.
    pub async fn get_video(&self, viewer: Uuid, video_id: Uuid) -> Result<VideoDetails> {
        let mut video = video_repo::find_video_details(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        if video.owner_id == viewer {
            return Ok(video);
        }
        if !video.is_published {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        if let Some(views) = video_repo::increment_views(&self.pool, video_id).await? {
            video.views = views;
        }
        Ok(video)
    }

    pub async fn update_video(
        &self,
        uploader: &dyn MediaUploader,
        user_id: Uuid,
        video_id: Uuid,
        edit: VideoEdit,
    ) -> Result<Video> {
        let video = self.owned_video(user_id, video_id, "Unauthorized to update this video").await?;
        if edit.is_empty() {
            return Ok(video);
        }

        let thumbnail = match edit.thumbnail {
            Some(file) => Some(uploader.upload(file).await?.url),
            None => None,
        };

        let update = VideoUpdate {
            title: edit.title,
            description: edit.description,
            thumbnail,
        };

        video_repo::update_video(&self.pool, video.id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    /// Removes the video only. Comments and likes that reference it stay.
    pub async fn delete_video(&self, user_id: Uuid, video_id: Uuid) -> Result<()> {
        let video = self
            .owned_video(user_id, video_id, "You are not the owner of this video")
            .await?;

        if !video_repo::delete_video(&self.pool, video.id).await? {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        info!(video_id = %video_id, "video deleted");
        Ok(())
    }

    pub async fn toggle_publish(&self, user_id: Uuid, video_id: Uuid) -> Result<Video> {
        let video = self.owned_video(user_id, video_id, "Unauthorized").await?;

        video_repo::toggle_published(&self.pool, video.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    async fn owned_video(&self, user_id: Uuid, video_id: Uuid, denied: &str) -> Result<Video> {
        let video = video_repo::find_video(&self.pool, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        ensure_owner(user_id, video.owner_id, denied)?;
        Ok(video)
    }
}
