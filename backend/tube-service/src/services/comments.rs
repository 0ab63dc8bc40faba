/// Comment service - comments on videos
use crate::db::{comment_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentPage};
use crate::pagination::Pagination;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Comments stay listable after their video is deleted.
    pub async fn get_video_comments(
        &self,
        video_id: Uuid,
        viewer: Uuid,
        pagination: Pagination,
    ) -> Result<CommentPage> {
        let (comments, total) =
            comment_repo::list_for_video(&self.pool, video_id, viewer, pagination).await?;

        Ok(CommentPage {
            comments,
            total_comments: total,
            current_page: pagination.page,
            total_pages: pagination.total_pages(total),
        })
    }

    pub async fn add_comment(&self, video_id: Uuid, user_id: Uuid, content: &str) -> Result<Comment> {
        if !video_repo::video_exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        let comment = comment_repo::insert_comment(&self.pool, video_id, user_id, content).await?;
        tracing::debug!(comment_id = %comment.id, video_id = %video_id, "comment added");
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        comment_repo::update_owned(&self.pool, comment_id, user_id, content)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "Comment not found or you're not allowed to edit this comment".to_string(),
                )
            })
    }

    pub async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> Result<Comment> {
        comment_repo::delete_owned(&self.pool, comment_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "Comment not found or you're not allowed to delete this comment".to_string(),
                )
            })
    }
}
