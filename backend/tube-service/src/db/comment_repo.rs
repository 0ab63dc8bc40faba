use crate::db::{likes_count, owner_profile_json};
use crate::models::{Comment, CommentView};
use crate::pagination::Pagination;
use sqlx::PgPool;
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, content, video_id, owner_id, created_at, updated_at";

pub async fn insert_comment(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let sql = format!(
        "INSERT INTO comments (video_id, owner_id, content) VALUES ($1, $2, $3) \
         RETURNING {COMMENT_COLUMNS}"
    );
    sqlx::query_as::<_, Comment>(&sql)
        .bind(video_id)
        .bind(owner_id)
        .bind(content)
        .fetch_one(pool)
        .await
}

/// Newest-first page of a video's comments as seen by `viewer`.
pub async fn list_for_video(
    pool: &PgPool,
    video_id: Uuid,
    viewer: Uuid,
    pagination: Pagination,
) -> Result<(Vec<CommentView>, i64), sqlx::Error> {
    let total = count_for_video(pool, video_id).await?;

    let sql = format!(
        "SELECT c.id, c.content, c.created_at, c.updated_at, \
                {owner} AS owner, \
                {likes} AS likes_count, \
                EXISTS(SELECT 1 FROM likes me \
                       WHERE me.target_kind = 'comment' AND me.target_id = c.id \
                         AND me.liked_by = $2) AS is_liked_by_me \
         FROM comments c \
         WHERE c.video_id = $1 \
         ORDER BY c.created_at DESC, c.id ASC \
         LIMIT $3 OFFSET $4",
        owner = owner_profile_json("c.owner_id"),
        likes = likes_count("comment", "c.id"),
    );
    let comments = sqlx::query_as::<_, CommentView>(&sql)
        .bind(video_id)
        .bind(viewer)
        .bind(pagination.limit)
        .bind(pagination.offset())
        .fetch_all(pool)
        .await?;

    Ok((comments, total))
}

/// Update only when `owner_id` owns the comment.
pub async fn update_owned(
    pool: &PgPool,
    comment_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    let sql = format!(
        "UPDATE comments SET content = $3, updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2 RETURNING {COMMENT_COLUMNS}"
    );
    sqlx::query_as::<_, Comment>(&sql)
        .bind(comment_id)
        .bind(owner_id)
        .bind(content)
        .fetch_optional(pool)
        .await
}

/// Delete only when `owner_id` owns the comment. Returns the removed row.
pub async fn delete_owned(
    pool: &PgPool,
    comment_id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let sql = format!(
        "DELETE FROM comments WHERE id = $1 AND owner_id = $2 RETURNING {COMMENT_COLUMNS}"
    );
    sqlx::query_as::<_, Comment>(&sql)
        .bind(comment_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

pub async fn comment_exists(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)")
        .bind(comment_id)
        .fetch_one(pool)
        .await
}

pub async fn count_for_video(pool: &PgPool, video_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE video_id = $1")
        .bind(video_id)
        .fetch_one(pool)
        .await
}
