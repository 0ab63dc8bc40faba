use crate::models::{ChannelStats, ChannelVideo};
use sqlx::PgPool;
use uuid::Uuid;

/// Aggregates over every video the channel owns, published or not.
pub async fn channel_stats(pool: &PgPool, owner_id: Uuid) -> Result<ChannelStats, sqlx::Error> {
    sqlx::query_as::<_, ChannelStats>(
        r#"
        SELECT
            COALESCE((SELECT SUM(views) FROM videos WHERE owner_id = $1), 0)::BIGINT
                AS total_views,
            (SELECT COUNT(*) FROM videos WHERE owner_id = $1) AS total_videos,
            (SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1) AS total_subscribers,
            (SELECT COUNT(*) FROM likes l
               JOIN videos v ON v.id = l.target_id
              WHERE l.target_kind = 'video' AND v.owner_id = $1) AS total_likes
        "#,
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

/// The channel's published videos, newest first.
pub async fn channel_videos(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<ChannelVideo>, sqlx::Error> {
    sqlx::query_as::<_, ChannelVideo>(
        r#"
        SELECT id, title, thumbnail, views, duration, created_at
        FROM videos
        WHERE owner_id = $1 AND is_published = TRUE
        ORDER BY created_at DESC, id ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}
