use crate::db::{likes_count, owner_profile_json};
use crate::models::video::like_pattern;
use crate::models::{NewVideo, Video, VideoDetails, VideoListFilter, VideoUpdate};
use crate::pagination::Pagination;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const VIDEO_COLUMNS: &str = "id, video_file, thumbnail, owner_id, title, description, \
                             duration, views, is_published, created_at, updated_at";

fn details_select() -> String {
    format!(
        "SELECT v.id, v.video_file, v.thumbnail, v.owner_id, v.title, v.description, \
         v.duration, v.views, v.is_published, v.created_at, v.updated_at, \
         {owner} AS owner, {likes} AS likes_count \
         FROM videos v",
        owner = owner_profile_json("v.owner_id"),
        likes = likes_count("video", "v.id"),
    )
}

fn push_list_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &VideoListFilter) {
    builder.push(" WHERE v.is_published = TRUE");
    if let Some(query) = &filter.query {
        builder
            .push(" AND v.title ILIKE ")
            .push_bind(like_pattern(query));
    }
    if let Some(owner_id) = filter.owner_id {
        builder.push(" AND v.owner_id = ").push_bind(owner_id);
    }
}

/// One page of published videos plus the total matching count.
pub async fn list_published(
    pool: &PgPool,
    filter: &VideoListFilter,
    pagination: Pagination,
) -> Result<(Vec<VideoDetails>, i64), sqlx::Error> {
    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM videos v");
    push_list_filters(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Postgres>::new(details_select());
    push_list_filters(&mut select, filter);
    // Sort column comes from a closed enum, never from request text.
    select
        .push(" ORDER BY ")
        .push(filter.sort.column())
        .push(if filter.ascending { " ASC" } else { " DESC" })
        .push(", v.id ASC LIMIT ")
        .push_bind(pagination.limit)
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    let docs = select
        .build_query_as::<VideoDetails>()
        .fetch_all(pool)
        .await?;

    Ok((docs, total))
}

pub async fn insert_video(pool: &PgPool, video: &NewVideo) -> Result<Video, sqlx::Error> {
    let sql = format!(
        "INSERT INTO videos (owner_id, title, description, video_file, thumbnail, duration) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {VIDEO_COLUMNS}"
    );
    sqlx::query_as::<_, Video>(&sql)
        .bind(video.owner_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_file)
        .bind(&video.thumbnail)
        .bind(video.duration)
        .fetch_one(pool)
        .await
}

pub async fn find_video(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
    sqlx::query_as::<_, Video>(&sql)
        .bind(video_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_video_details(
    pool: &PgPool,
    video_id: Uuid,
) -> Result<Option<VideoDetails>, sqlx::Error> {
    let sql = format!("{} WHERE v.id = $1", details_select());
    sqlx::query_as::<_, VideoDetails>(&sql)
        .bind(video_id)
        .fetch_optional(pool)
        .await
}

pub async fn video_exists(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
        .bind(video_id)
        .fetch_one(pool)
        .await
}

/// Atomically bump the view counter and return the new value.
pub async fn increment_views(pool: &PgPool, video_id: Uuid) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING views",
    )
    .bind(video_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_video(
    pool: &PgPool,
    video_id: Uuid,
    update: &VideoUpdate,
) -> Result<Option<Video>, sqlx::Error> {
    let sql = format!(
        "UPDATE videos SET \
            title = COALESCE($2, title), \
            description = COALESCE($3, description), \
            thumbnail = COALESCE($4, thumbnail), \
            updated_at = NOW() \
         WHERE id = $1 RETURNING {VIDEO_COLUMNS}"
    );
    sqlx::query_as::<_, Video>(&sql)
        .bind(video_id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.thumbnail.as_deref())
        .fetch_optional(pool)
        .await
}

/// Flip `is_published` in place.
pub async fn toggle_published(
    pool: &PgPool,
    video_id: Uuid,
) -> Result<Option<Video>, sqlx::Error> {
    let sql = format!(
        "UPDATE videos SET is_published = NOT is_published, updated_at = NOW() \
         WHERE id = $1 RETURNING {VIDEO_COLUMNS}"
    );
    sqlx::query_as::<_, Video>(&sql)
        .bind(video_id)
        .fetch_optional(pool)
        .await
}

/// Deletes the row only; comments, likes and playlist entries stay.
pub async fn delete_video(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
