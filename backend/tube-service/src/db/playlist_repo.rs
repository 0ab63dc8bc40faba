use crate::db::owner_profile_json;
use crate::models::playlist::PlaylistRow;
use crate::models::{Playlist, PlaylistView};
use sqlx::PgPool;
use uuid::Uuid;

const PLAYLIST_COLUMNS: &str = "id, name, description, owner_id, videos, created_at, updated_at";

/// Playlist rows with `videos` resolved in stored order. Ids whose video no
/// longer exists drop out of the aggregate.
fn view_select() -> String {
    format!(
        "SELECT p.id, p.name, p.description, p.created_at, p.updated_at, \
                {playlist_owner} AS owner, \
                COALESCE(( \
                    SELECT json_agg(json_build_object( \
                        'id', v.id, 'title', v.title, 'description', v.description, \
                        'thumbnail', v.thumbnail, 'videoFile', v.video_file, \
                        'duration', v.duration, 'views', v.views, \
                        'isPublished', v.is_published, 'createdAt', v.created_at, \
                        'owner', {video_owner}) ORDER BY entry.ord) \
                    FROM unnest(p.videos) WITH ORDINALITY AS entry(video_id, ord) \
                    JOIN videos v ON v.id = entry.video_id \
                ), '[]'::json) AS videos \
         FROM playlists p",
        playlist_owner = owner_profile_json("p.owner_id"),
        video_owner = owner_profile_json("v.owner_id"),
    )
}

pub async fn insert_playlist(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    let sql = format!(
        "INSERT INTO playlists (owner_id, name, description) VALUES ($1, $2, $3) \
         RETURNING {PLAYLIST_COLUMNS}"
    );
    sqlx::query_as::<_, Playlist>(&sql)
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
}

pub async fn list_for_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<PlaylistView>, sqlx::Error> {
    let sql = format!(
        "{} WHERE p.owner_id = $1 ORDER BY p.created_at DESC, p.id ASC",
        view_select()
    );
    let rows = sqlx::query_as::<_, PlaylistRow>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(PlaylistView::from).collect())
}

pub async fn find_view(
    pool: &PgPool,
    playlist_id: Uuid,
) -> Result<Option<PlaylistView>, sqlx::Error> {
    let sql = format!("{} WHERE p.id = $1", view_select());
    let row = sqlx::query_as::<_, PlaylistRow>(&sql)
        .bind(playlist_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(PlaylistView::from))
}

pub async fn update_owned(
    pool: &PgPool,
    playlist_id: Uuid,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Option<Playlist>, sqlx::Error> {
    let sql = format!(
        "UPDATE playlists SET name = $3, description = $4, updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2 RETURNING {PLAYLIST_COLUMNS}"
    );
    sqlx::query_as::<_, Playlist>(&sql)
        .bind(playlist_id)
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .fetch_optional(pool)
        .await
}

pub async fn delete_owned(
    pool: &PgPool,
    playlist_id: Uuid,
    owner_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    let sql = format!(
        "DELETE FROM playlists WHERE id = $1 AND owner_id = $2 RETURNING {PLAYLIST_COLUMNS}"
    );
    sqlx::query_as::<_, Playlist>(&sql)
        .bind(playlist_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
}

/// Append `video_id` unless already present. Set semantics, order kept.
pub async fn add_video_owned(
    pool: &PgPool,
    playlist_id: Uuid,
    owner_id: Uuid,
    video_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    let sql = format!(
        "UPDATE playlists SET \
            videos = CASE WHEN $3 = ANY(videos) THEN videos ELSE array_append(videos, $3) END, \
            updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2 RETURNING {PLAYLIST_COLUMNS}"
    );
    sqlx::query_as::<_, Playlist>(&sql)
        .bind(playlist_id)
        .bind(owner_id)
        .bind(video_id)
        .fetch_optional(pool)
        .await
}

/// Remove every occurrence of `video_id`.
pub async fn remove_video_owned(
    pool: &PgPool,
    playlist_id: Uuid,
    owner_id: Uuid,
    video_id: Uuid,
) -> Result<Option<Playlist>, sqlx::Error> {
    let sql = format!(
        "UPDATE playlists SET videos = array_remove(videos, $3), updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2 RETURNING {PLAYLIST_COLUMNS}"
    );
    sqlx::query_as::<_, Playlist>(&sql)
        .bind(playlist_id)
        .bind(owner_id)
        .bind(video_id)
        .fetch_optional(pool)
        .await
}
