use crate::db::{likes_count, owner_profile_json};
use crate::models::{Like, LikeKind, LikeTarget, LikedVideo, ToggleOutcome};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const LIKE_COLUMNS: &str = "id, liked_by, target_kind, target_id, created_at, updated_at";

#[derive(FromRow)]
struct ToggleRow {
    removed: bool,
    id: Option<Uuid>,
    liked_by: Option<Uuid>,
    target_kind: Option<LikeKind>,
    target_id: Option<Uuid>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ToggleRow {
    fn into_like(self) -> Option<Like> {
        Some(Like {
            id: self.id?,
            liked_by: self.liked_by?,
            target_kind: self.target_kind?,
            target_id: self.target_id?,
            created_at: self.created_at?,
            updated_at: self.updated_at?,
        })
    }
}

/// Flip the caller's like on `target` in a single statement.
///
/// The delete and the conditional insert share one snapshot, and the unique
/// constraint on (liked_by, target_kind, target_id) turns a racing duplicate
/// insert into a no-op. In that case the like is settled with `ensure_like`,
/// which returns the surviving row even if the racing request has already
/// removed it again.
pub async fn toggle_like(
    pool: &PgPool,
    user_id: Uuid,
    target: LikeTarget,
) -> Result<ToggleOutcome<Like>, sqlx::Error> {
    let row = sqlx::query_as::<_, ToggleRow>(
        r#"
        WITH removed AS (
            DELETE FROM likes
            WHERE liked_by = $1 AND target_kind = $2 AND target_id = $3
            RETURNING id
        ),
        inserted AS (
            INSERT INTO likes (liked_by, target_kind, target_id)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM removed)
            ON CONFLICT (liked_by, target_kind, target_id) DO NOTHING
            RETURNING id, liked_by, target_kind, target_id, created_at, updated_at
        )
        SELECT EXISTS (SELECT 1 FROM removed) AS removed,
               i.id, i.liked_by, i.target_kind, i.target_id, i.created_at, i.updated_at
        FROM (SELECT 1) AS one
        LEFT JOIN inserted i ON TRUE
        "#,
    )
    .bind(user_id)
    .bind(target.kind)
    .bind(target.id)
    .fetch_one(pool)
    .await?;

    if row.removed {
        return Ok(ToggleOutcome::Removed);
    }

    match row.into_like() {
        Some(like) => Ok(ToggleOutcome::Created(like)),
        None => ensure_like(pool, user_id, target).await.map(ToggleOutcome::Created),
    }
}

/// Insert the like or lock the existing one. Always yields a row.
async fn ensure_like(
    pool: &PgPool,
    user_id: Uuid,
    target: LikeTarget,
) -> Result<Like, sqlx::Error> {
    let sql = format!(
        "INSERT INTO likes (liked_by, target_kind, target_id) VALUES ($1, $2, $3) \
         ON CONFLICT (liked_by, target_kind, target_id) \
         DO UPDATE SET updated_at = likes.updated_at \
         RETURNING {LIKE_COLUMNS}"
    );
    sqlx::query_as::<_, Like>(&sql)
        .bind(user_id)
        .bind(target.kind)
        .bind(target.id)
        .fetch_one(pool)
        .await
}

/// Videos the user liked, newest like first. Likes whose video is gone are
/// skipped.
pub async fn liked_videos(pool: &PgPool, user_id: Uuid) -> Result<Vec<LikedVideo>, sqlx::Error> {
    let sql = format!(
        "SELECT v.id, v.video_file, v.thumbnail, v.owner_id, v.title, v.description, \
                v.duration, v.views, v.is_published, v.created_at, v.updated_at, \
                {owner} AS owner, {likes} AS likes_count, \
                l.created_at AS liked_at \
         FROM likes l \
         JOIN videos v ON v.id = l.target_id \
         WHERE l.liked_by = $1 AND l.target_kind = 'video' \
         ORDER BY l.created_at DESC",
        owner = owner_profile_json("v.owner_id"),
        likes = likes_count("video", "v.id"),
    );
    sqlx::query_as::<_, LikedVideo>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}
