use crate::db::{likes_count, owner_profile_json};
use crate::models::{Tweet, TweetView};
use sqlx::PgPool;
use uuid::Uuid;

const TWEET_COLUMNS: &str = "id, content, owner_id, created_at, updated_at";

pub async fn insert_tweet(
    pool: &PgPool,
    owner_id: Uuid,
    content: &str,
) -> Result<Tweet, sqlx::Error> {
    let sql = format!(
        "INSERT INTO tweets (owner_id, content) VALUES ($1, $2) RETURNING {TWEET_COLUMNS}"
    );
    sqlx::query_as::<_, Tweet>(&sql)
        .bind(owner_id)
        .bind(content)
        .fetch_one(pool)
        .await
}

pub async fn find_tweet(pool: &PgPool, tweet_id: Uuid) -> Result<Option<Tweet>, sqlx::Error> {
    let sql = format!("SELECT {TWEET_COLUMNS} FROM tweets WHERE id = $1");
    sqlx::query_as::<_, Tweet>(&sql)
        .bind(tweet_id)
        .fetch_optional(pool)
        .await
}

pub async fn tweet_exists(pool: &PgPool, tweet_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tweets WHERE id = $1)")
        .bind(tweet_id)
        .fetch_one(pool)
        .await
}

/// Newest first, each with owner profile and like count.
pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<TweetView>, sqlx::Error> {
    let sql = format!(
        "SELECT t.id, t.content, t.created_at, t.updated_at, \
                {owner} AS owner, {likes} AS likes_count \
         FROM tweets t \
         WHERE t.owner_id = $1 \
         ORDER BY t.created_at DESC, t.id ASC",
        owner = owner_profile_json("t.owner_id"),
        likes = likes_count("tweet", "t.id"),
    );
    sqlx::query_as::<_, TweetView>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await
}

pub async fn update_content(
    pool: &PgPool,
    tweet_id: Uuid,
    content: &str,
) -> Result<Option<Tweet>, sqlx::Error> {
    let sql = format!(
        "UPDATE tweets SET content = $2, updated_at = NOW() WHERE id = $1 \
         RETURNING {TWEET_COLUMNS}"
    );
    sqlx::query_as::<_, Tweet>(&sql)
        .bind(tweet_id)
        .bind(content)
        .fetch_optional(pool)
        .await
}

pub async fn delete_tweet(pool: &PgPool, tweet_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(tweet_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
