use crate::db::owner_profile_json;
use crate::models::{ChannelEntry, SubscriberEntry, Subscription, ToggleOutcome};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const SUBSCRIPTION_COLUMNS: &str = "id, subscriber_id, channel_id, created_at, updated_at";

#[derive(FromRow)]
struct ToggleRow {
    removed: bool,
    id: Option<Uuid>,
    subscriber_id: Option<Uuid>,
    channel_id: Option<Uuid>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

/// Subscribe or unsubscribe in one statement; see `like_repo::toggle_like`.
pub async fn toggle_subscription(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<ToggleOutcome<Subscription>, sqlx::Error> {
    let row = sqlx::query_as::<_, ToggleRow>(
        r#"
        WITH removed AS (
            DELETE FROM subscriptions
            WHERE subscriber_id = $1 AND channel_id = $2
            RETURNING id
        ),
        inserted AS (
            INSERT INTO subscriptions (subscriber_id, channel_id)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM removed)
            ON CONFLICT (subscriber_id, channel_id) DO NOTHING
            RETURNING id, subscriber_id, channel_id, created_at, updated_at
        )
        SELECT EXISTS (SELECT 1 FROM removed) AS removed,
               i.id, i.subscriber_id, i.channel_id, i.created_at, i.updated_at
        FROM (SELECT 1) AS one
        LEFT JOIN inserted i ON TRUE
        "#,
    )
    .bind(subscriber_id)
    .bind(channel_id)
    .fetch_one(pool)
    .await?;

    if row.removed {
        return Ok(ToggleOutcome::Removed);
    }

    let created = match (row.id, row.subscriber_id, row.channel_id, row.created_at, row.updated_at) {
        (Some(id), Some(subscriber_id), Some(channel_id), Some(created_at), Some(updated_at)) => {
            Subscription {
                id,
                subscriber_id,
                channel_id,
                created_at,
                updated_at,
            }
        }
        _ => ensure_subscription(pool, subscriber_id, channel_id).await?,
    };

    Ok(ToggleOutcome::Created(created))
}

/// Insert the subscription or lock the existing one. Always yields a row.
async fn ensure_subscription(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<Subscription, sqlx::Error> {
    let sql = format!(
        "INSERT INTO subscriptions (subscriber_id, channel_id) VALUES ($1, $2) \
         ON CONFLICT (subscriber_id, channel_id) \
         DO UPDATE SET updated_at = subscriptions.updated_at \
         RETURNING {SUBSCRIPTION_COLUMNS}"
    );
    sqlx::query_as::<_, Subscription>(&sql)
        .bind(subscriber_id)
        .bind(channel_id)
        .fetch_one(pool)
        .await
}

/// Everyone subscribed to `channel_id`, newest first.
pub async fn subscribers_of(
    pool: &PgPool,
    channel_id: Uuid,
) -> Result<Vec<SubscriberEntry>, sqlx::Error> {
    let sql = format!(
        "SELECT {subscriber} AS subscriber, s.created_at AS subscribed_at \
         FROM subscriptions s \
         WHERE s.channel_id = $1 \
         ORDER BY s.created_at DESC",
        subscriber = owner_profile_json("s.subscriber_id"),
    );
    sqlx::query_as::<_, SubscriberEntry>(&sql)
        .bind(channel_id)
        .fetch_all(pool)
        .await
}

/// Channels `subscriber_id` follows, each with its own subscriber count.
pub async fn channels_of(
    pool: &PgPool,
    subscriber_id: Uuid,
) -> Result<Vec<ChannelEntry>, sqlx::Error> {
    let sql = format!(
        "SELECT {channel} AS channel, \
                (SELECT COUNT(*) FROM subscriptions c WHERE c.channel_id = s.channel_id) \
                    AS subscribers_count, \
                s.created_at AS subscribed_at \
         FROM subscriptions s \
         WHERE s.subscriber_id = $1 \
         ORDER BY s.created_at DESC",
        channel = owner_profile_json("s.channel_id"),
    );
    sqlx::query_as::<_, ChannelEntry>(&sql)
        .bind(subscriber_id)
        .fetch_all(pool)
        .await
}
