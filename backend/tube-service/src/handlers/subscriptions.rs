/// Subscription handlers - users following channels
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::ToggleOutcome;
use crate::response::ApiResponse;
use crate::services::SubscriptionService;
use crate::validation::parse_id;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// POST /api/v1/subscriptions/c/{channelId}
#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/c/{channelId}",
    tag = "subscriptions",
    params(
        ("channelId" = String, Path, description = "Channel (user) id")
    ),
    responses(
        (status = 201, description = "Subscribed"),
        (status = 200, description = "Unsubscribed"),
        (status = 404, description = "Channel not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_subscription(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let channel_id = parse_id(&path, "channel")?;

    let outcome = SubscriptionService::new(pool.get_ref().clone())
        .toggle(user_id.0, channel_id)
        .await?;

    Ok(match outcome {
        ToggleOutcome::Created(subscription) => {
            ApiResponse::created(subscription, "Subscribed successfully")
        }
        ToggleOutcome::Removed => ApiResponse::ok(None::<()>, "Unsubscribed successfully"),
    })
}

/// GET /api/v1/subscriptions/c/{channelId}
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/c/{channelId}",
    tag = "subscriptions",
    params(
        ("channelId" = String, Path, description = "Channel (user) id")
    ),
    responses(
        (status = 200, description = "Subscribers of the channel"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_channel_subscribers(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let channel_id = parse_id(&path, "channel")?;

    let subscribers = SubscriptionService::new(pool.get_ref().clone())
        .channel_subscribers(channel_id)
        .await?;

    Ok(ApiResponse::ok(subscribers, "Subscribers fetched successfully"))
}

/// GET /api/v1/subscriptions/u/{subscriberId}
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/u/{subscriberId}",
    tag = "subscriptions",
    params(
        ("subscriberId" = String, Path, description = "Subscriber (user) id")
    ),
    responses(
        (status = 200, description = "Channels the user follows"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_subscribed_channels(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let subscriber_id = parse_id(&path, "subscriber")?;

    let channels = SubscriptionService::new(pool.get_ref().clone())
        .subscribed_channels(subscriber_id)
        .await?;

    Ok(ApiResponse::ok(channels, "Subscribed channels fetched successfully"))
}
