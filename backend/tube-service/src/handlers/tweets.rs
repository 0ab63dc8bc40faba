/// Tweet handlers
use crate::error::Result;
use crate::handlers::ContentRequest;
use crate::middleware::UserId;
use crate::response::ApiResponse;
use crate::services::TweetService;
use crate::validation::{parse_id, require_text};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// POST /api/v1/tweets
#[utoipa::path(
    post,
    path = "/api/v1/tweets",
    tag = "tweets",
    request_body = ContentRequest,
    responses(
        (status = 201, description = "Tweet created"),
        (status = 400, description = "Content is required"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_tweet(
    pool: web::Data<PgPool>,
    user_id: UserId,
    body: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let content = require_text(body.content.as_deref(), "Content is required")?;

    let tweet = TweetService::new(pool.get_ref().clone())
        .create_tweet(user_id.0, &content)
        .await?;

    Ok(ApiResponse::created(tweet, "Tweet created successfully"))
}

/// GET /api/v1/tweets/user/{userId}
#[utoipa::path(
    get,
    path = "/api/v1/tweets/user/{userId}",
    tag = "tweets",
    params(("userId" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Tweets of the user"),
        (status = 404, description = "No tweets"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_tweets(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let owner_id = parse_id(&path, "user")?;

    let tweets = TweetService::new(pool.get_ref().clone())
        .user_tweets(owner_id)
        .await?;

    Ok(ApiResponse::ok(tweets, "User tweets fetched successfully"))
}

/// PATCH /api/v1/tweets/{tweetId}
#[utoipa::path(
    patch,
    path = "/api/v1/tweets/{tweetId}",
    tag = "tweets",
    params(("tweetId" = String, Path, description = "Tweet id")),
    request_body = ContentRequest,
    responses(
        (status = 200, description = "Tweet updated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Tweet not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_tweet(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
    body: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let tweet_id = parse_id(&path, "tweet")?;
    let content = require_text(body.content.as_deref(), "Content is required")?;

    let tweet = TweetService::new(pool.get_ref().clone())
        .update_tweet(user_id.0, tweet_id, &content)
        .await?;

    Ok(ApiResponse::ok(tweet, "Tweet updated successfully"))
}

/// DELETE /api/v1/tweets/{tweetId}
#[utoipa::path(
    delete,
    path = "/api/v1/tweets/{tweetId}",
    tag = "tweets",
    params(("tweetId" = String, Path, description = "Tweet id")),
    responses(
        (status = 200, description = "Tweet deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Tweet not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_tweet(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let tweet_id = parse_id(&path, "tweet")?;

    TweetService::new(pool.get_ref().clone())
        .delete_tweet(user_id.0, tweet_id)
        .await?;

    Ok(ApiResponse::ok(None::<()>, "Tweet deleted successfully"))
}
