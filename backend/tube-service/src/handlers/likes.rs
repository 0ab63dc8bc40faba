/// Like handlers - toggles on videos, comments and tweets
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::{LikeKind, LikeTarget, ToggleOutcome};
use crate::response::ApiResponse;
use crate::services::LikeService;
use crate::validation::parse_id;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

async fn toggle(pool: &PgPool, user_id: UserId, kind: LikeKind, raw_id: &str) -> Result<HttpResponse> {
    let id = parse_id(raw_id, kind.as_str())?;
    let target = LikeTarget { kind, id };

    let outcome = LikeService::new(pool.clone()).toggle(user_id.0, target).await?;

    Ok(match outcome {
        ToggleOutcome::Created(like) => {
            ApiResponse::created(like, format!("{} liked successfully", kind.label()))
        }
        ToggleOutcome::Removed => {
            ApiResponse::ok(None::<()>, format!("{} unliked successfully", kind.label()))
        }
    })
}

/// POST /api/v1/likes/toggle/v/{videoId}
#[utoipa::path(
    post,
    path = "/api/v1/likes/toggle/v/{videoId}",
    tag = "likes",
    params(("videoId" = String, Path, description = "Video id")),
    responses(
        (status = 201, description = "Video liked"),
        (status = 200, description = "Video unliked"),
        (status = 404, description = "Video not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_video_like(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    toggle(&pool, user_id, LikeKind::Video, &path).await
}

/// POST /api/v1/likes/toggle/c/{commentId}
#[utoipa::path(
    post,
    path = "/api/v1/likes/toggle/c/{commentId}",
    tag = "likes",
    params(("commentId" = String, Path, description = "Comment id")),
    responses(
        (status = 201, description = "Comment liked"),
        (status = 200, description = "Comment unliked"),
        (status = 404, description = "Comment not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_comment_like(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    toggle(&pool, user_id, LikeKind::Comment, &path).await
}

/// POST /api/v1/likes/toggle/t/{tweetId}
#[utoipa::path(
    post,
    path = "/api/v1/likes/toggle/t/{tweetId}",
    tag = "likes",
    params(("tweetId" = String, Path, description = "Tweet id")),
    responses(
        (status = 201, description = "Tweet liked"),
        (status = 200, description = "Tweet unliked"),
        (status = 404, description = "Tweet not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_tweet_like(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    toggle(&pool, user_id, LikeKind::Tweet, &path).await
}

/// GET /api/v1/likes/videos
#[utoipa::path(
    get,
    path = "/api/v1/likes/videos",
    tag = "likes",
    responses(
        (status = 200, description = "Videos liked by the caller"),
        (status = 404, description = "No liked videos"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_liked_videos(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let liked = LikeService::new(pool.get_ref().clone())
        .liked_videos(user_id.0)
        .await?;

    Ok(ApiResponse::ok(liked, "Liked videos retrieved successfully"))
}
