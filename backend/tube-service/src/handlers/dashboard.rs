/// Dashboard handlers - the caller's own channel
use crate::error::Result;
use crate::middleware::UserId;
use crate::response::ApiResponse;
use crate::services::DashboardService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// GET /api/v1/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Views, videos, subscribers and likes of the caller's channel"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_channel_stats(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let stats = DashboardService::new(pool.get_ref().clone())
        .channel_stats(user_id.0)
        .await?;

    Ok(ApiResponse::ok(stats, "Channel stats fetched successfully"))
}

/// GET /api/v1/dashboard/videos
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/videos",
    tag = "dashboard",
    responses(
        (status = 200, description = "All videos of the caller's channel"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_channel_videos(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let videos = DashboardService::new(pool.get_ref().clone())
        .channel_videos(user_id.0)
        .await?;

    Ok(ApiResponse::ok(videos, "Channel videos fetched successfully"))
}
