/// Comment handlers - comments attached to videos
use crate::error::Result;
use crate::handlers::ContentRequest;
use crate::middleware::UserId;
use crate::pagination::{PageQuery, Pagination};
use crate::response::ApiResponse;
use crate::services::CommentService;
use crate::validation::{parse_id, require_text};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// GET /api/v1/comments/{videoId}
#[utoipa::path(
    get,
    path = "/api/v1/comments/{videoId}",
    tag = "comments",
    params(
        ("videoId" = String, Path, description = "Video id"),
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, max 100")
    ),
    responses(
        (status = 200, description = "Page of comments"),
        (status = 400, description = "Invalid video ID"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_video_comments(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;

    let page = CommentService::new(pool.get_ref().clone())
        .get_video_comments(video_id, user_id.0, Pagination::from_query(&query))
        .await?;

    Ok(ApiResponse::ok(page, "Comments retrieved successfully"))
}

/// POST /api/v1/comments/{videoId}
#[utoipa::path(
    post,
    path = "/api/v1/comments/{videoId}",
    tag = "comments",
    params(("videoId" = String, Path, description = "Video id")),
    request_body = ContentRequest,
    responses(
        (status = 201, description = "Comment added"),
        (status = 400, description = "Invalid video ID or blank content"),
        (status = 404, description = "Video not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_comment(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
    body: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;
    let content = require_text(body.content.as_deref(), "Comment content cannot be empty")?;

    let comment = CommentService::new(pool.get_ref().clone())
        .add_comment(video_id, user_id.0, &content)
        .await?;

    Ok(ApiResponse::created(comment, "Comment added successfully"))
}

/// PATCH /api/v1/comments/c/{commentId}
#[utoipa::path(
    patch,
    path = "/api/v1/comments/c/{commentId}",
    tag = "comments",
    params(("commentId" = String, Path, description = "Comment id")),
    request_body = ContentRequest,
    responses(
        (status = 200, description = "Comment updated"),
        (status = 400, description = "Invalid comment ID or blank content"),
        (status = 404, description = "Comment not found or not owned by the caller"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
    body: web::Json<ContentRequest>,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&path, "comment")?;
    let content = require_text(body.content.as_deref(), "Comment content cannot be empty")?;

    let comment = CommentService::new(pool.get_ref().clone())
        .update_comment(comment_id, user_id.0, &content)
        .await?;

    Ok(ApiResponse::ok(comment, "Comment updated successfully"))
}

/// DELETE /api/v1/comments/c/{commentId}
#[utoipa::path(
    delete,
    path = "/api/v1/comments/c/{commentId}",
    tag = "comments",
    params(("commentId" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found or not owned by the caller"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&path, "comment")?;

    let comment = CommentService::new(pool.get_ref().clone())
        .delete_comment(comment_id, user_id.0)
        .await?;

    Ok(ApiResponse::ok(comment, "Comment deleted successfully"))
}
