/// Video handlers - listing, publishing and owner-only mutations
use crate::config::MediaConfig;
use crate::error::{AppError, Result};
use crate::handlers::upload::{read_form, FormField};
use crate::middleware::UserId;
use crate::models::{VideoListFilter, VideoSort};
use crate::pagination::{PageQuery, Pagination};
use crate::response::ApiResponse;
use crate::services::{MediaUploader, VideoDraft, VideoEdit, VideoService};
use crate::validation::{optional_text, parse_id, require_text};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

const PUBLISH_FIELDS: &[FormField] = &[
    FormField::Text("title"),
    FormField::Text("description"),
    FormField::File("videoFile"),
    FormField::File("thumbnail"),
];

const UPDATE_FIELDS: &[FormField] = &[
    FormField::Text("title"),
    FormField::Text("description"),
    FormField::File("thumbnail"),
];

/// Multipart body of a publish request, for the API document.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishVideoForm {
    pub title: String,
    pub description: String,
    #[schema(value_type = String, format = Binary)]
    pub video_file: Vec<u8>,
    #[schema(value_type = String, format = Binary)]
    pub thumbnail: Vec<u8>,
}

/// Multipart body of a video update. Blank or missing fields are kept.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateVideoForm {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub thumbnail: Option<Vec<u8>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<String>,
}

impl VideoListQuery {
    fn filter(&self) -> Result<VideoListFilter> {
        Ok(VideoListFilter {
            query: optional_text(self.query.as_deref()),
            // An unparsable owner id is ignored rather than rejected.
            owner_id: self
                .user_id
                .as_deref()
                .and_then(|id| Uuid::parse_str(id.trim()).ok()),
            sort: VideoSort::parse(self.sort_by.as_deref())?,
            ascending: VideoListFilter::ascending_from(self.sort_type.as_deref()),
        })
    }
}

/// GET /api/v1/videos
#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "videos",
    params(
        ("page" = Option<u32>, Query, description = "1-based page, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 10, max 100"),
        ("query" = Option<String>, Query, description = "Case-insensitive match on title or description"),
        ("sortBy" = Option<String>, Query, description = "createdAt, views, duration or title"),
        ("sortType" = Option<String>, Query, description = "asc, anything else sorts descending"),
        ("userId" = Option<String>, Query, description = "Only videos of this owner")
    ),
    responses(
        (status = 200, description = "Page of published videos"),
        (status = 400, description = "Unknown sortBy"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_videos(
    pool: web::Data<PgPool>,
    query: web::Query<VideoListQuery>,
) -> Result<HttpResponse> {
    let filter = query.filter()?;
    let pagination = Pagination::from_query(&query.page);

    let page = VideoService::new(pool.get_ref().clone())
        .list_videos(&filter, pagination)
        .await?;

    Ok(ApiResponse::ok(page, "Videos fetched successfully"))
}

/// POST /api/v1/videos (multipart: title, description, videoFile, thumbnail)
#[utoipa::path(
    post,
    path = "/api/v1/videos",
    tag = "videos",
    request_body(content = PublishVideoForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Video published"),
        (status = 400, description = "Missing title, description or files"),
        (status = 502, description = "Media upload failed"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn publish_video(
    pool: web::Data<PgPool>,
    uploader: web::Data<dyn MediaUploader>,
    media: web::Data<MediaConfig>,
    user_id: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let mut form = read_form(payload, PUBLISH_FIELDS, media.max_upload_bytes).await?;

    let title = require_text(form.text("title"), "Title and description are required")?;
    let description =
        require_text(form.text("description"), "Title and description are required")?;

    let (video_file, thumbnail) = match (form.take_file("videoFile"), form.take_file("thumbnail")) {
        (Some(video_file), Some(thumbnail)) => (video_file, thumbnail),
        _ => {
            return Err(AppError::BadRequest(
                "Video file and thumbnail are required".to_string(),
            ))
        }
    };

    let video = VideoService::new(pool.get_ref().clone())
        .publish_video(
            uploader.get_ref(),
            user_id.0,
            VideoDraft {
                title,
                description,
                video_file,
                thumbnail,
            },
        )
        .await?;

    Ok(ApiResponse::created(video, "Video published successfully"))
}

/// GET /api/v1/videos/{videoId}
#[utoipa::path(
    get,
    path = "/api/v1/videos/{videoId}",
    tag = "videos",
    params(("videoId" = String, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video with owner and like count"),
        (status = 404, description = "Video not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_video(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;

    let video = VideoService::new(pool.get_ref().clone())
        .get_video(user_id.0, video_id)
        .await?;

    Ok(ApiResponse::ok(video, "Video fetched"))
}

/// PATCH /api/v1/videos/{videoId} (multipart: title, description, thumbnail)
#[utoipa::path(
    patch,
    path = "/api/v1/videos/{videoId}",
    tag = "videos",
    params(("videoId" = String, Path, description = "Video id")),
    request_body(content = UpdateVideoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video updated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Video not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_video(
    pool: web::Data<PgPool>,
    uploader: web::Data<dyn MediaUploader>,
    media: web::Data<MediaConfig>,
    path: web::Path<String>,
    user_id: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;
    let mut form = read_form(payload, UPDATE_FIELDS, media.max_upload_bytes).await?;

    let edit = VideoEdit {
        title: optional_text(form.text("title")),
        description: optional_text(form.text("description")),
        thumbnail: form.take_file("thumbnail"),
    };

    let video = VideoService::new(pool.get_ref().clone())
        .update_video(uploader.get_ref(), user_id.0, video_id, edit)
        .await?;

    Ok(ApiResponse::ok(video, "Video updated successfully"))
}

/// DELETE /api/v1/videos/{videoId}
#[utoipa::path(
    delete,
    path = "/api/v1/videos/{videoId}",
    tag = "videos",
    params(("videoId" = String, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Video not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_video(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;

    VideoService::new(pool.get_ref().clone())
        .delete_video(user_id.0, video_id)
        .await?;

    Ok(ApiResponse::ok(serde_json::json!({}), "Video deleted successfully"))
}

/// PATCH /api/v1/videos/toggle/publish/{videoId}
#[utoipa::path(
    patch,
    path = "/api/v1/videos/toggle/publish/{videoId}",
    tag = "videos",
    params(("videoId" = String, Path, description = "Video id")),
    responses(
        (status = 200, description = "Publish flag flipped"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Video not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn toggle_publish(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let video_id = parse_id(&path, "video")?;

    let video = VideoService::new(pool.get_ref().clone())
        .toggle_publish(user_id.0, video_id)
        .await?;

    let state = if video.is_published {
        "Published"
    } else {
        "Unpublished"
    };
    Ok(ApiResponse::ok(video, format!("Video is now {state}")))
}
