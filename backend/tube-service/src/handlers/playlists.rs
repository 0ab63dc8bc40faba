/// Playlist handlers
use crate::error::Result;
use crate::middleware::UserId;
use crate::response::ApiResponse;
use crate::services::PlaylistService;
use crate::validation::{parse_id, require_text};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct PlaylistRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PlaylistRequest {
    fn fields(&self) -> Result<(String, String)> {
        const MISSING: &str = "Name and description are required";
        Ok((
            require_text(self.name.as_deref(), MISSING)?,
            require_text(self.description.as_deref(), MISSING)?,
        ))
    }
}

/// POST /api/v1/playlist
#[utoipa::path(
    post,
    path = "/api/v1/playlist",
    tag = "playlists",
    request_body = PlaylistRequest,
    responses(
        (status = 201, description = "Playlist created"),
        (status = 400, description = "Name and description are required"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_playlist(
    pool: web::Data<PgPool>,
    user_id: UserId,
    body: web::Json<PlaylistRequest>,
) -> Result<HttpResponse> {
    let (name, description) = body.fields()?;

    let playlist = PlaylistService::new(pool.get_ref().clone())
        .create_playlist(user_id.0, &name, &description)
        .await?;

    Ok(ApiResponse::created(playlist, "Playlist created successfully"))
}

/// GET /api/v1/playlist/user/{userId}
#[utoipa::path(
    get,
    path = "/api/v1/playlist/user/{userId}",
    tag = "playlists",
    params(("userId" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Playlists of the user"),
        (status = 404, description = "No playlists"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_playlists(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let owner_id = parse_id(&path, "user")?;

    let playlists = PlaylistService::new(pool.get_ref().clone())
        .user_playlists(owner_id)
        .await?;

    Ok(ApiResponse::ok(playlists, "Playlists retrieved successfully"))
}

/// GET /api/v1/playlist/{playlistId}
#[utoipa::path(
    get,
    path = "/api/v1/playlist/{playlistId}",
    tag = "playlists",
    params(("playlistId" = String, Path, description = "Playlist id")),
    responses(
        (status = 200, description = "Playlist with its videos"),
        (status = 404, description = "Playlist not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_playlist(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&path, "playlist")?;

    let playlist = PlaylistService::new(pool.get_ref().clone())
        .get_playlist(playlist_id)
        .await?;

    Ok(ApiResponse::ok(playlist, "Playlist retrieved successfully"))
}

/// PATCH /api/v1/playlist/{playlistId}
#[utoipa::path(
    patch,
    path = "/api/v1/playlist/{playlistId}",
    tag = "playlists",
    params(("playlistId" = String, Path, description = "Playlist id")),
    request_body = PlaylistRequest,
    responses(
        (status = 200, description = "Playlist updated"),
        (status = 404, description = "Playlist not found or not owned by the caller"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_playlist(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
    body: web::Json<PlaylistRequest>,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&path, "playlist")?;
    let (name, description) = body.fields()?;

    let playlist = PlaylistService::new(pool.get_ref().clone())
        .update_playlist(user_id.0, playlist_id, &name, &description)
        .await?;

    Ok(ApiResponse::ok(playlist, "Playlist updated successfully"))
}

/// DELETE /api/v1/playlist/{playlistId}
#[utoipa::path(
    delete,
    path = "/api/v1/playlist/{playlistId}",
    tag = "playlists",
    params(("playlistId" = String, Path, description = "Playlist id")),
    responses(
        (status = 200, description = "Playlist deleted"),
        (status = 404, description = "Playlist not found or not owned by the caller"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_playlist(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&path, "playlist")?;

    let playlist = PlaylistService::new(pool.get_ref().clone())
        .delete_playlist(user_id.0, playlist_id)
        .await?;

    Ok(ApiResponse::ok(playlist, "Playlist deleted successfully"))
}

/// PATCH /api/v1/playlist/add/{videoId}/{playlistId}
#[utoipa::path(
    patch,
    path = "/api/v1/playlist/add/{videoId}/{playlistId}",
    tag = "playlists",
    params(
        ("videoId" = String, Path, description = "Video id"),
        ("playlistId" = String, Path, description = "Playlist id")
    ),
    responses(
        (status = 200, description = "Video is in the playlist"),
        (status = 404, description = "Video or playlist not found"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_video_to_playlist(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let (raw_video, raw_playlist) = path.into_inner();
    let video_id = parse_id(&raw_video, "video")?;
    let playlist_id = parse_id(&raw_playlist, "playlist")?;

    let playlist = PlaylistService::new(pool.get_ref().clone())
        .add_video(user_id.0, playlist_id, video_id)
        .await?;

    Ok(ApiResponse::ok(playlist, "Video added to playlist successfully"))
}

/// PATCH /api/v1/playlist/remove/{videoId}/{playlistId}
#[utoipa::path(
    patch,
    path = "/api/v1/playlist/remove/{videoId}/{playlistId}",
    tag = "playlists",
    params(
        ("videoId" = String, Path, description = "Video id"),
        ("playlistId" = String, Path, description = "Playlist id")
    ),
    responses(
        (status = 200, description = "Video is no longer in the playlist"),
        (status = 404, description = "Playlist not found or not owned by the caller"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_video_from_playlist(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let (raw_video, raw_playlist) = path.into_inner();
    let video_id = parse_id(&raw_video, "video")?;
    let playlist_id = parse_id(&raw_playlist, "playlist")?;

    let playlist = PlaylistService::new(pool.get_ref().clone())
        .remove_video(user_id.0, playlist_id, video_id)
        .await?;

    Ok(ApiResponse::ok(playlist, "Video removed from playlist successfully"))
}
