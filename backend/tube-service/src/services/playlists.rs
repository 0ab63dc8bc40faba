/// Playlist service - ordered, duplicate-free video collections
///
/// Writes are conditional on (playlist, owner); a miss is reported as 404 so
/// other users' playlists are indistinguishable from absent ones.
use crate::db::{playlist_repo, video_repo};
use crate::error::{AppError, Result};
use crate::models::{Playlist, PlaylistView};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PlaylistService {
    pool: PgPool,
}

impl PlaylistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_playlist(
        &self,
        owner_id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Playlist> {
        Ok(playlist_repo::insert_playlist(&self.pool, owner_id, name, description).await?)
    }

    pub async fn user_playlists(&self, user_id: Uuid) -> Result<Vec<PlaylistView>> {
        let playlists = playlist_repo::list_for_owner(&self.pool, user_id).await?;
        if playlists.is_empty() {
            return Err(AppError::NotFound("No playlists found for this user".to_string()));
        }
        Ok(playlists)
    }

    pub async fn get_playlist(&self, playlist_id: Uuid) -> Result<PlaylistView> {
        playlist_repo::find_view(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))
    }

    pub async fn update_playlist(
        &self,
        user_id: Uuid,
        playlist_id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Playlist> {
        playlist_repo::update_owned(&self.pool, playlist_id, user_id, name, description)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "Playlist not found or you do not have permission to update it".to_string(),
                )
            })
    }

    pub async fn delete_playlist(&self, user_id: Uuid, playlist_id: Uuid) -> Result<Playlist> {
        playlist_repo::delete_owned(&self.pool, playlist_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "Playlist not found or you do not have permission to delete it".to_string(),
                )
            })
    }

    /// Adding a video already in the playlist leaves it unchanged.
    pub async fn add_video(
        &self,
        user_id: Uuid,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<Playlist> {
        if !video_repo::video_exists(&self.pool, video_id).await? {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        playlist_repo::add_video_owned(&self.pool, playlist_id, user_id, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))
    }

    pub async fn remove_video(
        &self,
        user_id: Uuid,
        playlist_id: Uuid,
        video_id: Uuid,
    ) -> Result<Playlist> {
        playlist_repo::remove_video_owned(&self.pool, playlist_id, user_id, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))
    }
}
