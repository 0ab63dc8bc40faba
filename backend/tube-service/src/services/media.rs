//! Client for the external media store.
//!
//! Uploads go to a Cloudinary-compatible endpoint using a signed multipart
//! request. Only the resulting URL and, for videos, the duration are kept.

use crate::config::MediaConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::time::Duration;

/// A file received from the client, fully buffered.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedMedia {
    pub url: String,
    /// Seconds, as reported by the media service for audio/video
    pub duration: Option<f64>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<UploadedMedia>;
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
    duration: Option<f64>,
}

pub struct CloudinaryUploader {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl CloudinaryUploader {
    pub fn new(config: &MediaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("media client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/{}/auto/upload",
                config.upload_url.trim_end_matches('/'),
                config.cloud_name
            ),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        })
    }

    fn signed_params(&self, timestamp: i64) -> String {
        if self.folder.is_empty() {
            format!("timestamp={timestamp}")
        } else {
            format!("folder={}&timestamp={timestamp}", self.folder)
        }
    }
}

/// Hex SHA-1 over the sorted parameter string followed by the secret.
pub fn sign_params(params: &str, api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(params.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, file: UploadFile) -> Result<UploadedMedia> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign_params(&self.signed_params(timestamp), &self.api_secret);

        let mut part = Part::bytes(file.bytes).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::BadRequest(format!("Invalid content type: {e}")))?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature);
        if !self.folder.is_empty() {
            form = form.text("folder", self.folder.clone());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(file = %file.file_name, error = %e, "media upload request failed");
                AppError::Upstream("Media upload failed".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(file = %file.file_name, %status, %body, "media service rejected upload");
            return Err(AppError::Upstream("Media upload failed".to_string()));
        }

        let parsed: UploadResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "unreadable media service response");
            AppError::Upstream("Media upload failed".to_string())
        })?;

        let url = parsed
            .secure_url
            .or(parsed.url)
            .ok_or_else(|| AppError::Upstream("Media upload failed".to_string()))?;

        tracing::debug!(file = %file.file_name, %url, "media uploaded");
        Ok(UploadedMedia {
            url,
            duration: parsed.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(folder: &str) -> MediaConfig {
        MediaConfig {
            upload_url: "https://media.example.com/v1_1/".into(),
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "abcd".into(),
            folder: folder.into(),
            max_upload_bytes: 1024,
            timeout_secs: 5,
        }
    }

    #[test]
    fn signature_is_sha1_of_params_and_secret() {
        let params =
            "eager=w_400,h_300,c_pad|w_260,h_200,c_crop&public_id=sample_image&timestamp=1315060510";
        assert_eq!(
            sign_params(params, "abcd"),
            "bfd09f95f331f558cbd1320e67aa8d488770583e"
        );
    }

    #[test]
    fn folder_is_part_of_signed_params() {
        let uploader = CloudinaryUploader::new(&config("tube")).unwrap();
        assert_eq!(uploader.signed_params(42), "folder=tube&timestamp=42");
        assert_eq!(uploader.endpoint, "https://media.example.com/v1_1/demo/auto/upload");

        let bare = CloudinaryUploader::new(&config("")).unwrap();
        assert_eq!(bare.signed_params(42), "timestamp=42");
    }
}
