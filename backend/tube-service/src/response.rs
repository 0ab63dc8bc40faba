//! Success envelope shared by every route.

use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// `{statusCode, data, message, success}`; the HTTP status always equals
/// `statusCode`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    status_code: u16,
    data: T,
    message: String,
    success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> HttpResponse {
        Self::new(StatusCode::OK, data, message).into_response()
    }

    pub fn created(data: T, message: impl Into<String>) -> HttpResponse {
        Self::new(StatusCode::CREATED, data, message).into_response()
    }

    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        HttpResponse::build(status).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_flag_tracks_status() {
        let ok = ApiResponse::new(StatusCode::CREATED, 1, "made");
        assert!(ok.success);
        assert_eq!(ok.status_code, 201);

        let value = serde_json::to_value(ApiResponse::new(StatusCode::OK, None::<u8>, "gone")).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert!(value["data"].is_null());
        assert_eq!(value["message"], "gone");
        assert_eq!(value["success"], true);
    }

    #[test]
    fn response_status_matches_envelope() {
        let resp = ApiResponse::created(serde_json::json!({}), "ok");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
