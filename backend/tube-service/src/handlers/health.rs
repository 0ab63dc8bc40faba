/// Health, readiness and API description endpoints. None of these require a
/// bearer token.
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize, Debug)]
pub struct ComponentCheck {
    pub status: ComponentStatus,
    pub message: String,
    pub latency_ms: u64,
}

#[derive(Serialize, Debug)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub postgresql: ComponentCheck,
    pub timestamp: String,
}

async fn check_postgres(pool: &PgPool) -> ComponentCheck {
    let start = Instant::now();
    let result = sqlx::query("SELECT 1").execute(pool).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "PostgreSQL connection successful".to_string(),
            latency_ms,
        },
        Err(e) => ComponentCheck {
            status: ComponentStatus::Unhealthy,
            message: format!("PostgreSQL connection failed: {e}"),
            latency_ms,
        },
    }
}

/// GET /api/v1/health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    let check = check_postgres(&pool).await;

    if check.status == ComponentStatus::Healthy {
        HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "tube-service",
            "version": env!("CARGO_PKG_VERSION")
        }))
    } else {
        tracing::warn!(error = %check.message, "health check failed");
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": check.message,
            "service": "tube-service"
        }))
    }
}

/// GET /api/v1/health/ready
#[utoipa::path(
    get,
    path = "/api/v1/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve"),
        (status = 503, description = "Not ready")
    )
)]
pub async fn readiness(pool: web::Data<PgPool>) -> HttpResponse {
    let postgresql = check_postgres(&pool).await;
    let ready = postgresql.status == ComponentStatus::Healthy;

    let response = ReadinessResponse {
        ready,
        postgresql,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// GET /api/v1/health/live
#[utoipa::path(
    get,
    path = "/api/v1/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive")
    )
)]
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// GET /api/v1/openapi.json
#[utoipa::path(
    get,
    path = "/api/v1/openapi.json",
    tag = "health",
    responses(
        (status = 200, description = "This document")
    )
)]
pub async fn openapi_json(
    doc: web::Data<utoipa::openapi::OpenApi>,
) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(doc.get_ref()).map_err(|e| {
        tracing::error!(error = %e, "OpenAPI serialization failed");
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
