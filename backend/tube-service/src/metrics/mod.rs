//! Prometheus metrics for tube-service.
//!
//! Request and toggle collectors live in [`http`]; the pool gauges are
//! registered by `db_pool`. Everything lands in the default registry.

use actix_web::HttpResponse;
use prometheus::{Encoder, TextEncoder};

pub mod http;

pub use http::{record_request, record_toggle};

/// GET /metrics in the Prometheus text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    match encoder.encode(&prometheus::gather(), &mut buffer) {
        Ok(()) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(buffer),
        Err(err) => {
            tracing::error!(error = %err, "metrics encoding failed");
            HttpResponse::InternalServerError().finish()
        }
    }
}
