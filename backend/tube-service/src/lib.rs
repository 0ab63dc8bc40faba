/// Tube Service Library
///
/// Video sharing backend: videos with external media upload, comments,
/// likes, tweets, playlists, channel subscriptions and a channel dashboard.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers, one module per resource
/// - `routes`: Route table and extractor configuration
/// - `services`: Business rules (existence, ownership, media upload)
/// - `db`: PostgreSQL repositories
/// - `models`: Row and response types
/// - `middleware`: Bearer authentication, request metrics, ownership checks
/// - `error` / `response`: Error and success envelopes
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::{AppError, Result};
