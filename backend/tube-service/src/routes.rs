//! Route table for the HTTP API.
//!
//! Health, metrics and the OpenAPI document are public. Everything under the
//! resource scopes requires a bearer token.

use crate::error::AppError;
use crate::handlers::{
    comments, dashboard, health, likes, playlists, subscriptions, tweets, videos,
};
use crate::metrics::serve_metrics;
use crate::middleware::{JwtAuthMiddleware, MetricsMiddleware};
use crate::openapi::ApiDoc;
use actix_web::web;
use utoipa::OpenApi;

/// JSON bodies on these routes are small text payloads.
const JSON_LIMIT_BYTES: usize = 64 * 1024;

/// Extractor failures use the error envelope instead of actix's plain text.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    );
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    extractor_configs(cfg);

    cfg.app_data(web::Data::new(ApiDoc::openapi()))
        .route("/metrics", web::get().to(serve_metrics))
        .route("/api/v1/openapi.json", web::get().to(health::openapi_json))
        .route("/api/v1/health", web::get().to(health::health_summary))
        .route("/api/v1/health/ready", web::get().to(health::readiness))
        .route("/api/v1/health/live", web::get().to(health::liveness))
        .service(
            web::scope("/api/v1")
                .wrap(JwtAuthMiddleware)
                .wrap(MetricsMiddleware)
                .service(
                    web::scope("/videos")
                        .service(
                            web::resource("")
                                .route(web::get().to(videos::list_videos))
                                .route(web::post().to(videos::publish_video)),
                        )
                        .route(
                            "/toggle/publish/{video_id}",
                            web::patch().to(videos::toggle_publish),
                        )
                        .service(
                            web::resource("/{video_id}")
                                .route(web::get().to(videos::get_video))
                                .route(web::patch().to(videos::update_video))
                                .route(web::delete().to(videos::delete_video)),
                        ),
                )
                .service(
                    web::scope("/comments")
                        .service(
                            web::resource("/c/{comment_id}")
                                .route(web::patch().to(comments::update_comment))
                                .route(web::delete().to(comments::delete_comment)),
                        )
                        .service(
                            web::resource("/{video_id}")
                                .route(web::get().to(comments::get_video_comments))
                                .route(web::post().to(comments::add_comment)),
                        ),
                )
                .service(
                    web::scope("/likes")
                        .route("/toggle/v/{video_id}", web::post().to(likes::toggle_video_like))
                        .route(
                            "/toggle/c/{comment_id}",
                            web::post().to(likes::toggle_comment_like),
                        )
                        .route("/toggle/t/{tweet_id}", web::post().to(likes::toggle_tweet_like))
                        .route("/videos", web::get().to(likes::get_liked_videos)),
                )
                .service(
                    web::scope("/tweets")
                        .service(web::resource("").route(web::post().to(tweets::create_tweet)))
                        .route("/user/{user_id}", web::get().to(tweets::get_user_tweets))
                        .service(
                            web::resource("/{tweet_id}")
                                .route(web::patch().to(tweets::update_tweet))
                                .route(web::delete().to(tweets::delete_tweet)),
                        ),
                )
                .service(
                    web::scope("/playlist")
                        .service(
                            web::resource("").route(web::post().to(playlists::create_playlist)),
                        )
                        .route(
                            "/user/{user_id}",
                            web::get().to(playlists::get_user_playlists),
                        )
                        .route(
                            "/add/{video_id}/{playlist_id}",
                            web::patch().to(playlists::add_video_to_playlist),
                        )
                        .route(
                            "/remove/{video_id}/{playlist_id}",
                            web::patch().to(playlists::remove_video_from_playlist),
                        )
                        .service(
                            web::resource("/{playlist_id}")
                                .route(web::get().to(playlists::get_playlist))
                                .route(web::patch().to(playlists::update_playlist))
                                .route(web::delete().to(playlists::delete_playlist)),
                        ),
                )
                .service(
                    web::scope("/subscriptions")
                        .service(
                            web::resource("/c/{channel_id}")
                                .route(web::post().to(subscriptions::toggle_subscription))
                                .route(web::get().to(subscriptions::get_channel_subscribers)),
                        )
                        .route(
                            "/u/{subscriber_id}",
                            web::get().to(subscriptions::get_subscribed_channels),
                        ),
                )
                .service(
                    web::scope("/dashboard")
                        .route("/stats", web::get().to(dashboard::get_channel_stats))
                        .route("/videos", web::get().to(dashboard::get_channel_videos)),
                ),
        );
}
