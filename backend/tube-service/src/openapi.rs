/// OpenAPI documentation for Tube Service
use crate::models::{
    ChannelStats, ChannelVideo, Comment, Like, LikeKind, OwnerProfile, Playlist, Subscription,
    Tweet, Video,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tube Service API",
        version = "0.1.0",
        description = "Video sharing backend: videos with media upload, comments, likes, tweets, playlists, channel subscriptions and a per-channel dashboard. Every response uses the `{statusCode, data, message, success}` envelope.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development server"),
    ),
    paths(
        crate::handlers::health::health_summary,
        crate::handlers::health::readiness,
        crate::handlers::health::liveness,
        crate::handlers::health::openapi_json,
        crate::handlers::videos::list_videos,
        crate::handlers::videos::publish_video,
        crate::handlers::videos::get_video,
        crate::handlers::videos::update_video,
        crate::handlers::videos::delete_video,
        crate::handlers::videos::toggle_publish,
        crate::handlers::comments::get_video_comments,
        crate::handlers::comments::add_comment,
        crate::handlers::comments::update_comment,
        crate::handlers::comments::delete_comment,
        crate::handlers::likes::toggle_video_like,
        crate::handlers::likes::toggle_comment_like,
        crate::handlers::likes::toggle_tweet_like,
        crate::handlers::likes::get_liked_videos,
        crate::handlers::tweets::create_tweet,
        crate::handlers::tweets::get_user_tweets,
        crate::handlers::tweets::update_tweet,
        crate::handlers::tweets::delete_tweet,
        crate::handlers::playlists::create_playlist,
        crate::handlers::playlists::get_user_playlists,
        crate::handlers::playlists::get_playlist,
        crate::handlers::playlists::update_playlist,
        crate::handlers::playlists::delete_playlist,
        crate::handlers::playlists::add_video_to_playlist,
        crate::handlers::playlists::remove_video_from_playlist,
        crate::handlers::subscriptions::toggle_subscription,
        crate::handlers::subscriptions::get_channel_subscribers,
        crate::handlers::subscriptions::get_subscribed_channels,
        crate::handlers::dashboard::get_channel_stats,
        crate::handlers::dashboard::get_channel_videos
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "videos", description = "Video listing, publishing and owner-only edits"),
        (name = "comments", description = "Comments on videos"),
        (name = "likes", description = "Like toggles on videos, comments and tweets"),
        (name = "tweets", description = "Short text posts"),
        (name = "playlists", description = "Ordered, duplicate-free video collections"),
        (name = "subscriptions", description = "Channel subscriptions"),
        (name = "dashboard", description = "Statistics for the caller's channel"),
    ),
    components(schemas(
        Video,
        Comment,
        Like,
        LikeKind,
        Tweet,
        Playlist,
        Subscription,
        OwnerProfile,
        ChannelStats,
        ChannelVideo
    )),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("RS256 access token"))
                        .build(),
                ),
            )
        }
    }
}
