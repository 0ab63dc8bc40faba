/// Business logic layer for tube-service
///
/// Services own the authorization and existence rules; repositories in
/// `crate::db` run the statements.
pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod media;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod videos;

// Re-export commonly used services
pub use comments::CommentService;
pub use dashboard::DashboardService;
pub use likes::LikeService;
pub use media::{CloudinaryUploader, MediaUploader, UploadFile, UploadedMedia};
pub use playlists::PlaylistService;
pub use subscriptions::SubscriptionService;
pub use tweets::TweetService;
pub use videos::{VideoDraft, VideoEdit, VideoService};
