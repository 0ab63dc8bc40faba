//! Records as stored, plus the read views assembled by the repositories.

pub mod comment;
pub mod dashboard;
pub mod like;
pub mod playlist;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;

pub use comment::{Comment, CommentPage, CommentView};
pub use dashboard::{ChannelStats, ChannelVideo};
pub use like::{Like, LikeKind, LikeTarget, LikedVideo, LikedVideos, ToggleOutcome};
pub use playlist::{Playlist, PlaylistVideo, PlaylistView};
pub use subscription::{
    ChannelEntry, ChannelSubscribers, SubscribedChannels, SubscriberEntry, Subscription,
};
pub use tweet::{Tweet, TweetView};
pub use user::OwnerProfile;
pub use video::{NewVideo, Video, VideoDetails, VideoListFilter, VideoSort, VideoUpdate};
