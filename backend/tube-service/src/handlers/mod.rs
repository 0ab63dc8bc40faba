/// HTTP handlers for tube-service
///
/// One module per resource. Handlers parse and validate input, call the
/// matching service and wrap the result in the success envelope.
pub mod comments;
pub mod dashboard;
pub mod health;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod upload;
pub mod videos;

use serde::Deserialize;

/// `{content}` body shared by comments and tweets. Missing and blank are
/// both rejected by the handler.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ContentRequest {
    pub content: Option<String>,
}
