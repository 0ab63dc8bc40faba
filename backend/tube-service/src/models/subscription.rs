use crate::models::OwnerProfile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    #[serde(rename = "subscriber")]
    pub subscriber_id: Uuid,
    #[serde(rename = "channel")]
    pub channel_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberEntry {
    pub subscriber: Option<Json<OwnerProfile>>,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSubscribers {
    pub channel_id: Uuid,
    pub subscribers_count: usize,
    pub subscribers: Vec<SubscriberEntry>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelEntry {
    pub channel: Option<Json<OwnerProfile>>,
    /// Subscribers of that channel, not of the requesting user
    pub subscribers_count: i64,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedChannels {
    pub subscriber_id: Uuid,
    pub channels_count: usize,
    pub channels: Vec<ChannelEntry>,
}
