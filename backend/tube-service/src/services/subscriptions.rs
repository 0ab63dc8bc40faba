/// Subscription service - users following channels
use crate::db::{subscription_repo, user_repo};
use crate::error::{AppError, Result};
use crate::metrics::record_toggle;
use crate::models::{ChannelSubscribers, SubscribedChannels, Subscription, ToggleOutcome};
use sqlx::PgPool;
use uuid::Uuid;

pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn toggle(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> Result<ToggleOutcome<Subscription>> {
        if !user_repo::user_exists(&self.pool, channel_id).await? {
            return Err(AppError::NotFound("Channel not found".to_string()));
        }

        let outcome =
            subscription_repo::toggle_subscription(&self.pool, subscriber_id, channel_id).await?;
        record_toggle("subscription", outcome.metric_label());
        Ok(outcome)
    }

    pub async fn channel_subscribers(&self, channel_id: Uuid) -> Result<ChannelSubscribers> {
        let subscribers = subscription_repo::subscribers_of(&self.pool, channel_id).await?;
        Ok(ChannelSubscribers {
            channel_id,
            subscribers_count: subscribers.len(),
            subscribers,
        })
    }

    pub async fn subscribed_channels(&self, subscriber_id: Uuid) -> Result<SubscribedChannels> {
        let channels = subscription_repo::channels_of(&self.pool, subscriber_id).await?;
        Ok(SubscribedChannels {
            subscriber_id,
            channels_count: channels.len(),
            channels,
        })
    }
}
