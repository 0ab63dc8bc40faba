/// Dashboard service - the caller's own channel
use crate::db::dashboard_repo;
use crate::error::Result;
use crate::models::{ChannelStats, ChannelVideo};
use sqlx::PgPool;
use uuid::Uuid;

pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn channel_stats(&self, channel_id: Uuid) -> Result<ChannelStats> {
        Ok(dashboard_repo::channel_stats(&self.pool, channel_id).await?)
    }

    pub async fn channel_videos(&self, channel_id: Uuid) -> Result<Vec<ChannelVideo>> {
        Ok(dashboard_repo::channel_videos(&self.pool, channel_id).await?)
    }
}
