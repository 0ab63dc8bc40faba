/// Tweet service - short text posts
use crate::db::tweet_repo;
use crate::error::{AppError, Result};
use crate::middleware::ensure_owner;
use crate::models::{Tweet, TweetView};
use sqlx::PgPool;
use uuid::Uuid;

pub struct TweetService {
    pool: PgPool,
}

impl TweetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_tweet(&self, owner_id: Uuid, content: &str) -> Result<Tweet> {
        Ok(tweet_repo::insert_tweet(&self.pool, owner_id, content).await?)
    }

    pub async fn user_tweets(&self, user_id: Uuid) -> Result<Vec<TweetView>> {
        let tweets = tweet_repo::list_for_owner(&self.pool, user_id).await?;
        if tweets.is_empty() {
            return Err(AppError::NotFound("No tweets found for this user".to_string()));
        }
        Ok(tweets)
    }

    pub async fn update_tweet(&self, user_id: Uuid, tweet_id: Uuid, content: &str) -> Result<Tweet> {
        self.owned_tweet(user_id, tweet_id, "Unauthorized to update this tweet")
            .await?;

        tweet_repo::update_content(&self.pool, tweet_id, content)
            .await?
            .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))
    }

    pub async fn delete_tweet(&self, user_id: Uuid, tweet_id: Uuid) -> Result<()> {
        self.owned_tweet(user_id, tweet_id, "Unauthorized to delete this tweet")
            .await?;

        if !tweet_repo::delete_tweet(&self.pool, tweet_id).await? {
            return Err(AppError::NotFound("Tweet not found".to_string()));
        }
        Ok(())
    }

    async fn owned_tweet(&self, user_id: Uuid, tweet_id: Uuid, denied: &str) -> Result<Tweet> {
        let tweet = tweet_repo::find_tweet(&self.pool, tweet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))?;

        ensure_owner(user_id, tweet.owner_id, denied)?;
        Ok(tweet)
    }
}
