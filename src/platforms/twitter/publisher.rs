use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::platforms::PlatformPublisher;
use crate::types::{MediaFile, Post};

use super::client::TwitterClient;

pub const PLATFORM_NAME: &str = "Twitter";

/// Publishes posts as tweets
pub struct TwitterPublisher {
    client: TwitterClient,
}

impl TwitterPublisher {
    pub fn new(client: TwitterClient) -> Self {
        Self { client }
    }

    async fn publish_inner(&self, post: &Post) -> Result<()> {
        let Some(path) = post.media() else {
            let tweet = self.client.post_tweet(post.text(), None).await?;
            info!(platform = PLATFORM_NAME, id = %tweet.id, "Tweet created without image");
            return Ok(());
        };

        let media = MediaFile::read(path).await?;
        let uploaded = self.client.upload_media(&media).await?;
        let tweet = self.client.post_tweet(post.text(), Some(&uploaded.id)).await?;

        info!(platform = PLATFORM_NAME, id = %tweet.id, media_id = %uploaded.id, "Tweet created");
        Ok(())
    }
}

#[async_trait]
impl PlatformPublisher for TwitterPublisher {
    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    async fn publish(&self, post: &Post) -> Result<()> {
        self.publish_inner(post)
            .await
            .map_err(|e| e.with_platform(PLATFORM_NAME))
    }
}
