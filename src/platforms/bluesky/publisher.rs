use async_trait::async_trait;
use tracing::info;

use crate::config::DEFAULT_IMAGE_ALT_TEXT;
use crate::error::Result;
use crate::platforms::PlatformPublisher;
use crate::types::{MediaFile, Post};

use super::client::BlueskyClient;

pub const PLATFORM_NAME: &str = "Bluesky";

/// Publishes posts as Bluesky feed posts
pub struct BlueskyPublisher {
    client: BlueskyClient,
    image_alt_text: String,
}

impl BlueskyPublisher {
    pub fn new(client: BlueskyClient) -> Self {
        Self {
            client,
            image_alt_text: DEFAULT_IMAGE_ALT_TEXT.to_string(),
        }
    }

    pub fn with_image_alt_text(mut self, alt: impl Into<String>) -> Self {
        self.image_alt_text = alt.into();
        self
    }

    async fn publish_inner(&self, post: &Post) -> Result<()> {
        let session = self.client.create_session().await?;

        let record = match post.media() {
            Some(path) => {
                let media = MediaFile::read(path).await?;
                let blob = self.client.upload_blob(&session, &media).await?;
                self.client
                    .create_record(&session, post.text(), Some((blob, &self.image_alt_text)))
                    .await?
            }
            None => self.client.create_record(&session, post.text(), None).await?,
        };

        info!(
            platform = PLATFORM_NAME,
            cid = %record.cid,
            uri = %record.uri,
            with_image = post.media().is_some(),
            "Post created"
        );
        Ok(())
    }
}

#[async_trait]
impl PlatformPublisher for BlueskyPublisher {
    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    async fn publish(&self, post: &Post) -> Result<()> {
        self.publish_inner(post)
            .await
            .map_err(|e| e.with_platform(PLATFORM_NAME))
    }
}
