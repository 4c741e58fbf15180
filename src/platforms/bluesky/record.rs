use chrono::Utc;
use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::http::expect_json;

use super::client::BlueskyClient;
use super::types::{
    BlobRef, BlueskyRecord, CreateRecordRequest, EmbeddedImage, ImagesEmbed, PostRecord, Session,
    IMAGES_EMBED_TYPE, POST_COLLECTION,
};

impl BlueskyClient {
    /// Create an `app.bsky.feed.post` record, embedding `image` when given
    pub(crate) async fn create_record(
        &self,
        session: &Session,
        text: &str,
        image: Option<(BlobRef, &str)>,
    ) -> Result<BlueskyRecord> {
        let embed = image.map(|(blob, alt)| ImagesEmbed {
            embed_type: IMAGES_EMBED_TYPE.to_string(),
            images: vec![EmbeddedImage {
                alt: alt.to_string(),
                image: blob,
            }],
        });

        let request = CreateRecordRequest {
            repo: session.handle.clone(),
            collection: POST_COLLECTION.to_string(),
            record: PostRecord {
                record_type: POST_COLLECTION.to_string(),
                text: text.to_string(),
                created_at: Utc::now(),
                embed,
            },
        };

        let response = self
            .http_client
            .post(self.xrpc_url("com.atproto.repo.createRecord"))
            .bearer_auth(&session.access_jwt)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::transport("Create record request failed", e))?;

        expect_json(response, &[StatusCode::OK], "create record").await
    }
}
