//! Media upload for Twitter

use reqwest::{multipart, Client, StatusCode};

use crate::error::{Error, Result};
use crate::http::expect_json;
use crate::types::MediaFile;

use super::client::TwitterClient;
use super::types::{TwitterMedia, UploadMediaResponse};

impl TwitterClient {
    /// Upload a PNG image for use in a tweet
    ///
    /// # Returns
    /// The media metadata; its `id` goes into the tweet's `media_ids`
    pub(crate) async fn upload_media(&self, media: &MediaFile) -> Result<TwitterMedia> {
        let url = self.api_url("/2/media/upload");

        let response = self
            .sender
            .send(|client: &Client| {
                // Rebuilt per attempt: a multipart body is consumed on send
                let form = multipart::Form::new()
                    .part("media", media.part("image/png"))
                    .text("media_category", "tweet_image")
                    .text("media_type", "image/png");
                client.post(&url).multipart(form)
            })
            .await?;

        let upload: UploadMediaResponse =
            expect_json(response, &[StatusCode::OK], "upload media").await?;

        if upload.data.id.is_empty() {
            return Err(Error::platform_failure("Media upload returned an empty media id"));
        }
        Ok(upload.data)
    }
}
