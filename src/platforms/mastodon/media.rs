use reqwest::{multipart, StatusCode};

use crate::error::{Error, Result};
use crate::http::expect_json;
use crate::types::MediaFile;

use super::client::MastodonClient;
use super::types::MastodonMedia;

impl MastodonClient {
    /// Upload an image attachment
    ///
    /// Large files may be processed asynchronously (202 Accepted); the
    /// returned id can still be attached to a status right away.
    pub(crate) async fn upload_media(&self, media: &MediaFile) -> Result<MastodonMedia> {
        let form = multipart::Form::new().part("file", media.part("image/png"));

        let response = self
            .post("/api/v2/media")
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::transport("Media upload request failed", e))?;

        expect_json(
            response,
            &[StatusCode::OK, StatusCode::ACCEPTED],
            "upload media",
        )
        .await
    }
}
