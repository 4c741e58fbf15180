use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::http::expect_json;
use crate::types::MediaFile;

use super::client::BlueskyClient;
use super::types::{BlobRef, Session, UploadBlobResponse};

impl BlueskyClient {
    /// Upload raw PNG bytes as a blob owned by the session's account
    pub(crate) async fn upload_blob(&self, session: &Session, media: &MediaFile) -> Result<BlobRef> {
        let response = self
            .http_client
            .post(self.xrpc_url("com.atproto.repo.uploadBlob"))
            .bearer_auth(&session.access_jwt)
            .header(CONTENT_TYPE, "image/png")
            .body(media.bytes.clone())
            .send()
            .await
            .map_err(|e| Error::transport("Upload blob request failed", e))?;

        let uploaded: UploadBlobResponse =
            expect_json(response, &[StatusCode::OK], "upload blob").await?;
        Ok(uploaded.blob)
    }
}
