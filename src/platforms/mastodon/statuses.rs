use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::http::expect_json;

use super::client::MastodonClient;
use super::types::{CreateStatusRequest, MastodonStatus};

impl MastodonClient {
    /// Publish a status, optionally with previously uploaded media
    pub(crate) async fn post_status(&self, text: &str, media_id: Option<&str>) -> Result<MastodonStatus> {
        let request = CreateStatusRequest {
            status: text.to_string(),
            media_ids: media_id.map(|id| vec![id.to_string()]),
        };

        let response = self
            .post("/api/v1/statuses")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::transport("Create status request failed", e))?;

        expect_json(response, &[StatusCode::OK], "create status").await
    }
}
