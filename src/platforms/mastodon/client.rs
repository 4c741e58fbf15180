use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::error::{Error, Result};
use crate::http::{endpoint_url, parse_base_url};

/// Client for a Mastodon instance's REST API
pub struct MastodonClient {
    http_client: Client,
    base_url: Url,
    access_token: String,
}

impl MastodonClient {
    /// Create a new Mastodon client
    ///
    /// # Arguments
    /// * `base_url` - The instance URL (e.g., "https://mastodon.social")
    /// * `access_token` - Application access token with `write:media` and `write:statuses`
    pub fn new(http_client: Client, base_url: &str, access_token: impl Into<String>) -> Result<Self> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err(Error::configuration("Mastodon access token is empty"));
        }

        Ok(Self {
            http_client,
            base_url: parse_base_url(base_url)?,
            access_token,
        })
    }

    /// Build the full API URL for a given endpoint (e.g., "/api/v1/statuses")
    pub fn api_url(&self, endpoint: &str) -> String {
        endpoint_url(&self.base_url, endpoint)
    }

    /// Start an authenticated POST request
    pub(crate) fn post(&self, endpoint: &str) -> RequestBuilder {
        self.http_client
            .post(self.api_url(endpoint))
            .bearer_auth(&self.access_token)
    }
}
