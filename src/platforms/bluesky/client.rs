use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};
use crate::http::{endpoint_url, parse_base_url};

/// Client for the Bluesky PDS XRPC API
pub struct BlueskyClient {
    pub(crate) http_client: Client,
    base_url: Url,
    pub(crate) identifier: String,
    pub(crate) app_password: String,
}

impl BlueskyClient {
    /// Create a new Bluesky client
    ///
    /// # Arguments
    /// * `base_url` - The PDS URL (e.g., "https://bsky.social")
    /// * `identifier` - Handle or DID of the posting account
    /// * `app_password` - App password for that account
    pub fn new(
        http_client: Client,
        base_url: &str,
        identifier: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Result<Self> {
        let identifier = identifier.into();
        let app_password = app_password.into();
        if identifier.is_empty() || app_password.is_empty() {
            return Err(Error::configuration("Bluesky identifier and app password are required"));
        }

        Ok(Self {
            http_client,
            base_url: parse_base_url(base_url)?,
            identifier,
            app_password,
        })
    }

    /// Build the URL of an XRPC method (e.g., "com.atproto.repo.createRecord")
    pub fn xrpc_url(&self, nsid: &str) -> String {
        endpoint_url(&self.base_url, &format!("/xrpc/{nsid}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xrpc_url() {
        let client = BlueskyClient::new(Client::new(), "https://bsky.social", "me.bsky.social", "pw").unwrap();
        assert_eq!(
            client.xrpc_url("com.atproto.server.createSession"),
            "https://bsky.social/xrpc/com.atproto.server.createSession"
        );
    }
}
