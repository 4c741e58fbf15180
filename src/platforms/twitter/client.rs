use url::Url;

use crate::auth::AuthenticatingRequestSender;
use crate::error::Result;
use crate::http::{endpoint_url, parse_base_url};

/// Client for the Twitter (X) v2 API
///
/// All calls go through the authenticating sender, which keeps the OAuth2
/// token fresh and re-authenticates once on a 401.
pub struct TwitterClient {
    pub(crate) sender: AuthenticatingRequestSender,
    base_url: Url,
}

impl TwitterClient {
    /// Create a new Twitter client
    ///
    /// # Arguments
    /// * `base_url` - The API base URL (e.g., "https://api.x.com")
    /// * `sender` - Sender bound to the Twitter OAuth2 credential
    pub fn new(base_url: &str, sender: AuthenticatingRequestSender) -> Result<Self> {
        Ok(Self {
            sender,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Build the full API URL for a given endpoint (e.g., "/2/tweets")
    pub fn api_url(&self, endpoint: &str) -> String {
        endpoint_url(&self.base_url, endpoint)
    }
}
