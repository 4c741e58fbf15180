//! Runtime configuration

use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_TWITTER_API_URL: &str = "https://api.x.com";
pub const DEFAULT_MASTODON_API_URL: &str = "https://mastodon.social";
pub const DEFAULT_BLUESKY_API_URL: &str = "https://bsky.social";
pub const DEFAULT_IMAGE_ALT_TEXT: &str = "Map showing the train's current location";

/// Configuration for building the publishing pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Key of the secret bundle in the credential store
    pub secret_id: String,
    /// Upper bound for every outbound HTTP call
    pub request_timeout: Duration,
    /// How long before expiry the access token is refreshed proactively
    pub refresh_threshold: Duration,
    pub twitter_api_url: String,
    pub mastodon_api_url: String,
    pub bluesky_api_url: String,
    /// Alt text attached to images embedded in Bluesky posts
    pub image_alt_text: String,
}

impl Config {
    /// Create a configuration with default endpoints and timeouts
    pub fn new(secret_id: impl Into<String>) -> Self {
        Config {
            secret_id: secret_id.into(),
            request_timeout: Duration::from_secs(30),
            refresh_threshold: Duration::from_secs(5 * 60),
            twitter_api_url: DEFAULT_TWITTER_API_URL.to_string(),
            mastodon_api_url: DEFAULT_MASTODON_API_URL.to_string(),
            bluesky_api_url: DEFAULT_BLUESKY_API_URL.to_string(),
            image_alt_text: DEFAULT_IMAGE_ALT_TEXT.to_string(),
        }
    }

    /// Read configuration from `ANNOUNCER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_id = lookup("ANNOUNCER_SECRET_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::configuration("ANNOUNCER_SECRET_ID is not set"))?;

        let mut config = Config::new(secret_id);

        if let Some(raw) = lookup("ANNOUNCER_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                Error::configuration(format!("Invalid ANNOUNCER_REQUEST_TIMEOUT_SECS {raw:?}: {e}"))
            })?;
            if secs == 0 {
                return Err(Error::configuration(
                    "ANNOUNCER_REQUEST_TIMEOUT_SECS must be greater than zero",
                ));
            }
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(url) = lookup("ANNOUNCER_TWITTER_API_URL") {
            config = config.with_twitter_api_url(url);
        }
        if let Some(url) = lookup("ANNOUNCER_MASTODON_API_URL") {
            config = config.with_mastodon_api_url(url);
        }
        if let Some(url) = lookup("ANNOUNCER_BLUESKY_API_URL") {
            config = config.with_bluesky_api_url(url);
        }

        Ok(config)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_refresh_threshold(mut self, threshold: Duration) -> Self {
        self.refresh_threshold = threshold;
        self
    }

    pub fn with_twitter_api_url(mut self, url: impl Into<String>) -> Self {
        self.twitter_api_url = url.into();
        self
    }

    pub fn with_mastodon_api_url(mut self, url: impl Into<String>) -> Self {
        self.mastodon_api_url = url.into();
        self
    }

    pub fn with_bluesky_api_url(mut self, url: impl Into<String>) -> Self {
        self.bluesky_api_url = url.into();
        self
    }

    pub fn with_image_alt_text(mut self, alt: impl Into<String>) -> Self {
        self.image_alt_text = alt.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::new("announcer");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.refresh_threshold, Duration::from_secs(300));
        assert_eq!(config.twitter_api_url, "https://api.x.com");
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("ANNOUNCER_SECRET_ID", "prod/announcer"),
            ("ANNOUNCER_REQUEST_TIMEOUT_SECS", "10"),
            ("ANNOUNCER_MASTODON_API_URL", "https://example.social"),
        ]))
        .unwrap();

        assert_eq!(config.secret_id, "prod/announcer");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.mastodon_api_url, "https://example.social");
        assert_eq!(config.bluesky_api_url, DEFAULT_BLUESKY_API_URL);
    }

    #[test]
    fn test_missing_secret_id() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::Configuration);
    }

    #[test]
    fn test_malformed_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            ("ANNOUNCER_SECRET_ID", "announcer"),
            ("ANNOUNCER_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Configuration);
    }
}
