//! Credential and secret bundle types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// OAuth2 access/refresh token pair for one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    /// When the access token stops being accepted, if the platform told us
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Whether the access token is within `threshold` of its expiry at `now`
    ///
    /// A credential without a known expiry is never refreshed proactively.
    pub fn needs_refresh(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        match self.expires_at {
            Some(expires_at) => match expires_at.checked_sub_signed(threshold) {
                Some(refresh_at) => now >= refresh_at,
                None => true,
            },
            None => false,
        }
    }
}

/// Client id/secret used to authenticate against the token endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Secret section for the OAuth2-protected platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterSecret {
    pub client_id: String,
    pub client_secret: String,
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expiration_time: Option<DateTime<Utc>>,
}

impl TwitterSecret {
    pub fn credential(&self) -> Credential {
        Credential {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_at: self.expiration_time,
        }
    }

    pub fn client_credentials(&self) -> ClientCredentials {
        ClientCredentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MastodonSecret {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueskySecret {
    pub identifier: String,
    pub app_password: String,
}

/// The full secret bundle kept in the credential store
///
/// Sections this crate does not use are carried in `other` so that a
/// read-modify-write of the bundle never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    pub twitter: TwitterSecret,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastodon: Option<MastodonSecret>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bluesky: Option<BlueskySecret>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl Secret {
    /// Check that every present section carries usable values
    pub fn validate(&self) -> Result<()> {
        let twitter = &self.twitter;
        let required = [
            ("twitter.clientId", &twitter.client_id),
            ("twitter.clientSecret", &twitter.client_secret),
            ("twitter.accessToken", &twitter.access_token),
            ("twitter.refreshToken", &twitter.refresh_token),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!("Secret field {field} is empty")));
            }
        }

        if let Some(mastodon) = &self.mastodon {
            if mastodon.access_token.trim().is_empty() {
                return Err(Error::configuration("Secret field mastodon.accessToken is empty"));
            }
        }

        if let Some(bluesky) = &self.bluesky {
            if bluesky.identifier.trim().is_empty() || bluesky.app_password.is_empty() {
                return Err(Error::configuration(
                    "Secret section bluesky needs identifier and appPassword",
                ));
            }
        }

        Ok(())
    }

    /// Copy of this bundle with the OAuth2 tokens replaced
    pub fn with_twitter_credential(&self, credential: &Credential) -> Secret {
        let mut updated = self.clone();
        updated.twitter.access_token = credential.access_token.clone();
        updated.twitter.refresh_token = credential.refresh_token.clone();
        updated.twitter.expiration_time = credential.expires_at;
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bundle_json() -> serde_json::Value {
        serde_json::json!({
            "twitter": {
                "clientId": "client",
                "clientSecret": "shh",
                "accessToken": "access-1",
                "refreshToken": "refresh-1",
                "expirationTime": "2026-01-01T12:00:00Z"
            },
            "mastodon": { "accessToken": "masto" },
            "mapbox": { "accessToken": "pk.mapbox" }
        })
    }

    #[test]
    fn test_needs_refresh_inside_threshold() {
        let expires_at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let credential = Credential {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: Some(expires_at),
        };
        let threshold = Duration::minutes(5);

        assert!(!credential.needs_refresh(expires_at - Duration::minutes(6), threshold));
        assert!(credential.needs_refresh(expires_at - Duration::minutes(5), threshold));
        assert!(credential.needs_refresh(expires_at - Duration::minutes(2), threshold));
        assert!(credential.needs_refresh(expires_at + Duration::minutes(1), threshold));
    }

    #[test]
    fn test_unknown_expiry_never_refreshes_proactively() {
        let credential = Credential {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: None,
        };
        assert!(!credential.needs_refresh(Utc::now(), Duration::minutes(5)));
    }

    #[test]
    fn test_secret_preserves_unknown_sections() {
        let secret: Secret = serde_json::from_value(bundle_json()).unwrap();
        assert_eq!(secret.twitter.access_token, "access-1");
        assert!(secret.bluesky.is_none());
        assert!(secret.other.contains_key("mapbox"));

        let written = serde_json::to_value(&secret).unwrap();
        assert_eq!(written["mapbox"]["accessToken"], "pk.mapbox");
        assert_eq!(written["twitter"]["refreshToken"], "refresh-1");
    }

    #[test]
    fn test_with_twitter_credential_keeps_client_and_other_sections() {
        let secret: Secret = serde_json::from_value(bundle_json()).unwrap();
        let credential = Credential {
            access_token: "access-2".to_string(),
            refresh_token: "refresh-2".to_string(),
            expires_at: None,
        };

        let updated = secret.with_twitter_credential(&credential);

        assert_eq!(updated.twitter.credential(), credential);
        assert_eq!(updated.twitter.client_id, "client");
        assert_eq!(updated.mastodon, secret.mastodon);
        assert_eq!(updated.other, secret.other);
    }

    #[test]
    fn test_validate_rejects_empty_tokens() {
        let mut secret: Secret = serde_json::from_value(bundle_json()).unwrap();
        assert!(secret.validate().is_ok());

        secret.twitter.refresh_token = String::new();
        let err = secret.validate().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Configuration);
    }
}
