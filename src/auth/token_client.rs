//! Client for the OAuth2 token endpoint (refresh-token grant only)

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::http::{error_body, parse_base_url};
use crate::types::{ClientCredentials, Credential};

/// Scopes requested on every refresh
pub const DEFAULT_SCOPES: &[&str] = &["tweet.read", "tweet.write", "users.read", "offline.access"];

/// Successful token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the new access token in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenGrant {
    /// Build the credential this grant describes
    ///
    /// Platforms that do not rotate refresh tokens omit `refresh_token`; the
    /// previous one stays valid and is kept. An `expires_in` that does not
    /// fit a timestamp is a `Refresh` error.
    pub fn into_credential(
        self,
        previous_refresh_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Credential> {
        let refresh_token = self
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| previous_refresh_token.to_string());

        let expires_at = match self.expires_in {
            Some(secs) => Some(
                i64::try_from(secs)
                    .ok()
                    .and_then(Duration::try_seconds)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
                    .ok_or_else(|| {
                        Error::refresh(format!(
                            "Token refresh response has an out-of-range expires_in: {secs}"
                        ))
                    })?,
            ),
            None => None,
        };

        Ok(Credential {
            access_token: self.access_token,
            refresh_token,
            expires_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Sends refresh-token grants to a token endpoint
#[derive(Debug, Clone)]
pub struct OAuth2TokenClient {
    http_client: Client,
    token_url: Url,
}

impl OAuth2TokenClient {
    pub fn new(http_client: Client, token_url: &str) -> Result<Self> {
        Ok(Self {
            http_client,
            token_url: parse_base_url(token_url)?,
        })
    }

    /// Exchange `refresh_token` for a new access token
    ///
    /// Every failure (transport, non-success status, OAuth error body,
    /// unparseable or empty response) is reported as a `Refresh` error.
    pub async fn refresh(
        &self,
        client: &ClientCredentials,
        refresh_token: &str,
    ) -> Result<TokenGrant> {
        let scope = DEFAULT_SCOPES.join(" ");
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("scope", scope.as_str()),
        ];

        let response = self
            .http_client
            .post(self.token_url.clone())
            .basic_auth(&client.client_id, Some(&client.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let cause = Error::transport("Failed to send token refresh request", e);
                Error::refresh(cause.message)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            let detail = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {description}", err.error),
                    None => err.error,
                },
                Err(_) => body,
            };
            return Err(Error::refresh(format!(
                "Token refresh request was not successful, status code {status}: {detail}"
            ))
            .with_http_status(status.as_u16()));
        }

        let grant = response.json::<TokenGrant>().await.map_err(|e| {
            Error::refresh(format!("Failed to parse token refresh response: {e}"))
        })?;

        if grant.access_token.is_empty() {
            return Err(Error::refresh("Token refresh response has an empty access token"));
        }

        Ok(grant)
    }
}
