//! Shared HTTP plumbing

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::error::{Error, ErrorCode, Result};

/// Build the HTTP client shared by every platform
///
/// Each request is bounded by `timeout`. reqwest does not retry on its own,
/// so the only retry in the crate is the sender's single re-authentication.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))
}

/// Parse and normalise an API base URL
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url)
        .map_err(|e| Error::configuration(format!("Invalid URL {base_url:?}: {e}")))
}

/// Join an endpoint path onto a base URL
pub(crate) fn endpoint_url(base_url: &Url, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    let base = base_url.as_str().trim_end_matches('/');
    format!("{base}/{endpoint}")
}

/// Check the response status and extract the JSON body
///
/// Any status outside `accepted` is a platform failure carrying the status
/// and the (truncated) response body.
pub(crate) async fn expect_json<T: serde::de::DeserializeOwned>(
    response: Response,
    accepted: &[StatusCode],
    action: &str,
) -> Result<T> {
    let status = response.status();

    if !accepted.contains(&status) {
        let error_text = error_body(response).await;
        return Err(Error::platform_failure(format!(
            "Failed to {action}, status code {status}: {error_text}"
        ))
        .with_http_status(status.as_u16()));
    }

    response.json::<T>().await.map_err(|e| {
        Error::new(
            ErrorCode::Platform,
            format!("Failed to parse {action} response: {e}"),
        )
        .with_http_status(status.as_u16())
    })
}

pub(crate) async fn error_body(response: Response) -> String {
    const MAX_LEN: usize = 512;

    let mut text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    if text.len() > MAX_LEN {
        let mut cut = MAX_LEN;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
