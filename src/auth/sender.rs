//! Bearer-authenticated requests with one re-authentication retry

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::warn;

use crate::error::{Error, ErrorCode, Result};

use super::coordinator::TokenRefreshCoordinator;

/// Sends requests to the OAuth2 platform with a valid bearer token
///
/// Requests are described by a builder closure rather than a built request
/// because the retry needs a fresh request (multipart bodies cannot be
/// replayed). The sender adds the `Authorization` header itself.
#[derive(Clone)]
pub struct AuthenticatingRequestSender {
    http_client: Client,
    coordinator: Arc<TokenRefreshCoordinator>,
}

impl AuthenticatingRequestSender {
    pub fn new(http_client: Client, coordinator: Arc<TokenRefreshCoordinator>) -> Self {
        Self {
            http_client,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &Arc<TokenRefreshCoordinator> {
        &self.coordinator
    }

    /// Send the request built by `build`
    ///
    /// A 401 on the first attempt forces a token refresh and the request is
    /// sent exactly once more. A 401 on the second attempt is returned as an
    /// `Authorization` error; any other response is handed back unchanged for
    /// the caller to interpret. Transport and refresh failures propagate
    /// immediately.
    pub async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let credential = self.coordinator.ensure_fresh().await?;

        let response = self.dispatch(&build, &credential.access_token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        warn!(url = %response.url(), "Request was rejected with 401, refreshing token and retrying once");
        let refreshed = self
            .coordinator
            .force_refresh(&credential.access_token)
            .await?;

        let retry = self.dispatch(&build, &refreshed.access_token).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::new(
                ErrorCode::Authorization,
                "Access token was rejected again after refresh",
            )
            .with_http_status(StatusCode::UNAUTHORIZED.as_u16()));
        }

        Ok(retry)
    }

    async fn dispatch<F>(&self, build: &F, access_token: &str) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        build(&self.http_client)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Error::transport("Request failed", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::OAuth2TokenClient;
    use crate::store::MemoryCredentialStore;
    use crate::test_support::{sample_secret, token_response, SECRET_ID};
    use chrono::Utc;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sender(server: &MockServer, expires_in: chrono::Duration) -> AuthenticatingRequestSender {
        let secret = sample_secret(Some(Utc::now() + expires_in));
        let store = Arc::new(MemoryCredentialStore::with_secret(SECRET_ID, secret.clone()));
        let token_client = OAuth2TokenClient::new(
            Client::new(),
            &format!("{}/2/oauth2/token", server.uri()),
        )
        .unwrap();
        let coordinator = Arc::new(TokenRefreshCoordinator::new(
            SECRET_ID,
            secret,
            store,
            token_client,
        ));
        AuthenticatingRequestSender::new(Client::new(), coordinator)
    }

    fn tweets_request(server: &MockServer) -> impl Fn(&Client) -> RequestBuilder + Send + Sync {
        let url = format!("{}/2/tweets", server.uri());
        move |client: &Client| client.post(&url).json(&serde_json::json!({ "text": "hi" }))
    }

    async fn mount_token_endpoint(server: &MockServer, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/2/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(token_response("access-2", None, 7200)),
            )
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_send_uses_current_token() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 0).await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(header("Authorization", "Bearer access-1"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let sender = sender(&server, chrono::Duration::hours(1));
        let response = sender.send(tweets_request(&server)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_send_refreshes_proactively() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(header("Authorization", "Bearer access-2"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let sender = sender(&server, chrono::Duration::minutes(2));
        let response = sender.send(tweets_request(&server)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_unauthorized_triggers_single_refresh_and_retry() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(header("Authorization", "Bearer access-1"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(header("Authorization", "Bearer access-2"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let sender = sender(&server, chrono::Duration::hours(1));
        let response = sender.send(tweets_request(&server)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(sender.coordinator().credential().await.access_token, "access-2");
    }

    #[tokio::test]
    async fn test_second_unauthorized_is_surfaced_without_third_attempt() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 1).await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let sender = sender(&server, chrono::Duration::hours(1));
        let err = sender.send(tweets_request(&server)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Authorization);
        assert_eq!(err.http_status(), Some(401));
    }

    #[tokio::test]
    async fn test_server_error_is_returned_without_refresh() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 0).await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let sender = sender(&server, chrono::Duration::hours(1));
        let response = sender.send(tweets_request(&server)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_refresh_failure_after_unauthorized_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2/oauth2/token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let sender = sender(&server, chrono::Duration::hours(1));
        let err = sender.send(tweets_request(&server)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Refresh);
        assert_eq!(sender.coordinator().credential().await.access_token, "access-1");
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 0).await;

        let sender = sender(&server, chrono::Duration::hours(1));
        let err = sender
            .send(|client: &Client| client.post("http://127.0.0.1:9/2/tweets"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Transport);
    }
}
