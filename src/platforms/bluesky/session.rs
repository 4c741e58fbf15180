use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::http::expect_json;

use super::client::BlueskyClient;
use super::types::{CreateSessionRequest, Session};

impl BlueskyClient {
    /// Log in with the app password and get a fresh session
    pub(crate) async fn create_session(&self) -> Result<Session> {
        let request = CreateSessionRequest {
            identifier: self.identifier.clone(),
            password: self.app_password.clone(),
        };

        let response = self
            .http_client
            .post(self.xrpc_url("com.atproto.server.createSession"))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::transport("Create session request failed", e))?;

        let session: Session = expect_json(response, &[StatusCode::OK], "create session").await?;
        if session.access_jwt.is_empty() {
            return Err(Error::platform_failure("Create session returned an empty access token"));
        }
        Ok(session)
    }
}
