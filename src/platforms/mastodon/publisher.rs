use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::platforms::PlatformPublisher;
use crate::types::{MediaFile, Post};

use super::client::MastodonClient;

pub const PLATFORM_NAME: &str = "Mastodon";

/// Publishes posts as Mastodon statuses
pub struct MastodonPublisher {
    client: MastodonClient,
}

impl MastodonPublisher {
    pub fn new(client: MastodonClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlatformPublisher for MastodonPublisher {
    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    async fn publish(&self, post: &Post) -> Result<()> {
        let media_id = match post.media() {
            Some(path) => {
                let media = MediaFile::read(path)
                    .await
                    .map_err(|e| e.with_platform(PLATFORM_NAME))?;
                let uploaded = self
                    .client
                    .upload_media(&media)
                    .await
                    .map_err(|e| e.with_platform(PLATFORM_NAME))?;
                Some(uploaded.id)
            }
            None => None,
        };

        let status = self
            .client
            .post_status(post.text(), media_id.as_deref())
            .await
            .map_err(|e| e.with_platform(PLATFORM_NAME))?;

        info!(
            platform = PLATFORM_NAME,
            id = %status.id,
            with_image = media_id.is_some(),
            "Status created"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn publisher(server: &MockServer) -> MastodonPublisher {
        let client = MastodonClient::new(Client::new(), &server.uri(), "masto-token").unwrap();
        MastodonPublisher::new(client)
    }

    #[tokio::test]
    async fn test_publish_with_media() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/media"))
            .and(header("Authorization", "Bearer masto-token"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "id": "22348641", "type": "image", "url": null
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/statuses"))
            .and(body_json(json!({ "status": "Train arriving", "media_ids": ["22348641"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "103254962155278888", "content": "<p>Train arriving</p>"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("map.png");
        std::fs::write(&image, b"png-bytes").unwrap();

        publisher(&server)
            .publish(&Post::new("Train arriving").with_media(&image))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_publish_text_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/statuses"))
            .and(body_json(json!({ "status": "Train arriving" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "1" })))
            .expect(1)
            .mount(&server)
            .await;

        publisher(&server)
            .publish(&Post::new("Train arriving"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/statuses"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "The access token is invalid"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = publisher(&server)
            .publish(&Post::new("Train arriving"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Platform);
        assert_eq!(err.platform(), Some(PLATFORM_NAME));
        assert_eq!(err.http_status(), Some(401));
    }
}
