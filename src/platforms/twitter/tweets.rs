use reqwest::{Client, StatusCode};

use crate::error::Result;
use crate::http::expect_json;

use super::client::TwitterClient;
use super::types::{CreateTweetMedia, CreateTweetRequest, CreateTweetResponse, Tweet};

impl TwitterClient {
    /// Create a tweet, optionally attaching previously uploaded media
    pub(crate) async fn post_tweet(&self, text: &str, media_id: Option<&str>) -> Result<Tweet> {
        let url = self.api_url("/2/tweets");
        let request = CreateTweetRequest {
            text: text.to_string(),
            media: media_id.map(|id| CreateTweetMedia {
                media_ids: vec![id.to_string()],
            }),
        };

        let response = self
            .sender
            .send(|client: &Client| client.post(&url).json(&request))
            .await?;

        let created: CreateTweetResponse =
            expect_json(response, &[StatusCode::CREATED], "create tweet").await?;
        Ok(created.data)
    }
}
