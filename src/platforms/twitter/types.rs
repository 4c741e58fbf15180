use serde::{Deserialize, Serialize};

/// Body of `POST /2/tweets`
#[derive(Debug, Clone, Serialize)]
pub struct CreateTweetRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<CreateTweetMedia>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTweetMedia {
    pub media_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTweetResponse {
    pub data: Tweet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadMediaResponse {
    pub data: TwitterMedia,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterMedia {
    pub id: String,
    #[serde(default)]
    pub media_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_request_omits_media() {
        let request = CreateTweetRequest {
            text: "hello".to_string(),
            media: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "text": "hello" })
        );
    }

    #[test]
    fn test_request_with_media() {
        let request = CreateTweetRequest {
            text: "hello".to_string(),
            media: Some(CreateTweetMedia {
                media_ids: vec!["1146654567674912769".to_string()],
            }),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "text": "hello",
                "media": { "media_ids": ["1146654567674912769"] }
            })
        );
    }
}
