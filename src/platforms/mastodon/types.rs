use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/statuses`
#[derive(Debug, Clone, Serialize)]
pub struct CreateStatusRequest {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MastodonStatus {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MastodonMedia {
    pub id: String,
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
    /// Null while the server is still processing the upload (202 Accepted)
    #[serde(default)]
    pub url: Option<String>,
}
