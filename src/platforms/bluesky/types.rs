use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const POST_COLLECTION: &str = "app.bsky.feed.post";
pub const IMAGES_EMBED_TYPE: &str = "app.bsky.embed.images";

#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_jwt: String,
    #[serde(default)]
    pub refresh_jwt: Option<String>,
    pub handle: String,
    pub did: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("handle", &self.handle)
            .field("did", &self.did)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadBlobResponse {
    pub blob: BlobRef,
}

/// Reference to an uploaded blob, embedded verbatim into records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobRef {
    #[serde(rename = "$type")]
    pub blob_type: String,
    #[serde(rename = "ref")]
    pub reference: BlobLink,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobLink {
    #[serde(rename = "$link")]
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRecordRequest {
    pub repo: String,
    pub collection: String,
    pub record: PostRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostRecord {
    #[serde(rename = "$type")]
    pub record_type: String,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<ImagesEmbed>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagesEmbed {
    #[serde(rename = "$type")]
    pub embed_type: String,
    pub images: Vec<EmbeddedImage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedImage {
    pub alt: String,
    pub image: BlobRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlueskyRecord {
    pub uri: String,
    pub cid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blob_ref_keeps_atproto_field_names() {
        let raw = json!({
            "$type": "blob",
            "ref": { "$link": "bafkreibabalobzn6cd366ukcsjycp4yymjymgfxcv6xczmlgpemzkz3cfa" },
            "mimeType": "image/png",
            "size": 760898
        });

        let blob: BlobRef = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(blob.mime_type, "image/png");
        assert_eq!(serde_json::to_value(&blob).unwrap(), raw);
    }

    #[test]
    fn test_session_debug_hides_tokens() {
        let session = Session {
            access_jwt: "secret-jwt".to_string(),
            refresh_jwt: None,
            handle: "me.bsky.social".to_string(),
            did: "did:plc:abc".to_string(),
        };
        assert!(!format!("{session:?}").contains("secret-jwt"));
    }
}
