//! Post types

use std::path::{Path, PathBuf};

/// An announcement to publish: text plus an optional image file
///
/// Posts are immutable once built; every platform receives the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    text: String,
    media: Option<PathBuf>,
}

impl Post {
    /// Create a text-only post
    pub fn new(text: impl Into<String>) -> Self {
        Post {
            text: text.into(),
            media: None,
        }
    }

    /// Attach an image file (builder pattern)
    pub fn with_media(mut self, path: impl Into<PathBuf>) -> Self {
        self.media = Some(path.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn media(&self) -> Option<&Path> {
        self.media.as_deref()
    }
}

/// Image bytes loaded from a post's media file
#[derive(Debug, Clone)]
pub(crate) struct MediaFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub(crate) async fn read(path: &Path) -> crate::error::Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            crate::error::Error::invalid_argument(format!(
                "Failed to read media file {}: {e}",
                path.display()
            ))
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| crate::error::Error::invalid_argument("Invalid media file path"))?
            .to_string();

        Ok(MediaFile { file_name, bytes })
    }

    /// Multipart part carrying the file; falls back to no content type if `mime` is invalid
    pub(crate) fn part(&self, mime: &str) -> reqwest::multipart::Part {
        let part = reqwest::multipart::Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone());
        match part.mime_str(mime) {
            Ok(part) => part,
            Err(_) => reqwest::multipart::Part::bytes(self.bytes.clone())
                .file_name(self.file_name.clone()),
        }
    }
}
