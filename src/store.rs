//! Durable storage for secret bundles
//!
//! The token coordinator does the read-modify-write of a bundle; a store only
//! has to load and replace whole bundles.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{Error, ErrorCode, Result};
use crate::types::Secret;

/// Load/save contract for secret bundles, keyed by secret id
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the bundle stored under `secret_id`
    async fn load(&self, secret_id: &str) -> Result<Secret>;

    /// Replace the bundle stored under `secret_id`
    async fn save(&self, secret_id: &str, secret: &Secret) -> Result<()>;
}

/// Stores each bundle as `<dir>/<secret_id>.json`
///
/// Secret ids may be slash-separated (`prod/announcer`); each segment becomes
/// a subdirectory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, secret_id: &str) -> Result<PathBuf> {
        let invalid = || Error::invalid_argument(format!("Invalid secret id: {secret_id:?}"));

        let mut path = self.dir.clone();
        let mut segments = secret_id.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segment.is_empty() || segment.starts_with('.') || segment.contains(['\\', ':']) {
                return Err(invalid());
            }
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}.json"));
            }
        }
        Ok(path)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self, secret_id: &str) -> Result<Secret> {
        let path = self.path_for(secret_id)?;
        let contents = tokio::fs::read(&path).await.map_err(|e| {
            Error::new(
                ErrorCode::Storage,
                format!("Failed to read secret file {}: {e}", path.display()),
            )
        })?;

        serde_json::from_slice(&contents).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse secret JSON from {}: {e}",
                path.display()
            ))
        })
    }

    async fn save(&self, secret_id: &str, secret: &Secret) -> Result<()> {
        let path = self.path_for(secret_id)?;
        let contents = serde_json::to_vec_pretty(secret).map_err(|e| {
            Error::new(ErrorCode::Storage, format!("Failed to serialize secret: {e}"))
        })?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::new(
                    ErrorCode::Storage,
                    format!("Failed to create secret directory {}: {e}", parent.display()),
                )
            })?;
        }

        // Write next to the target and rename so readers never see a partial file
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &contents).await.map_err(|e| {
            Error::new(
                ErrorCode::Storage,
                format!("Failed to write secret file {}: {e}", tmp_path.display()),
            )
        })?;
        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            Error::new(
                ErrorCode::Storage,
                format!("Failed to replace secret file {}: {e}", path.display()),
            )
        })?;

        tracing::debug!(secret_id, path = %path.display(), "Secret bundle saved");
        Ok(())
    }
}

/// In-process store that keeps every saved bundle
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    secrets: Mutex<HashMap<String, Secret>>,
    history: Mutex<Vec<(String, Secret)>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one bundle
    pub fn with_secret(secret_id: impl Into<String>, secret: Secret) -> Self {
        let mut secrets = HashMap::new();
        secrets.insert(secret_id.into(), secret);
        Self {
            secrets: Mutex::new(secrets),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Every `(secret_id, bundle)` passed to `save`, oldest first
    pub async fn saved(&self) -> Vec<(String, Secret)> {
        self.history.lock().await.clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self, secret_id: &str) -> Result<Secret> {
        self.secrets
            .lock()
            .await
            .get(secret_id)
            .cloned()
            .ok_or_else(|| {
                Error::new(ErrorCode::Storage, format!("No secret stored under {secret_id}"))
            })
    }

    async fn save(&self, secret_id: &str, secret: &Secret) -> Result<()> {
        self.secrets
            .lock()
            .await
            .insert(secret_id.to_string(), secret.clone());
        self.history
            .lock()
            .await
            .push((secret_id.to_string(), secret.clone()));
        Ok(())
    }
}
