//! Proactive and reactive refresh of the shared OAuth2 credential
//!
//! The coordinator owns the secret bundle in memory. Two locks are involved:
//!
//! - `refresh_lock` serializes every decision to refresh together with the
//!   refresh itself, so at most one refresh is in flight and late arrivals
//!   see its result instead of starting their own.
//! - `secret` only guards the swap of the bundle. Readers always get a whole
//!   bundle, old or new, never a mix.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::store::CredentialStore;
use crate::types::{Credential, Secret};

use super::token_client::OAuth2TokenClient;

/// Default proactive refresh window
pub const REFRESH_THRESHOLD: Duration = Duration::from_secs(5 * 60);

pub struct TokenRefreshCoordinator {
    secret_id: String,
    store: Arc<dyn CredentialStore>,
    token_client: OAuth2TokenClient,
    secret: RwLock<Secret>,
    refresh_lock: Mutex<()>,
    refresh_threshold: chrono::Duration,
}

impl TokenRefreshCoordinator {
    /// Create a coordinator for a bundle already loaded from `store`
    pub fn new(
        secret_id: impl Into<String>,
        secret: Secret,
        store: Arc<dyn CredentialStore>,
        token_client: OAuth2TokenClient,
    ) -> Self {
        Self {
            secret_id: secret_id.into(),
            store,
            token_client,
            secret: RwLock::new(secret),
            refresh_lock: Mutex::new(()),
            refresh_threshold: to_chrono(REFRESH_THRESHOLD),
        }
    }

    pub fn with_refresh_threshold(mut self, threshold: Duration) -> Self {
        self.refresh_threshold = to_chrono(threshold);
        self
    }

    /// Snapshot of the current credential, without any freshness check
    pub async fn credential(&self) -> Credential {
        self.secret.read().await.twitter.credential()
    }

    /// Return a credential that is not close to expiry, refreshing first if needed
    ///
    /// Callers arriving while another caller refreshes wait for that refresh
    /// and then re-check, so N concurrent callers cause at most one refresh.
    pub async fn ensure_fresh(&self) -> Result<Credential> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.secret.read().await.clone();
        let credential = current.twitter.credential();
        if !credential.needs_refresh(Utc::now(), self.refresh_threshold) {
            return Ok(credential);
        }

        info!(
            expires_at = ?credential.expires_at,
            "Access token is close to expiry, refreshing"
        );
        self.refresh(current).await
    }

    /// Refresh after the platform rejected `rejected_access_token`
    ///
    /// The rejection outranks the local expiry clock, so the refresh happens
    /// regardless of `expires_at`. If the current token no longer equals the
    /// rejected one, another caller already refreshed and the current
    /// credential is returned without touching the token endpoint.
    pub async fn force_refresh(&self, rejected_access_token: &str) -> Result<Credential> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.secret.read().await.clone();
        if current.twitter.access_token != rejected_access_token {
            debug!("Access token was already replaced by a concurrent refresh");
            return Ok(current.twitter.credential());
        }

        warn!("Access token was rejected, forcing refresh");
        self.refresh(current).await
    }

    /// Must be called with `refresh_lock` held
    async fn refresh(&self, current: Secret) -> Result<Credential> {
        let twitter = &current.twitter;
        let grant = self
            .token_client
            .refresh(&twitter.client_credentials(), &twitter.refresh_token)
            .await?;

        let credential = grant.into_credential(&twitter.refresh_token, Utc::now())?;
        if expiry_regressed(twitter.expiration_time, credential.expires_at) {
            warn!(
                previous_expires_at = ?twitter.expiration_time,
                expires_at = ?credential.expires_at,
                "Refreshed access token expires earlier than the one it replaces"
            );
        }
        let updated = current.with_twitter_credential(&credential);

        // Persist first: memory is only updated once the store has the bundle
        self.store
            .save(&self.secret_id, &updated)
            .await
            .map_err(|e| Error::refresh(format!("Failed to persist refreshed credential: {e}")))?;

        *self.secret.write().await = updated;

        info!(
            expires_at = ?credential.expires_at,
            rotated_refresh_token = credential.refresh_token != twitter.refresh_token,
            "Access token refreshed"
        );
        Ok(credential)
    }
}

/// Whether a refresh moved the expiry backwards or dropped it
fn expiry_regressed(previous: Option<DateTime<Utc>>, next: Option<DateTime<Utc>>) -> bool {
    match (previous, next) {
        (Some(previous), Some(next)) => next < previous,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX)
}
