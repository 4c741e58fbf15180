//! Wiring of the publishing pipeline from configuration and stored secrets

use std::sync::Arc;

use tracing::info;

use crate::auth::{AuthenticatingRequestSender, OAuth2TokenClient, TokenRefreshCoordinator};
use crate::config::Config;
use crate::error::{Error, ErrorCode, Result};
use crate::http::{build_http_client, endpoint_url, parse_base_url};
use crate::platforms::bluesky::{BlueskyClient, BlueskyPublisher};
use crate::platforms::mastodon::{MastodonClient, MastodonPublisher};
use crate::platforms::twitter::{self, TwitterClient, TwitterPublisher};
use crate::publisher::PublishOrchestrator;
use crate::store::CredentialStore;

/// Load the secret bundle and build an orchestrator for every configured platform
///
/// Platforms are registered as Twitter, Mastodon, Bluesky; the latter two
/// only when their secret sections exist. Any problem with the bundle is a
/// `Configuration` error, raised before anything is published.
pub async fn build_orchestrator(
    config: &Config,
    store: Arc<dyn CredentialStore>,
) -> Result<PublishOrchestrator> {
    let secret = store.load(&config.secret_id).await.map_err(|e| {
        Error::configuration(format!(
            "Failed to load secret bundle {:?}: {}",
            config.secret_id, e.message
        ))
    })?;
    secret.validate()?;

    let http_client = build_http_client(config.request_timeout)?;

    let twitter_base = parse_base_url(&config.twitter_api_url)?;
    let token_client = OAuth2TokenClient::new(
        http_client.clone(),
        &endpoint_url(&twitter_base, twitter::TOKEN_ENDPOINT),
    )?;
    let coordinator = Arc::new(
        TokenRefreshCoordinator::new(
            config.secret_id.clone(),
            secret.clone(),
            store,
            token_client,
        )
        .with_refresh_threshold(config.refresh_threshold),
    );
    let sender = AuthenticatingRequestSender::new(http_client.clone(), coordinator);

    let mut orchestrator = PublishOrchestrator::new().register(Arc::new(TwitterPublisher::new(
        TwitterClient::new(&config.twitter_api_url, sender)?,
    )));

    if let Some(mastodon) = &secret.mastodon {
        let client = MastodonClient::new(
            http_client.clone(),
            &config.mastodon_api_url,
            mastodon.access_token.clone(),
        )?;
        orchestrator = orchestrator.register(Arc::new(MastodonPublisher::new(client)));
    }

    if let Some(bluesky) = &secret.bluesky {
        let client = BlueskyClient::new(
            http_client,
            &config.bluesky_api_url,
            bluesky.identifier.clone(),
            bluesky.app_password.clone(),
        )?;
        orchestrator = orchestrator.register(Arc::new(
            BlueskyPublisher::new(client).with_image_alt_text(config.image_alt_text.clone()),
        ));
    }

    info!(
        platforms = ?orchestrator.platform_names(),
        "Publishing pipeline ready"
    );
    Ok(orchestrator)
}

/// Whether an error means the process cannot publish at all
pub fn is_fatal(error: &Error) -> bool {
    error.code == ErrorCode::Configuration
}
