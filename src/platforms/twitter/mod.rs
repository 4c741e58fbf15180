//! Twitter (X) platform adapter
//!
//! Authenticates with an OAuth2 user token that expires and is refreshed by
//! [`crate::auth::TokenRefreshCoordinator`].

mod client;
mod media;
mod publisher;
mod tweets;
mod types;

pub use client::TwitterClient;
pub use publisher::{TwitterPublisher, PLATFORM_NAME};
pub use types::*;

/// Token endpoint path on the Twitter API host
pub const TOKEN_ENDPOINT: &str = "/2/oauth2/token";
