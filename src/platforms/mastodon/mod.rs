//! Mastodon platform adapter
//!
//! Authenticates with a long-lived application access token.

mod client;
mod media;
mod publisher;
mod statuses;
mod types;

pub use client::MastodonClient;
pub use publisher::{MastodonPublisher, PLATFORM_NAME};
pub use types::*;
