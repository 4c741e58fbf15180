//! Bluesky platform adapter
//!
//! Bluesky uses short-lived sessions created from an identifier and app
//! password, so every publish starts with a new session.

mod blob;
mod client;
mod publisher;
mod record;
mod session;
mod types;

pub use client::BlueskyClient;
pub use publisher::{BlueskyPublisher, PLATFORM_NAME};
pub use types::*;
