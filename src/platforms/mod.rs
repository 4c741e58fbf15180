/// Platform-specific publishers for the supported social networks
///
/// Each platform module provides a client for that service's API and a
/// publisher implementing [`PlatformPublisher`] on top of it.

mod platform_trait;

pub mod bluesky;
pub mod mastodon;
pub mod twitter;

pub use platform_trait::PlatformPublisher;
