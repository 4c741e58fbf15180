//! Core types for libannouncer
//!
//! Platform-agnostic types shared by the credential, publishing and platform
//! modules.

pub mod credential;
pub mod outcome;
pub mod post;

// Re-export for convenience
pub use credential::{BlueskySecret, ClientCredentials, Credential, MastodonSecret, Secret, TwitterSecret};
pub use outcome::{PublishOutcome, PublishReport};
pub use post::Post;
pub(crate) use post::MediaFile;
