//! Publishes train arrival announcements to several social platforms.
//!
//! The interesting parts are the OAuth2 credential lifecycle in [`auth`]
//! (proactive and reactive token refresh, serialized across concurrent
//! callers, persisted to a [`store::CredentialStore`]) and the
//! fault-isolated fan-out in [`publisher`].

// Core modules
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod platforms;
pub mod publisher;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use auth::{AuthenticatingRequestSender, OAuth2TokenClient, TokenRefreshCoordinator};
pub use bootstrap::build_orchestrator;
pub use config::Config;
pub use error::{Error, ErrorCode, Result};
pub use platforms::PlatformPublisher;
pub use publisher::{FailureReporter, PublishOrchestrator, TracingReporter};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use types::{Credential, Post, PublishOutcome, PublishReport, Secret};

pub const VERSION_STRING: &str = concat!(env!("CARGO_PKG_VERSION"), " (libannouncer)");
