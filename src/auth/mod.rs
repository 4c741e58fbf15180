//! OAuth2 credential lifecycle
//!
//! [`TokenRefreshCoordinator`] owns the one shared credential and refreshes
//! it; [`AuthenticatingRequestSender`] consults the coordinator before every
//! request and retries once after a 401.

mod coordinator;
mod sender;
mod token_client;

pub use coordinator::{TokenRefreshCoordinator, REFRESH_THRESHOLD};
pub use sender::AuthenticatingRequestSender;
pub use token_client::{OAuth2TokenClient, TokenGrant, DEFAULT_SCOPES};
