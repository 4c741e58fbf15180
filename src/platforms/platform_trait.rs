//! Publisher trait that every platform adapter implements

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Post;

/// A social platform that can publish a [`Post`]
///
/// Implementations upload `post.media()` first when present, then create the
/// post itself. Every error they return is attributed to their platform
/// (see [`crate::Error::with_platform`]).
#[async_trait]
pub trait PlatformPublisher: Send + Sync {
    /// Human-readable platform name used in logs and failure records
    fn platform_name(&self) -> &str;

    /// Publish `post` on this platform
    async fn publish(&self, post: &Post) -> Result<()>;
}
