//! Fan-out of one post to every registered platform
//!
//! This is the only place in the crate that catches errors and keeps going:
//! each platform's failure becomes a failure record instead of stopping the
//! remaining platforms.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info};

use crate::error::{Error, ErrorCode};
use crate::platforms::PlatformPublisher;
use crate::types::{Post, PublishOutcome, PublishReport};

/// Receives one record per platform that failed to publish
pub trait FailureReporter: Send + Sync {
    fn report(&self, platform: &str, error: &Error);
}

/// Reports failures as structured `tracing` error events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, platform: &str, error: &Error) {
        error!(
            platform,
            code = ?error.code,
            http_status = ?error.http_status(),
            error = %error,
            "Failed to publish post on {platform}"
        );
    }
}

/// Publishes a post on every registered platform, isolating failures
pub struct PublishOrchestrator {
    publishers: Vec<Arc<dyn PlatformPublisher>>,
    reporter: Arc<dyn FailureReporter>,
}

impl Default for PublishOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishOrchestrator {
    pub fn new() -> Self {
        Self {
            publishers: Vec::new(),
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Add a publisher; platforms are attempted in registration order
    pub fn register(mut self, publisher: Arc<dyn PlatformPublisher>) -> Self {
        self.publishers.push(publisher);
        self
    }

    /// Names of the registered platforms, in publish order
    pub fn platform_names(&self) -> Vec<&str> {
        self.publishers.iter().map(|p| p.platform_name()).collect()
    }

    /// Publish `post` once on every platform
    ///
    /// Never fails: each platform's error (or panic) is reported through the
    /// failure reporter and recorded in the returned report.
    pub async fn publish(&self, post: &Post) -> PublishReport {
        let mut report = PublishReport {
            outcomes: Vec::with_capacity(self.publishers.len()),
        };

        for publisher in &self.publishers {
            let platform = publisher.platform_name().to_string();

            let result = match AssertUnwindSafe(publisher.publish(post)).catch_unwind().await {
                Ok(result) => result,
                Err(panic) => Err(Error::new(
                    ErrorCode::Unknown,
                    format!("Publisher panicked: {}", panic_message(panic.as_ref())),
                )),
            };

            match result {
                Ok(()) => {
                    info!(platform = %platform, "Post published");
                    report.outcomes.push(PublishOutcome::success(platform));
                }
                Err(err) => {
                    let err = err.with_platform(platform.clone());
                    self.reporter.report(&platform, &err);
                    report.outcomes.push(PublishOutcome::failure(platform, err));
                }
            }
        }

        report
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
