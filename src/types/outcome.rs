//! Per-platform publish results

use crate::error::Error;

/// Result of one publish attempt on one platform
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub platform: String,
    pub error: Option<Error>,
}

impl PublishOutcome {
    pub fn success(platform: impl Into<String>) -> Self {
        PublishOutcome {
            platform: platform.into(),
            error: None,
        }
    }

    pub fn failure(platform: impl Into<String>, error: Error) -> Self {
        PublishOutcome {
            platform: platform.into(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of one fan-out, in registration order
#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    pub outcomes: Vec<PublishOutcome>,
}

impl PublishReport {
    pub fn failures(&self) -> impl Iterator<Item = &PublishOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(PublishOutcome::is_success)
    }
}
