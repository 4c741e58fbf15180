//! Error handling for libannouncer
//!
//! Every failure in the crate is an [`Error`] tagged with an [`ErrorCode`].
//! Errors raised while publishing carry the name of the platform they came
//! from so the orchestrator's failure records are attributable.

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Generic/unknown error
    Unknown,
    /// Invalid argument provided
    InvalidArgument,
    /// Network or timeout failure reaching an endpoint
    Transport,
    /// The OAuth2 platform rejected the bearer token
    Authorization,
    /// The token endpoint failed to issue a new access token
    Refresh,
    /// A platform business endpoint returned a non-success response
    Platform,
    /// Missing or malformed configuration or secret bundle
    Configuration,
    /// The credential store failed to read or write
    Storage,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::Transport => "Transport error",
            ErrorCode::Authorization => "Authorization failed",
            ErrorCode::Refresh => "Token refresh failed",
            ErrorCode::Platform => "Platform error",
            ErrorCode::Configuration => "Configuration error",
            ErrorCode::Storage => "Credential store error",
        }
    }
}

/// Library error type
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}: {}", .code.as_str(), .message)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    /// Platform the failure is attributed to (e.g. "Twitter")
    pub(crate) platform: Option<String>,
    /// HTTP status code if this error came from an HTTP response
    pub(crate) http_status: Option<u16>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Error {
            code,
            message: message.into(),
            platform: None,
            http_status: None,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::InvalidArgument, msg)
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::Configuration, msg)
    }

    pub fn refresh(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::Refresh, msg)
    }

    pub fn platform_failure(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::Platform, msg)
    }

    /// Wrap a reqwest failure that happened before a response was received
    pub fn transport(context: &str, err: reqwest::Error) -> Self {
        let detail = if err.is_timeout() {
            format!("{context}: request timed out ({err})")
        } else if err.is_connect() {
            format!("{context}: connection failed ({err})")
        } else {
            format!("{context}: {err}")
        };
        Error::new(ErrorCode::Transport, detail)
    }

    /// Attribute this error to a platform (builder pattern)
    ///
    /// An existing attribution is kept, so the innermost platform wins.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        if self.platform.is_none() {
            self.platform = Some(platform.into());
        }
        self
    }

    /// Add HTTP status code (builder pattern)
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Get the platform this error is attributed to, if any
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Get the HTTP status code if available
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }
}
