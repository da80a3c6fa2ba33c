//! Error types for page-detect
//!
//! This module provides the error hierarchy using `thiserror`. Capture
//! failures are always scoped to a single URL and never abort a batch.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The main error type for page-detect operations
///
/// Everything that can go wrong while handling one URL of a batch.
#[derive(Error, Debug)]
pub enum Error {
    /// The capture attempt failed
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Writing the result record failed
    #[error("Output error: {0}")]
    Sink(#[from] SinkError),
}

/// Browser capability errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    /// Failed to register a network event listener
    #[error("Failed to subscribe to network events: {0}")]
    SubscribeFailed(String),

    /// Page load failed
    #[error("Page load failed: {0}")]
    NavigationFailed(String),

    /// Waiting for a visible root element failed
    #[error("Wait for visible '{selector}' failed: {message}")]
    WaitFailed {
        /// Selector that was waited on
        selector: String,
        /// Underlying failure
        message: String,
    },

    /// JavaScript evaluation failed
    #[error("JavaScript execution failed: {0}")]
    EvaluationFailed(String),

    /// Closing the session failed
    #[error("Failed to close browser: {0}")]
    CloseFailed(String),
}

/// Why a capture attempt was abandoned
#[derive(Error, Debug)]
pub enum CaptureCause {
    /// The browser session could not be opened or wired up
    #[error("session unavailable: {0}")]
    Session(#[source] BrowserError),

    /// The browser could not load the target
    #[error("navigation failed: {0}")]
    Navigation(#[source] BrowserError),

    /// The page loaded but its root element could not be waited on
    #[error("root never became visible: {0}")]
    Visibility(#[source] BrowserError),

    /// The attempt ran past its deadline
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Markup extraction failed after a successful load
    #[error("markup evaluation failed: {0}")]
    Evaluation(#[source] BrowserError),
}

/// A failed capture attempt for one URL
#[derive(Error, Debug)]
#[error("Failed to capture web data for {url}: {cause}")]
pub struct CaptureError {
    /// The URL that was attempted, verbatim
    pub url: String,
    /// What went wrong
    #[source]
    pub cause: CaptureCause,
}

impl CaptureError {
    /// Create a capture error for `url`
    pub fn new<S: Into<String>>(url: S, cause: CaptureCause) -> Self {
        Self {
            url: url.into(),
            cause,
        }
    }

    /// Whether the attempt failed by running out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self.cause, CaptureCause::Timeout(_))
    }
}

/// Result sink errors
#[derive(Error, Debug)]
pub enum SinkError {
    /// Destination could not be opened for append
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Record could not be written
    #[error("Failed to write record to {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Record could not be serialized
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for page-detect operations
pub type Result<T> = std::result::Result<T, Error>;
