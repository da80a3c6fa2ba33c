//! Run configuration
//!
//! Named defaults for the per-URL deadline, the output destination and the
//! response body bound, overridable per invocation.

use crate::browser::BrowserConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Deadline for one capture attempt
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// Append destination for result records
pub const DEFAULT_OUTPUT_PATH: &str = "./detect_result.json";

/// Upper bound on `response_body`, in bytes
pub const MAX_BODY_BYTES: usize = 50 * 1024;

/// Element that must be visible before markup is extracted
pub const ROOT_SELECTOR: &str = "body";

/// Configuration for a detection run
#[derive(Debug, Clone)]
pub struct DetectConfig {
    /// Deadline governing each attempt end to end
    pub deadline: Duration,
    /// Where result records are appended
    pub output_path: PathBuf,
    /// Size bound applied to sanitized markup
    pub max_body_bytes: usize,
    /// Selector waited on before extraction
    pub root_selector: String,
    /// Browser launch options
    pub browser: BrowserConfig,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            deadline: DEFAULT_DEADLINE,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_body_bytes: MAX_BODY_BYTES,
            root_selector: ROOT_SELECTOR.to_string(),
            browser: BrowserConfig::default(),
        }
    }
}

impl DetectConfig {
    /// Create a new config builder
    pub fn builder() -> DetectConfigBuilder {
        DetectConfigBuilder::default()
    }
}

/// Builder for DetectConfig
#[derive(Default)]
pub struct DetectConfigBuilder {
    config: DetectConfig,
}

impl DetectConfigBuilder {
    /// Set the per-URL deadline
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.config.deadline = deadline;
        self
    }

    /// Set the output path
    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the response body bound
    pub fn max_body_bytes(mut self, max: usize) -> Self {
        self.config.max_body_bytes = max;
        self
    }

    /// Set the root selector
    pub fn root_selector<S: Into<String>>(mut self, selector: S) -> Self {
        self.config.root_selector = selector.into();
        self
    }

    /// Set browser options
    pub fn browser(mut self, browser: BrowserConfig) -> Self {
        self.config.browser = browser;
        self
    }

    /// Build the config
    pub fn build(self) -> DetectConfig {
        self.config
    }
}
