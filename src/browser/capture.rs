//! Page capture orchestration
//!
//! Drives one isolated browser session through navigation, collects the
//! request URLs the page triggers while it loads, and extracts the rendered
//! markup, all under a single deadline. A result is only built for an
//! attempt that completed; anything else surfaces as a [`CaptureError`].

use super::collector::NetworkCollector;
use super::{BrowserCapability, BrowserSession};
use crate::config::{DetectConfig, DEFAULT_DEADLINE, MAX_BODY_BYTES, ROOT_SELECTOR};
use crate::error::{CaptureCause, CaptureError};
use crate::extraction::sanitize_markup;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Serializes the whole current document
const MARKUP_SCRIPT: &str = "document.documentElement.outerHTML";

/// `timestamp` layout: `YYYY-MM-DD HH:MM:SS`, local clock
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One captured page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    /// The requested URL, verbatim
    pub url: String,
    /// Sanitized, size-bounded document markup
    pub response_body: String,
    /// Distinct request URLs in first-observed order
    pub network: Vec<String>,
    /// Completion time
    pub timestamp: String,
}

impl CaptureResult {
    /// Assemble a record from raw markup, stamping it with the current local time
    pub fn assemble(
        url: &str,
        raw_markup: &str,
        network: Vec<String>,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            url: url.to_string(),
            response_body: sanitize_markup(raw_markup, max_body_bytes),
            network,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Capture orchestrator over a browser capability
pub struct PageCapture<B> {
    browser: B,
    deadline: Duration,
    max_body_bytes: usize,
    root_selector: String,
}

impl<B: BrowserCapability> PageCapture<B> {
    /// Create an orchestrator with default deadline, bound and root selector
    pub fn new(browser: B) -> Self {
        Self {
            browser,
            deadline: DEFAULT_DEADLINE,
            max_body_bytes: MAX_BODY_BYTES,
            root_selector: ROOT_SELECTOR.to_string(),
        }
    }

    /// Create an orchestrator using the limits from `config`
    pub fn with_config(browser: B, config: &DetectConfig) -> Self {
        Self {
            browser,
            deadline: config.deadline,
            max_body_bytes: config.max_body_bytes,
            root_selector: config.root_selector.clone(),
        }
    }

    /// Override the per-attempt deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Deadline applied to each attempt
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Capture `url` within the configured deadline
    ///
    /// The session is torn down before this returns, whatever the outcome.
    #[instrument(skip(self))]
    pub async fn capture(&self, url: &str) -> Result<CaptureResult, CaptureError> {
        let started = Instant::now();

        let mut session =
            match tokio::time::timeout(self.deadline, self.browser.open_session(self.deadline))
                .await
            {
                Ok(Ok(session)) => session,
                Ok(Err(e)) => return Err(CaptureError::new(url, CaptureCause::Session(e))),
                Err(_) => {
                    return Err(CaptureError::new(url, CaptureCause::Timeout(self.deadline)))
                }
            };

        let collector = NetworkCollector::new();
        let remaining = self.deadline.saturating_sub(started.elapsed());
        let outcome = match tokio::time::timeout(
            remaining,
            self.drive(&mut session, url, &collector),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(CaptureCause::Timeout(self.deadline)),
        };

        let outcome = outcome.map(|markup| {
            CaptureResult::assemble(url, &markup, collector.snapshot(), self.max_body_bytes)
        });

        if let Err(e) = session.close().await {
            warn!("Failed to tear down session for {}: {}", url, e);
        }

        let result = outcome.map_err(|cause| CaptureError::new(url, cause))?;
        info!(
            "Captured {}: {} bytes, {} requests in {:?}",
            url,
            result.response_body.len(),
            result.network.len(),
            started.elapsed()
        );
        Ok(result)
    }

    /// Subscribe, navigate, wait for the root and extract the raw markup
    async fn drive(
        &self,
        session: &mut B::Session,
        url: &str,
        collector: &NetworkCollector,
    ) -> Result<String, CaptureCause> {
        // The observer must be in place before navigation starts, or the
        // first requests of the load are lost.
        session
            .subscribe_network(collector.observer())
            .await
            .map_err(CaptureCause::Session)?;

        session
            .navigate(url)
            .await
            .map_err(CaptureCause::Navigation)?;

        session
            .wait_visible(&self.root_selector)
            .await
            .map_err(CaptureCause::Visibility)?;
        debug!("Root '{}' visible for {}", self.root_selector, url);

        session
            .evaluate(MARKUP_SCRIPT)
            .await
            .map_err(CaptureCause::Evaluation)
    }
}
