//! Sequential capture pipeline
//!
//! URLs are attempted strictly one at a time: the next attempt starts only
//! after the previous session has been torn down. Per-URL failures are
//! logged and counted, never propagated.

use crate::browser::{BrowserCapability, PageCapture};
use crate::error::{Error, Result};
use crate::output::ResultSink;
use tracing::{error, info};

/// Outcome counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// URLs handed to the orchestrator
    pub attempted: usize,
    /// Records written to the destination
    pub captured: usize,
    /// Attempts that produced no result
    pub failed: usize,
    /// Results that could not be written
    pub write_failures: usize,
}

/// What happened to a single URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOutcome {
    /// Captured and written
    Written,
    /// Capture failed; nothing was written
    CaptureFailed,
    /// Captured but the record could not be written
    WriteFailed,
}

/// Drives the orchestrator over a batch and hands results to the sink
pub struct Detector<B> {
    capture: PageCapture<B>,
    sink: ResultSink,
}

impl<B: BrowserCapability> Detector<B> {
    /// Create a detector
    pub fn new(capture: PageCapture<B>, sink: ResultSink) -> Self {
        Self { capture, sink }
    }

    /// Capture one URL and append its record
    pub async fn detect(&self, url: &str) -> Result<()> {
        let result = self.capture.capture(url).await?;
        self.sink.append(&result)?;
        Ok(())
    }

    /// Capture one URL, logging rather than returning any failure
    pub async fn process_url(&self, url: &str) -> UrlOutcome {
        info!("Get: {}", url);
        match self.detect(url).await {
            Ok(()) => UrlOutcome::Written,
            Err(Error::Capture(e)) => {
                error!("{}", e);
                UrlOutcome::CaptureFailed
            }
            Err(e @ Error::Sink(_)) => {
                error!("Failed to write result for {}: {}", url, e);
                UrlOutcome::WriteFailed
            }
        }
    }

    /// Process every URL in order
    pub async fn run<I, S>(&self, urls: I) -> BatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = BatchReport::default();
        for url in urls {
            report.attempted += 1;
            match self.process_url(url.as_ref()).await {
                UrlOutcome::Written => report.captured += 1,
                UrlOutcome::CaptureFailed => report.failed += 1,
                UrlOutcome::WriteFailed => report.write_failures += 1,
            }
        }
        info!(
            "Batch complete: {} attempted, {} captured, {} failed, {} unwritten",
            report.attempted, report.captured, report.failed, report.write_failures
        );
        report
    }
}
