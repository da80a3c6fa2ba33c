//! page-detect - headless page capture
//!
//! Visits web pages in a headless browser, records the fully rendered
//! markup together with every sub-resource request the load triggered, and
//! appends one JSON record per page to an output file.
//!
//! # Architecture
//!
//! ```text
//! input lines ──▶ filter ──▶ Detector ──▶ PageCapture ──▶ BrowserSession (CDP)
//!                               │              │
//!                               │              ├─ NetworkCollector
//!                               │              └─ sanitize + bound markup
//!                               ▼
//!                          ResultSink (JSON lines, append)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use page_detect::browser::{ChromeBrowser, PageCapture};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let capture = PageCapture::new(ChromeBrowser::default());
//!     let result = capture.capture("https://example.com").await?;
//!
//!     println!("{} requests", result.network.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod config;
pub mod error;
pub mod extraction;
pub mod filter;
pub mod output;
pub mod pipeline;

// Re-exports for convenience
pub use browser::{CaptureResult, ChromeBrowser, PageCapture};
pub use config::DetectConfig;
pub use error::{Error, Result};
pub use output::ResultSink;
pub use pipeline::{BatchReport, Detector};
