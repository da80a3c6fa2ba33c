//! page-detect CLI
//!
//! Captures rendered markup and sub-resource requests for one URL (`-u`) or
//! for newline-delimited URLs piped on stdin.

use clap::Parser;
use page_detect::browser::{BrowserConfig, ChromeBrowser, PageCapture};
use page_detect::config::{DetectConfig, DEFAULT_OUTPUT_PATH};
use page_detect::filter;
use page_detect::{Detector, ResultSink};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

/// Headless page capture
#[derive(Parser, Debug)]
#[command(name = "detect")]
#[command(version)]
#[command(about = "Capture rendered markup and network requests of web pages")]
struct Args {
    /// URL to visit (stdin is ignored when set)
    #[arg(short, long)]
    url: Option<String>,

    /// Output file path; records are appended
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Per-URL deadline in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Disable the Chromium sandbox (needed when running as root in containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> DetectConfig {
        let mut browser = BrowserConfig::builder()
            .headless(!self.headful)
            .sandbox(!self.no_sandbox);
        if let Some(ref path) = self.chrome_path {
            browser = browser.chrome_path(path.clone());
        }

        DetectConfig::builder()
            .deadline(Duration::from_secs(self.timeout))
            .output_path(self.output.clone())
            .browser(browser.build())
            .build()
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let config = args.config();
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let urls = filter::select_urls(args.url.as_deref(), stdin.lock(), interactive);
    tracing::info!(
        "{} URL(s) to process, writing to {}",
        urls.len(),
        config.output_path.display()
    );

    let capture = PageCapture::with_config(ChromeBrowser::new(config.browser.clone()), &config);
    let detector = Detector::new(capture, ResultSink::new(&config.output_path));
    detector.run(&urls).await;
}
