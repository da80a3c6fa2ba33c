//! Browser lifecycle management
//!
//! This module handles browser launch configuration and hands out one
//! freshly launched Chromium per capture session.

use super::session::CdpSession;
use super::BrowserCapability;
use crate::error::BrowserError;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Configuration for browser launch
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode (default: true)
    pub headless: bool,
    /// Browser window width (default: 1920)
    pub width: u32,
    /// Browser window height (default: 1080)
    pub height: u32,
    /// Enable sandbox (default: true)
    pub sandbox: bool,
    /// User agent string (None = use default)
    pub user_agent: Option<String>,
    /// Path to Chrome/Chromium executable (None = auto-detect)
    pub chrome_path: Option<String>,
    /// Additional Chrome arguments
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            width: 1920,
            height: 1080,
            sandbox: true,
            user_agent: None,
            chrome_path: None,
            extra_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    /// Create a new config builder
    pub fn builder() -> BrowserConfigBuilder {
        BrowserConfigBuilder::default()
    }

    /// Translate into a ChromiumOxide launch config with CDP requests bounded by `deadline`
    pub(crate) fn to_cdp(&self, deadline: Duration) -> Result<CdpBrowserConfig, BrowserError> {
        let mut builder = CdpBrowserConfig::builder()
            .viewport(chromiumoxide::handler::viewport::Viewport {
                width: self.width,
                height: self.height,
                device_scale_factor: None,
                emulating_mobile: false,
                is_landscape: true,
                has_touch: false,
            })
            .window_size(self.width, self.height)
            .request_timeout(deadline);

        if !self.headless {
            builder = builder.with_head();
        }

        if !self.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        if let Some(ref ua) = self.user_agent {
            builder = builder.arg(format!("--user-agent={}", ua));
        }

        for arg in &self.extra_args {
            builder = builder.arg(arg);
        }

        builder.build().map_err(BrowserError::ConfigError)
    }
}

/// Builder for BrowserConfig
#[derive(Default)]
pub struct BrowserConfigBuilder {
    config: BrowserConfig,
}

impl BrowserConfigBuilder {
    /// Set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Set viewport dimensions
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enable/disable sandbox
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    /// Set Chrome path
    pub fn chrome_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Add extra Chrome argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.config.extra_args.push(arg.into());
        self
    }

    /// Build the config
    pub fn build(self) -> BrowserConfig {
        self.config
    }
}

/// Chromium-backed browser capability
///
/// Every session launches its own browser process, so nothing (cookies,
/// cache, open tabs) carries over from one URL to the next.
#[derive(Debug, Clone, Default)]
pub struct ChromeBrowser {
    config: BrowserConfig,
}

impl ChromeBrowser {
    /// Create a capability with the given launch config
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Get the browser configuration
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}

impl BrowserCapability for ChromeBrowser {
    type Session = CdpSession;

    #[instrument(skip(self))]
    async fn open_session(&self, deadline: Duration) -> Result<CdpSession, BrowserError> {
        debug!(
            "Launching browser: headless={}, sandbox={}",
            self.config.headless, self.config.sandbox
        );

        let cdp_config = self.config.to_cdp(deadline)?;
        let (mut browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    warn!("Browser handler event error");
                    break;
                }
            }
            debug!("Browser handler finished");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Failed to close browser after page error: {}", close_err);
                }
                let _ = tokio::time::timeout(Duration::from_secs(5), handler_task).await;
                return Err(BrowserError::PageCreationFailed(e.to_string()));
            }
        };

        info!("Browser session opened");
        Ok(CdpSession::new(browser, handler_task, page))
    }
}
