//! Browser automation module
//!
//! The capture orchestrator talks to the browser only through the
//! [`BrowserCapability`] and [`BrowserSession`] traits. [`ChromeBrowser`]
//! implements them over ChromiumOxide; tests substitute scripted sessions.

pub mod capture;
pub mod collector;
pub mod controller;
pub mod session;

pub use capture::{CaptureResult, PageCapture};
pub use collector::NetworkCollector;
pub use controller::{BrowserConfig, BrowserConfigBuilder, ChromeBrowser};
pub use session::CdpSession;

use crate::error::BrowserError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Network activity reported by a browser session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// A request is about to be sent
    RequestWillBeSent {
        /// Target URL of the request
        url: String,
    },
    /// A response arrived
    ResponseReceived {
        /// URL of the response
        url: String,
        /// HTTP status code
        status: u16,
    },
    /// A request failed to load
    LoadingFailed {
        /// Error text reported by the browser
        error_text: String,
    },
    /// Anything else the browser emits
    Other,
}

impl BrowserEvent {
    /// Target URL of a request about to be sent
    pub fn request_url(&self) -> Option<&str> {
        match self {
            BrowserEvent::RequestWillBeSent { url } => Some(url),
            _ => None,
        }
    }
}

/// Callback invoked for every network event of a session
///
/// May run concurrently with the session's own navigation calls.
pub type NetworkObserver = Arc<dyn Fn(&BrowserEvent) + Send + Sync>;

/// Something that can open isolated, single-use browser sessions
pub trait BrowserCapability {
    /// Session type handed out by this capability
    type Session: BrowserSession;

    /// Open a fresh session whose individual operations are bounded by `deadline`
    fn open_session(
        &self,
        deadline: Duration,
    ) -> impl Future<Output = Result<Self::Session, BrowserError>>;
}

/// One browser-driven page load
pub trait BrowserSession {
    /// Deliver network events to `observer` until the session is closed
    fn subscribe_network(
        &mut self,
        observer: NetworkObserver,
    ) -> impl Future<Output = Result<(), BrowserError>>;

    /// Navigate to `url`
    fn navigate(&mut self, url: &str) -> impl Future<Output = Result<(), BrowserError>>;

    /// Block until the element matching `selector` is visible
    fn wait_visible(&mut self, selector: &str) -> impl Future<Output = Result<(), BrowserError>>;

    /// Evaluate `script` and return its string result
    fn evaluate(&mut self, script: &str) -> impl Future<Output = Result<String, BrowserError>>;

    /// Release every resource held by the session
    fn close(self) -> impl Future<Output = Result<(), BrowserError>>;
}
