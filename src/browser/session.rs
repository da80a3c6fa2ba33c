//! CDP-backed browser session
//!
//! Wraps one launched browser and its single page. Network events are
//! pumped from ChromiumOxide listeners into the session observer on a
//! background task that lives exactly as long as the session.

use super::{BrowserEvent, BrowserSession, NetworkObserver};
use crate::error::BrowserError;
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventRequestWillBeSent, EventResponseReceived,
};
use chromiumoxide::{Browser, Page};
use futures::stream::{self, BoxStream, StreamExt};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace, warn};

/// Grace period for the CDP handler to wind down after close
const HANDLER_SHUTDOWN: Duration = Duration::from_secs(5);

/// Poll interval of the in-page visibility check, in milliseconds
const VISIBILITY_POLL_MS: u64 = 50;

/// A single-use session over a dedicated browser process
pub struct CdpSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    listener: Option<JoinHandle<()>>,
}

impl CdpSession {
    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, page: Page) -> Self {
        Self {
            browser,
            handler,
            page,
            listener: None,
        }
    }

    async fn network_events(&self) -> Result<BoxStream<'static, BrowserEvent>, BrowserError> {
        let requests = self
            .page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .map_err(|e| BrowserError::SubscribeFailed(e.to_string()))?
            .map(|ev| BrowserEvent::RequestWillBeSent {
                url: ev.request.url.clone(),
            });

        let responses = self
            .page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| BrowserError::SubscribeFailed(e.to_string()))?
            .map(|ev| BrowserEvent::ResponseReceived {
                url: ev.response.url.clone(),
                status: u16::try_from(ev.response.status).unwrap_or(0),
            });

        let failures = self
            .page
            .event_listener::<EventLoadingFailed>()
            .await
            .map_err(|e| BrowserError::SubscribeFailed(e.to_string()))?
            .map(|ev| BrowserEvent::LoadingFailed {
                error_text: ev.error_text.clone(),
            });

        let merged = vec![requests.boxed(), responses.boxed(), failures.boxed()];
        Ok(stream::select_all(merged).boxed())
    }
}

/// In-page poll that resolves once `selector` matches an element with a layout box
fn visibility_script(selector: &str) -> String {
    // serde_json gives a correctly escaped JS string literal
    let literal = serde_json::to_string(selector).unwrap_or_else(|_| "\"body\"".to_string());
    format!(
        r#"
            new Promise((resolve) => {{
                function check() {{
                    const el = document.querySelector({literal});
                    if (el && (el.offsetWidth || el.offsetHeight || el.getClientRects().length)) {{
                        resolve(true);
                    }} else {{
                        setTimeout(check, {VISIBILITY_POLL_MS});
                    }}
                }}
                check();
            }})
        "#
    )
}

impl BrowserSession for CdpSession {
    async fn subscribe_network(&mut self, observer: NetworkObserver) -> Result<(), BrowserError> {
        let mut events = self.network_events().await?;
        self.listener = Some(tokio::spawn(async move {
            while let Some(event) = events.next().await {
                trace!("Network event: {:?}", event);
                observer(&event);
            }
        }));
        debug!("Network listener registered");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn wait_visible(&mut self, selector: &str) -> Result<(), BrowserError> {
        let script = visibility_script(selector);
        self.page
            .evaluate(script.as_str())
            .await
            .map_err(|e| BrowserError::WaitFailed {
                selector: selector.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    #[instrument(skip(self, script))]
    async fn evaluate(&mut self, script: &str) -> Result<String, BrowserError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| BrowserError::EvaluationFailed(e.to_string()))
    }

    async fn close(mut self) -> Result<(), BrowserError> {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }

        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::CloseFailed(e.to_string()));

        if tokio::time::timeout(HANDLER_SHUTDOWN, &mut self.handler)
            .await
            .is_err()
        {
            warn!("Browser handler did not stop in time, aborting");
            self.handler.abort();
        }

        debug!("Browser session closed");
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_script_escapes_selector() {
        let script = visibility_script(r#"div[data-x="a'b"]"#);
        assert!(script.contains(r#"document.querySelector("div[data-x=\"a'b\"]")"#));
        assert!(script.contains("setTimeout(check, 50)"));
    }

    #[test]
    fn test_visibility_script_default_root() {
        let script = visibility_script("body");
        assert!(script.contains(r#"document.querySelector("body")"#));
    }
}
