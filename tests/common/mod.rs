//! Scripted in-memory browser capability shared by the integration tests.
//!
//! Each URL maps to a `PageScript` describing the network events the page
//! emits while loading, its markup, and how (or whether) it fails.

#![allow(dead_code)]

use page_detect::browser::{BrowserCapability, BrowserEvent, BrowserSession, NetworkObserver};
use page_detect::error::BrowserError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How a scripted page behaves
#[derive(Debug, Clone, Default)]
pub enum Behavior {
    #[default]
    Loads,
    NavigationFails(String),
    NeverVisible,
    WaitFails(String),
    EvaluationFails(String),
}

/// What a scripted page does when visited
#[derive(Debug, Clone, Default)]
pub struct PageScript {
    pub events: Vec<BrowserEvent>,
    pub markup: String,
    pub behavior: Behavior,
}

impl PageScript {
    pub fn loads(markup: &str) -> Self {
        Self {
            markup: markup.to_string(),
            ..Default::default()
        }
    }

    pub fn with_requests(mut self, urls: &[&str]) -> Self {
        self.events.extend(urls.iter().map(|u| request(u)));
        self
    }

    pub fn with_event(mut self, event: BrowserEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn behaving(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }
}

pub fn request(url: &str) -> BrowserEvent {
    BrowserEvent::RequestWillBeSent {
        url: url.to_string(),
    }
}

/// Session bookkeeping visible to tests
#[derive(Debug, Default)]
pub struct SessionStats {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
}

impl SessionStats {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Default)]
pub struct ScriptedBrowser {
    pages: Arc<HashMap<String, PageScript>>,
    pub stats: Arc<SessionStats>,
    fail_open: bool,
}

impl ScriptedBrowser {
    pub fn new<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, PageScript)>,
    {
        Self {
            pages: Arc::new(
                pages
                    .into_iter()
                    .map(|(url, script)| (url.to_string(), script))
                    .collect(),
            ),
            stats: Arc::new(SessionStats::default()),
            fail_open: false,
        }
    }

    pub fn failing_to_launch() -> Self {
        Self {
            fail_open: true,
            ..Default::default()
        }
    }
}

pub struct ScriptedSession {
    pages: Arc<HashMap<String, PageScript>>,
    stats: Arc<SessionStats>,
    observer: Option<NetworkObserver>,
    current: Option<PageScript>,
}

impl BrowserCapability for ScriptedBrowser {
    type Session = ScriptedSession;

    async fn open_session(&self, _deadline: Duration) -> Result<ScriptedSession, BrowserError> {
        if self.fail_open {
            return Err(BrowserError::LaunchFailed("no chromium here".to_string()));
        }
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        let active = self.stats.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_active.fetch_max(active, Ordering::SeqCst);
        Ok(ScriptedSession {
            pages: Arc::clone(&self.pages),
            stats: Arc::clone(&self.stats),
            observer: None,
            current: None,
        })
    }
}

impl BrowserSession for ScriptedSession {
    async fn subscribe_network(&mut self, observer: NetworkObserver) -> Result<(), BrowserError> {
        self.observer = Some(observer);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let script = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| {
                BrowserError::NavigationFailed(format!("net::ERR_NAME_NOT_RESOLVED at {url}"))
            })?;

        if let Behavior::NavigationFails(ref msg) = script.behavior {
            return Err(BrowserError::NavigationFailed(msg.clone()));
        }

        // events only reach an observer that is already registered
        if let Some(ref observer) = self.observer {
            for event in &script.events {
                observer(event);
            }
        }
        self.current = Some(script);
        Ok(())
    }

    async fn wait_visible(&mut self, selector: &str) -> Result<(), BrowserError> {
        match self.current.as_ref().map(|s| &s.behavior) {
            Some(Behavior::NeverVisible) => std::future::pending().await,
            Some(Behavior::WaitFails(msg)) => Err(BrowserError::WaitFailed {
                selector: selector.to_string(),
                message: msg.clone(),
            }),
            _ => Ok(()),
        }
    }

    async fn evaluate(&mut self, _script: &str) -> Result<String, BrowserError> {
        let script = self
            .current
            .as_ref()
            .ok_or_else(|| BrowserError::EvaluationFailed("no document".to_string()))?;
        match script.behavior {
            Behavior::EvaluationFails(ref msg) => Err(BrowserError::EvaluationFailed(msg.clone())),
            _ => Ok(script.markup.clone()),
        }
    }

    async fn close(self) -> Result<(), BrowserError> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        self.stats.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
