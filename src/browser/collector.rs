//! Session-scoped network request collector

use super::{BrowserEvent, NetworkObserver};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Seen {
    order: Vec<String>,
    index: HashSet<String>,
}

/// Ordered, duplicate-free set of request URLs observed during one page load
///
/// Clones share the same underlying set, so the observer handed to the
/// session and the orchestrator's copy see the same contents. All access
/// goes through one mutex, which keeps first-observed order under
/// concurrent delivery.
#[derive(Debug, Clone, Default)]
pub struct NetworkCollector {
    inner: Arc<Mutex<Seen>>,
}

impl NetworkCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request URL; returns `false` for `data:` URLs and repeats
    pub fn record(&self, url: &str) -> bool {
        if url.starts_with("data:") {
            return false;
        }
        let mut seen = self.inner.lock();
        if seen.index.contains(url) {
            return false;
        }
        seen.index.insert(url.to_string());
        seen.order.push(url.to_string());
        true
    }

    /// Feed one browser event; everything but outgoing requests is ignored
    pub fn observe(&self, event: &BrowserEvent) {
        if let Some(url) = event.request_url() {
            self.record(url);
        }
    }

    /// Observer callback that feeds this collector
    pub fn observer(&self) -> NetworkObserver {
        let collector = self.clone();
        Arc::new(move |event: &BrowserEvent| collector.observe(event))
    }

    /// Copy of the URLs seen so far, in first-observed order
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.lock().order.clone()
    }

    /// Number of distinct URLs seen
    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
