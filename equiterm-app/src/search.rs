//! Debounced ticker search
//!
//! Only the last keystroke inside the quiet window triggers a backend
//! lookup; earlier ones are superseded before they fire. The pending lookup
//! is modeled as an abortable scheduled task with a generation counter, so
//! supersede semantics are explicit: a newer keystroke aborts the scheduled
//! task, and a stale completion (from a request already in flight) is
//! dropped at delivery instead of overwriting newer results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use equiterm_client::Backend;
use equiterm_core::SearchSuggestion;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Quiet window after the last keystroke before the lookup fires
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Grace delay before a blur hides the list, so a click on a suggestion
/// still lands
pub const BLUR_GRACE: Duration = Duration::from_millis(200);

/// Minimum input length that triggers a lookup
const MIN_QUERY_LEN: usize = 2;

/// Debounced search-suggestion state
pub struct SearchDebouncer {
    backend: Arc<dyn Backend>,
    window: Duration,
    suggestions: Arc<Mutex<Vec<SearchSuggestion>>>,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_window(backend, DEBOUNCE_WINDOW)
    }

    /// Custom quiet window (tests use a short one)
    pub fn with_window(backend: Arc<dyn Backend>, window: Duration) -> Self {
        Self {
            backend,
            window,
            suggestions: Arc::new(Mutex::new(Vec::new())),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Handle a keystroke in the search box.
    ///
    /// Short input hides the list immediately and cancels any pending
    /// lookup; otherwise the lookup is (re)scheduled after the quiet window.
    pub fn on_input(&mut self, text: &str) {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_pending();

        let query = text.trim().to_string();
        if query.len() < MIN_QUERY_LEN {
            self.suggestions.lock().clear();
            return;
        }

        let backend = Arc::clone(&self.backend);
        let suggestions = Arc::clone(&self.suggestions);
        let generation = Arc::clone(&self.generation);
        let window = self.window;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;

            // Superseded while sleeping: a newer keystroke aborted us, but
            // the abort may race the wakeup, so re-check anyway.
            if generation.load(Ordering::SeqCst) != my_generation {
                return;
            }

            debug!("Debounce window elapsed, searching for '{}'", query);
            match backend.search(&query).await {
                Ok(results) => {
                    // Drop stale completions; only the latest query may
                    // write the list.
                    if generation.load(Ordering::SeqCst) == my_generation {
                        *suggestions.lock() = results;
                    }
                }
                Err(e) => {
                    warn!("Ticker search failed: {}", e);
                    if generation.load(Ordering::SeqCst) == my_generation {
                        suggestions.lock().clear();
                    }
                }
            }
        }));
    }

    /// The search box lost focus: hide the list after a short grace delay
    pub fn blur(&mut self) {
        self.cancel_pending();
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let suggestions = Arc::clone(&self.suggestions);
        let generation = Arc::clone(&self.generation);

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(BLUR_GRACE).await;
            if generation.load(Ordering::SeqCst) == my_generation {
                suggestions.lock().clear();
            }
        }));
    }

    /// Hide the list immediately (a suggestion was picked)
    pub fn clear(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cancel_pending();
        self.suggestions.lock().clear();
    }

    /// Current suggestion list; empty means the dropdown is hidden
    pub fn suggestions(&self) -> Vec<SearchSuggestion> {
        self.suggestions.lock().clone()
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
