//! Query edit debouncer.
//!
//! Rapid typing restarts a fixed quiet window; only the most recent text
//! within the window is ever applied (last-write-wins). Modeled as an
//! explicit deadline the controller polls, not a blocking wait, so a pending
//! edit can be cancelled without suspending the caller.

use std::time::{Duration, Instant};

/// Accumulates query edits within a time window.
pub(crate) struct QueryDebouncer {
    window: Duration,
    pending: Option<String>,
    last_edit: Option<Instant>,
}

impl QueryDebouncer {
    /// Create a debouncer with the given quiet window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_edit: None,
        }
    }

    /// Record a query edit, replacing any pending text and restarting the
    /// window.
    pub fn record_edit(&mut self, text: String) {
        self.pending = Some(text);
        self.last_edit = Some(Instant::now());
    }

    /// Check if the window has elapsed since the last edit
    pub fn is_ready(&self) -> bool {
        match self.last_edit {
            Some(last) => last.elapsed() >= self.window,
            None => false,
        }
    }

    /// Whether an edit is pending
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time until the pending edit is ready (None if nothing is pending)
    pub fn time_until_ready(&self) -> Option<Duration> {
        self.last_edit.map(|last| {
            let elapsed = last.elapsed();
            if elapsed >= self.window {
                Duration::ZERO
            } else {
                self.window - elapsed
            }
        })
    }

    /// Take the pending text, resetting the debouncer.
    /// Returns None if no edit is pending.
    pub fn flush(&mut self) -> Option<String> {
        self.last_edit = None;
        self.pending.take()
    }

    /// Drop any pending edit without applying it
    pub fn clear(&mut self) {
        self.pending = None;
        self.last_edit = None;
    }
}
