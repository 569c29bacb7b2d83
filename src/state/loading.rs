//! Loading coordinator: named busy flags plus a page-level overlay.
//!
//! DESIGN
//! ======
//! One `LoadingCoordinator` is shared by every view; clones point at the
//! same state. Views mark work with `with_loading`, which holds a
//! `LoadingGuard` for the lifetime of the operation so the flag clears on
//! success, on error, and when the future is dropped.
//!
//! Flags are not reference counted. Two overlapping operations under one
//! key race and the first to finish clears the flag for both.
//!
//! TIMING
//! ======
//! Navigation shows the page overlay, waits `navigate_delay` so it can
//! render, moves, then waits `hide_after` before hiding it. A route change
//! clears the overlay after `route_grace` no matter who set it.

#[cfg(test)]
#[path = "loading_test.rs"]
mod loading_test;

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::navigation::Navigator;

pub const DEFAULT_NAVIGATE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_HIDE_AFTER: Duration = Duration::from_millis(300);
pub const DEFAULT_ROUTE_GRACE: Duration = Duration::from_millis(100);
pub const DEFAULT_PAGE_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingTimings {
    pub navigate_delay: Duration,
    pub hide_after: Duration,
    pub route_grace: Duration,
}

impl Default for LoadingTimings {
    fn default() -> Self {
        Self {
            navigate_delay: DEFAULT_NAVIGATE_DELAY,
            hide_after: DEFAULT_HIDE_AFTER,
            route_grace: DEFAULT_ROUTE_GRACE,
        }
    }
}

/// Per-call overrides for [`LoadingCoordinator::navigate_with_loading`].
/// Unset delays fall back to the coordinator's timings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    pub message: Option<String>,
    pub replace: bool,
    pub delay: Option<Duration>,
    pub hide_after: Option<Duration>,
}

impl NavigateOptions {
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn replacing(mut self) -> Self {
        self.replace = true;
        self
    }
}

#[derive(Debug, Default)]
struct LoadingState {
    active: BTreeSet<String>,
    message: Option<String>,
    page_loading: bool,
    page_message: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LoadingCoordinator {
    state: Arc<Mutex<LoadingState>>,
    timings: LoadingTimings,
}

impl LoadingCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timings(timings: LoadingTimings) -> Self {
        Self { state: Arc::default(), timings }
    }

    #[must_use]
    pub fn timings(&self) -> LoadingTimings {
        self.timings
    }

    fn lock(&self) -> MutexGuard<'_, LoadingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // NAMED FLAGS
    // =========================================================================

    /// Set or clear `key`. A message replaces the current loading message;
    /// the message is dropped once no key is active.
    pub fn set_loading(&self, key: &str, is_loading: bool, message: Option<&str>) {
        let mut state = self.lock();
        if is_loading {
            state.active.insert(key.to_owned());
        } else {
            state.active.remove(key);
        }
        if let Some(message) = message {
            state.message = Some(message.to_owned());
        }
        if state.active.is_empty() {
            state.message = None;
        }
    }

    #[must_use]
    pub fn is_loading(&self, key: &str) -> bool {
        self.lock().active.contains(key)
    }

    #[must_use]
    pub fn is_any_loading(&self) -> bool {
        !self.lock().active.is_empty()
    }

    #[must_use]
    pub fn loading_message(&self) -> Option<String> {
        self.lock().message.clone()
    }

    #[must_use]
    pub fn active_keys(&self) -> Vec<String> {
        self.lock().active.iter().cloned().collect()
    }

    /// Mark `key` busy until the returned guard drops.
    #[must_use = "the flag clears as soon as the guard is dropped"]
    pub fn acquire(&self, key: &str, message: Option<&str>) -> LoadingGuard {
        self.set_loading(key, true, message);
        LoadingGuard { coordinator: self.clone(), key: key.to_owned() }
    }

    /// Run `op` with `key` marked busy. The flag clears however `op` ends.
    pub async fn with_loading<F, T>(&self, key: &str, op: F, message: Option<&str>) -> T
    where
        F: Future<Output = T>,
    {
        let _guard = self.acquire(key, message);
        op.await
    }

    // =========================================================================
    // PAGE OVERLAY
    // =========================================================================

    pub fn show_page_loading(&self, message: &str) {
        let mut state = self.lock();
        state.page_loading = true;
        state.page_message = Some(message.to_owned());
    }

    pub fn hide_page_loading(&self) {
        let mut state = self.lock();
        state.page_loading = false;
        state.page_message = None;
    }

    #[must_use]
    pub fn is_page_loading(&self) -> bool {
        self.lock().page_loading
    }

    #[must_use]
    pub fn page_message(&self) -> Option<String> {
        self.lock().page_message.clone()
    }

    /// Show the overlay, give it time to render, navigate, then hide it.
    pub async fn navigate_with_loading(&self, navigator: &dyn Navigator, destination: &str, options: NavigateOptions) {
        let message = options.message.as_deref().unwrap_or(DEFAULT_PAGE_MESSAGE);
        self.show_page_loading(message);
        tokio::time::sleep(options.delay.unwrap_or(self.timings.navigate_delay)).await;

        navigator.navigate(destination, options.replace);

        tokio::time::sleep(options.hide_after.unwrap_or(self.timings.hide_after)).await;
        self.hide_page_loading();
    }

    /// Clear the overlay after the route grace period. Call on every route
    /// change; requires a Tokio runtime.
    pub fn route_changed(&self) -> JoinHandle<()> {
        let coordinator = self.clone();
        let grace = self.timings.route_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            coordinator.hide_page_loading();
        })
    }
}

/// Clears its key on drop.
#[derive(Debug)]
pub struct LoadingGuard {
    coordinator: LoadingCoordinator,
    key: String,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.coordinator.set_loading(&self.key, false, None);
    }
}
