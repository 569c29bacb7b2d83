//! Route changes requested by views.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::sync::Mutex;
use std::sync::PoisonError;

/// Something that can move the user to another admin route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &str, replace: bool);
}

/// Navigator for headless front ends: records the move in the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, to: &str, replace: bool) {
        tracing::info!(%to, replace, "navigate");
    }
}

/// In-memory route stack. `replace` overwrites the current entry.
#[derive(Debug, Default)]
pub struct History {
    routes: Mutex<Vec<String>>,
}

impl History {
    #[must_use]
    pub fn starting_at(route: impl Into<String>) -> Self {
        Self { routes: Mutex::new(vec![route.into()]) }
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Navigator for History {
    fn navigate(&self, to: &str, replace: bool) {
        let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        if replace {
            routes.pop();
        }
        routes.push(to.to_owned());
    }
}
