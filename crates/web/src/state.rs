//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::DeliveryStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the one delivery store
/// the process uses; handlers never reach the store any other way.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn DeliveryStore>,
    strict_input: bool,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Delivery store (usually a `LazyDeliveryStore`)
    /// * `strict_input` - Reject malformed form input instead of coercing it
    #[must_use]
    pub fn new(store: Arc<dyn DeliveryStore>, strict_input: bool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                strict_input,
            }),
        }
    }

    /// Get a reference to the delivery store.
    #[must_use]
    pub fn store(&self) -> &dyn DeliveryStore {
        self.inner.store.as_ref()
    }

    /// Whether form input is validated strictly.
    #[must_use]
    pub fn strict_input(&self) -> bool {
        self.inner.strict_input
    }
}
