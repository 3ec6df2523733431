//! Lazily connected delivery store handle.
//!
//! The composition root creates one [`LazyDeliveryStore`], gives it connection
//! parameters exactly once, and hands it to whoever needs the store. Nothing
//! touches the network until the first operation; that call opens the pool,
//! and every later call reuses it. A bad password or unreachable host
//! therefore surfaces on first use, not at startup.

use std::sync::OnceLock;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use delivery_tracker_core::{Delivery, DeliveryId, NewDelivery};

use super::{DeliveryStore, PgDeliveryStore, StoreError, create_pool};
use crate::config::DatabaseConfig;

/// Single initialization point for the `PostgreSQL` delivery store.
#[derive(Debug, Default)]
pub struct LazyDeliveryStore {
    config: OnceLock<DatabaseConfig>,
    store: OnceCell<PgDeliveryStore>,
}

impl LazyDeliveryStore {
    /// Create an unconfigured handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that is already configured.
    #[must_use]
    pub fn with_config(config: DatabaseConfig) -> Self {
        let handle = Self::new();
        // A fresh OnceLock always accepts its first value
        let _ = handle.config.set(config);
        handle
    }

    /// Supply connection parameters.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyInitialized` if parameters were already
    /// supplied. The original parameters stay in effect.
    pub fn configure(&self, config: DatabaseConfig) -> Result<(), StoreError> {
        self.config
            .set(config)
            .map_err(|_| StoreError::AlreadyInitialized)
    }

    /// Whether connection parameters have been supplied.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.get().is_some()
    }

    /// Whether the first operation has connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.store.initialized()
    }

    /// Get the connected store, connecting on the first call.
    ///
    /// Concurrent first callers wait on a single connection attempt. A
    /// failed attempt is not cached; the next call tries again.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotConfigured` before [`configure`](Self::configure),
    /// or `StoreError::Database` if the connection cannot be established.
    pub async fn get(&self) -> Result<&PgDeliveryStore, StoreError> {
        let config = self.config.get().ok_or(StoreError::NotConfigured)?;

        self.store
            .get_or_try_init(|| async {
                let pool = create_pool(config).await.inspect_err(|e| {
                    tracing::error!(error = %e, "Failed to connect to delivery store");
                })?;
                tracing::info!(
                    max_connections = config.max_connections,
                    "Delivery store connected"
                );
                Ok::<_, StoreError>(PgDeliveryStore::new(pool))
            })
            .await
    }
}

#[async_trait]
impl DeliveryStore for LazyDeliveryStore {
    async fn create(&self, delivery: NewDelivery) -> Result<DeliveryId, StoreError> {
        self.get().await?.create(delivery).await
    }

    async fn list_pending(&self) -> Result<Vec<Delivery>, StoreError> {
        self.get().await?.list_pending().await
    }

    async fn list_fulfilled(&self) -> Result<Vec<Delivery>, StoreError> {
        self.get().await?.list_fulfilled().await
    }

    async fn mark_fulfilled(&self, id: DeliveryId) -> Result<bool, StoreError> {
        self.get().await?.mark_fulfilled(id).await
    }

    async fn find(&self, id: DeliveryId) -> Result<Option<Delivery>, StoreError> {
        self.get().await?.find(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.get().await?.ping().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::DatabaseTarget;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            target: DatabaseTarget::Url(SecretString::from(url)),
            max_connections: 1,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_handle_reports_not_configured() {
        let handle = LazyDeliveryStore::new();
        assert!(!handle.is_configured());
        assert!(matches!(
            handle.list_pending().await,
            Err(StoreError::NotConfigured)
        ));
    }

    #[test]
    fn test_second_configure_is_an_error() {
        let handle = LazyDeliveryStore::new();
        handle.configure(config("postgres://localhost/first")).unwrap();
        let err = handle
            .configure(config("postgres://localhost/second"))
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyInitialized));
        assert!(handle.is_configured());
    }

    #[test]
    fn test_with_config_rejects_reconfiguration() {
        let handle = LazyDeliveryStore::with_config(config("postgres://localhost/first"));
        assert!(matches!(
            handle.configure(config("postgres://localhost/second")),
            Err(StoreError::AlreadyInitialized)
        ));
    }

    #[tokio::test]
    async fn test_connection_is_deferred_until_first_use() {
        // Configuring never dials out, even for a target that cannot exist
        let handle = LazyDeliveryStore::with_config(config("not a url"));
        assert!(!handle.is_connected());

        let err = handle.ping().await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!handle.is_connected());
    }
}
