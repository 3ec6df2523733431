//! Delivery store.
//!
//! # Database: `deliveries`
//!
//! ## Tables
//!
//! - `orders` - One row per part delivery, with its fulfilled flag
//!
//! # Backends
//!
//! - [`PgDeliveryStore`] - `PostgreSQL`, the production backend
//! - [`LazyDeliveryStore`] - Wraps the `PostgreSQL` backend and connects on first use
//! - [`MemoryDeliveryStore`] - In-process store for tests
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p delivery-tracker-cli -- migrate
//! ```

pub mod lazy;
pub mod memory;
pub mod postgres;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

use delivery_tracker_core::{Delivery, DeliveryId, InputError, NewDelivery};

use crate::config::{DatabaseConfig, DatabaseTarget};

pub use lazy::LazyDeliveryStore;
pub use memory::MemoryDeliveryStore;
pub use postgres::PgDeliveryStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A statement or the connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Input rejected by strict validation.
    #[error("invalid delivery: {0}")]
    InvalidInput(#[from] InputError),

    /// The lazy handle was given connection parameters twice.
    #[error("delivery store is already initialized")]
    AlreadyInitialized,

    /// The lazy handle was used before it was given connection parameters.
    #[error("delivery store has not been configured")]
    NotConfigured,
}

/// Delivery CRUD.
///
/// Every method is a single statement against the backing store; there are
/// no retries and no multi-statement transactions.
#[async_trait]
pub trait DeliveryStore: Send + Sync {
    /// Record a new pending delivery, stamped with the current time.
    async fn create(&self, delivery: NewDelivery) -> Result<DeliveryId, StoreError>;

    /// Pending deliveries, oldest first.
    async fn list_pending(&self) -> Result<Vec<Delivery>, StoreError>;

    /// Fulfilled deliveries, newest first.
    async fn list_fulfilled(&self) -> Result<Vec<Delivery>, StoreError>;

    /// Flip a pending delivery to fulfilled.
    ///
    /// Returns `false` when no pending delivery has this ID. That is not an
    /// error: unknown and already-fulfilled IDs are silently left alone.
    async fn mark_fulfilled(&self, id: DeliveryId) -> Result<bool, StoreError>;

    /// Look up one delivery regardless of its state.
    async fn find(&self, id: DeliveryId) -> Result<Option<Delivery>, StoreError>;

    /// Round trip to the backing store.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Record a delivery from raw input, storing `0` for a non-numeric part
    /// number or quantity.
    async fn create_from_input(
        &self,
        part_number: &str,
        quantity: &str,
        address: &str,
    ) -> Result<DeliveryId, StoreError> {
        self.create(NewDelivery::coerce(part_number, quantity, address))
            .await
    }

    /// Record a delivery from raw input, rejecting malformed fields.
    async fn create_validated(
        &self,
        part_number: &str,
        quantity: &str,
        address: &str,
    ) -> Result<DeliveryId, StoreError> {
        let delivery = NewDelivery::validate(part_number, quantity, address)?;
        self.create(delivery).await
    }
}

/// Create a `PostgreSQL` connection pool for the delivery store.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the connection cannot be
/// established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(connect_options(&config.target)?)
        .await
}

/// Build connection options from either a URL or discrete parameters.
///
/// # Errors
///
/// Returns `sqlx::Error::Configuration` if the URL does not parse.
pub fn connect_options(target: &DatabaseTarget) -> Result<PgConnectOptions, sqlx::Error> {
    match target {
        DatabaseTarget::Url(url) => PgConnectOptions::from_str(url.expose_secret()),
        DatabaseTarget::Components(parts) => Ok(PgConnectOptions::new()
            .host(&parts.host)
            .port(parts.port)
            .database(&parts.database)
            .username(&parts.username)
            .password(parts.password.expose_secret())),
    }
}
