//! Integration tests for the delivery tracker.
//!
//! # Running Tests
//!
//! The tests talk to a real `PostgreSQL` database and are ignored by
//! default. Point `DATABASE_URL` at a scratch database; every test empties
//! the `orders` table.
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/deliveries_test \
//!     cargo test -p delivery-tracker-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `delivery_store` - `PgDeliveryStore` against the migrated schema

#![cfg_attr(not(test), forbid(unsafe_code))]

use delivery_tracker_web::db::PgDeliveryStore;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::{Mutex, MutexGuard};

/// Tests in one binary share the `orders` table, so they take turns.
static ORDERS_TABLE: Mutex<()> = Mutex::const_new(());

/// A migrated, empty delivery store held exclusively by one test.
pub struct TestStore {
    pub store: PgDeliveryStore,
    _guard: MutexGuard<'static, ()>,
}

/// Connect to `DATABASE_URL`, migrate, and empty the `orders` table.
///
/// Returns `None` when `DATABASE_URL` is unset or unreachable so the caller
/// can skip.
///
/// # Panics
///
/// Panics if migrations or the cleanup statement fail.
#[allow(clippy::expect_used)]
pub async fn fresh_store() -> Option<TestStore> {
    let guard = ORDERS_TABLE.lock().await;

    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;

    sqlx::migrate!("../web/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE orders RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to empty orders");

    Some(TestStore {
        store: PgDeliveryStore::new(pool),
        _guard: guard,
    })
}
