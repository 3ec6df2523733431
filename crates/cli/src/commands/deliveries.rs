//! Delivery management commands.
//!
//! # Usage
//!
//! ```bash
//! dt-cli deliveries add -p 4417 -q 12 -a "Dock 3, 12 Harbor Rd"
//! dt-cli deliveries add -p 4417 -q 12 -a "Dock 3" --strict
//! dt-cli deliveries pending
//! dt-cli deliveries fulfilled
//! dt-cli deliveries fulfill 7
//! dt-cli deliveries show 7
//! ```
//!
//! Addresses are printed as stored, with markup characters escaped.

use delivery_tracker_core::{Delivery, DeliveryId};
use delivery_tracker_web::config::{ConfigError, DatabaseConfig};
use delivery_tracker_web::db::{DeliveryStore, LazyDeliveryStore, StoreError};
use thiserror::Error;

/// Errors that can occur during delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryCommandError {
    /// Connection settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No delivery has the requested ID.
    #[error("Delivery not found: {0}")]
    NotFound(DeliveryId),
}

/// Build the store handle from environment settings.
///
/// Nothing connects until the first command runs against it.
///
/// # Errors
///
/// Returns `DeliveryCommandError::Config` if the settings are incomplete.
pub fn open_store() -> Result<LazyDeliveryStore, DeliveryCommandError> {
    let config = DatabaseConfig::from_env()?;
    Ok(LazyDeliveryStore::with_config(config))
}

/// Record a delivery.
///
/// # Errors
///
/// Returns an error if strict validation rejects the input or the insert fails.
pub async fn add(
    store: &impl DeliveryStore,
    part_number: &str,
    quantity: &str,
    address: &str,
    strict: bool,
) -> Result<DeliveryId, DeliveryCommandError> {
    let id = if strict {
        store
            .create_validated(part_number, quantity, address)
            .await?
    } else {
        store.create_from_input(part_number, quantity, address).await?
    };

    tracing::info!("Delivery recorded! ID: {}", id);
    Ok(id)
}

/// Print pending deliveries, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn pending(store: &impl DeliveryStore) -> Result<(), DeliveryCommandError> {
    let deliveries = store.list_pending().await?;
    print_table(&deliveries, "No pending deliveries.");
    Ok(())
}

/// Print fulfilled deliveries, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn fulfilled(store: &impl DeliveryStore) -> Result<(), DeliveryCommandError> {
    let deliveries = store.list_fulfilled().await?;
    print_table(&deliveries, "No fulfilled deliveries.");
    Ok(())
}

/// Mark a delivery fulfilled.
///
/// Unknown or already fulfilled IDs only produce a warning.
///
/// # Errors
///
/// Returns an error if the update fails.
pub async fn fulfill(
    store: &impl DeliveryStore,
    id: DeliveryId,
) -> Result<(), DeliveryCommandError> {
    if store.mark_fulfilled(id).await? {
        tracing::info!("Delivery {} marked fulfilled", id);
    } else {
        tracing::warn!("No pending delivery with ID {}; nothing changed", id);
    }
    Ok(())
}

/// Print a single delivery.
///
/// # Errors
///
/// Returns `DeliveryCommandError::NotFound` if no delivery has the ID.
pub async fn show(store: &impl DeliveryStore, id: DeliveryId) -> Result<(), DeliveryCommandError> {
    let delivery = store
        .find(id)
        .await?
        .ok_or(DeliveryCommandError::NotFound(id))?;

    #[allow(clippy::print_stdout)]
    {
        println!("ID:          {}", delivery.id);
        println!("Posted:      {}", delivery.date_posted.to_rfc3339());
        println!("Part number: {}", delivery.part_number);
        println!("Quantity:    {}", delivery.quantity);
        println!("Address:     {}", delivery.address);
        println!(
            "Status:      {}",
            if delivery.fulfilled { "fulfilled" } else { "pending" }
        );
    }
    Ok(())
}

fn format_row(delivery: &Delivery) -> String {
    format!(
        "{:>6}  {}  {:>12}  {:>8}  {}",
        delivery.id,
        delivery.date_posted.format("%Y-%m-%d %H:%M"),
        delivery.part_number,
        delivery.quantity,
        delivery.address
    )
}

#[allow(clippy::print_stdout)]
fn print_table(deliveries: &[Delivery], empty: &str) {
    if deliveries.is_empty() {
        println!("{empty}");
        return;
    }
    println!(
        "{:>6}  {:<16}  {:>12}  {:>8}  ADDRESS",
        "ID", "POSTED", "PART", "QTY"
    );
    for delivery in deliveries {
        println!("{}", format_row(delivery));
    }
}
