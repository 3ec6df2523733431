//! In-memory delivery store for tests.
//!
//! Mirrors the `PostgreSQL` backend's ordering and no-op rules. Nothing
//! survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use delivery_tracker_core::{Delivery, DeliveryId, NewDelivery};

use super::{DeliveryStore, StoreError};

#[derive(Debug, Default)]
struct Rows {
    deliveries: Vec<Delivery>,
    last_id: i32,
}

/// In-memory implementation of [`DeliveryStore`].
#[derive(Debug, Default)]
pub struct MemoryDeliveryStore {
    rows: RwLock<Rows>,
}

impl MemoryDeliveryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed record (for test setup).
    ///
    /// Keeps the ID sequence ahead of any inserted ID so created rows never
    /// reuse one.
    pub async fn insert(&self, delivery: Delivery) {
        let mut rows = self.rows.write().await;
        rows.last_id = rows.last_id.max(delivery.id.as_i32());
        rows.deliveries.push(delivery);
    }

    /// Number of stored deliveries.
    pub async fn len(&self) -> usize {
        self.rows.read().await.deliveries.len()
    }

    /// Whether the store holds no deliveries.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.deliveries.is_empty()
    }
}

#[async_trait]
impl DeliveryStore for MemoryDeliveryStore {
    async fn create(&self, delivery: NewDelivery) -> Result<DeliveryId, StoreError> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let id = DeliveryId::new(rows.last_id);
        rows.deliveries.push(Delivery {
            id,
            date_posted: Utc::now(),
            part_number: delivery.part_number,
            address: delivery.address,
            quantity: delivery.quantity,
            fulfilled: false,
        });
        Ok(id)
    }

    async fn list_pending(&self) -> Result<Vec<Delivery>, StoreError> {
        let rows = self.rows.read().await;
        let mut pending: Vec<Delivery> = rows
            .deliveries
            .iter()
            .filter(|d| !d.fulfilled)
            .cloned()
            .collect();
        pending.sort_by(|a, b| (a.date_posted, a.id).cmp(&(b.date_posted, b.id)));
        Ok(pending)
    }

    async fn list_fulfilled(&self) -> Result<Vec<Delivery>, StoreError> {
        let rows = self.rows.read().await;
        let mut fulfilled: Vec<Delivery> = rows
            .deliveries
            .iter()
            .filter(|d| d.fulfilled)
            .cloned()
            .collect();
        fulfilled.sort_by(|a, b| (b.date_posted, b.id).cmp(&(a.date_posted, a.id)));
        Ok(fulfilled)
    }

    async fn mark_fulfilled(&self, id: DeliveryId) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        let Some(delivery) = rows
            .deliveries
            .iter_mut()
            .find(|d| d.id == id && !d.fulfilled)
        else {
            return Ok(false);
        };
        delivery.fulfilled = true;
        Ok(true)
    }

    async fn find(&self, id: DeliveryId) -> Result<Option<Delivery>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.deliveries.iter().find(|d| d.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
