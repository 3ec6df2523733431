//! `PostgreSQL` delivery store.
//!
//! All statements are bound with parameters; caller data never reaches the
//! SQL text.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use delivery_tracker_core::{Delivery, DeliveryId, NewDelivery};

use super::{DeliveryStore, StoreError};

/// Delivery store backed by the `orders` table.
#[derive(Debug, Clone)]
pub struct PgDeliveryStore {
    pool: PgPool,
}

impl PgDeliveryStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryStore for PgDeliveryStore {
    async fn create(&self, delivery: NewDelivery) -> Result<DeliveryId, StoreError> {
        let id = sqlx::query_scalar::<_, DeliveryId>(
            r"
            INSERT INTO orders (date_posted, part_number, address, quantity, fulfilled)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id
            ",
        )
        .bind(Utc::now())
        .bind(delivery.part_number)
        .bind(delivery.address)
        .bind(delivery.quantity)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(delivery_id = %id, "Delivery recorded");
        Ok(id)
    }

    async fn list_pending(&self) -> Result<Vec<Delivery>, StoreError> {
        let deliveries = sqlx::query_as::<_, Delivery>(
            r"
            SELECT id, date_posted, part_number, address, quantity, fulfilled
            FROM orders
            WHERE fulfilled = FALSE
            ORDER BY date_posted ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(deliveries)
    }

    async fn list_fulfilled(&self) -> Result<Vec<Delivery>, StoreError> {
        let deliveries = sqlx::query_as::<_, Delivery>(
            r"
            SELECT id, date_posted, part_number, address, quantity, fulfilled
            FROM orders
            WHERE fulfilled = TRUE
            ORDER BY date_posted DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(deliveries)
    }

    async fn mark_fulfilled(&self, id: DeliveryId) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET fulfilled = TRUE
            WHERE id = $1 AND fulfilled = FALSE
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        if !updated {
            tracing::debug!(delivery_id = %id, "No pending delivery to mark fulfilled");
        }
        Ok(updated)
    }

    async fn find(&self, id: DeliveryId) -> Result<Option<Delivery>, StoreError> {
        let delivery = sqlx::query_as::<_, Delivery>(
            r"
            SELECT id, date_posted, part_number, address, quantity, fulfilled
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(delivery)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
