//! Delivery record types.
//!
//! [`Delivery`] mirrors a row of the `orders` table. [`NewDelivery`] is the
//! normalized input for creating one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::address::Address;
use super::id::DeliveryId;
use super::input::{InputError, PartNumber, Quantity};

/// A part delivery and its fulfillment state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Delivery {
    /// Row ID, assigned by the store.
    pub id: DeliveryId,
    /// When the delivery was recorded. Never changes.
    pub date_posted: DateTime<Utc>,
    /// Part being delivered.
    pub part_number: PartNumber,
    /// Destination, escaped.
    pub address: Address,
    /// Number of parts.
    pub quantity: Quantity,
    /// Whether the delivery has been completed.
    pub fulfilled: bool,
}

impl Delivery {
    /// Whether the delivery is still waiting to go out.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.fulfilled
    }
}

/// Normalized input for a new delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDelivery {
    pub part_number: PartNumber,
    pub quantity: Quantity,
    pub address: Address,
}

impl NewDelivery {
    /// Build a delivery from raw input, replacing non-numeric part numbers
    /// and quantities with `0` and escaping the address.
    ///
    /// ```
    /// use delivery_tracker_core::NewDelivery;
    ///
    /// let new = NewDelivery::coerce("abc", "xyz", "X");
    /// assert_eq!(new.part_number.as_str(), "0");
    /// assert_eq!(new.quantity.get(), 0);
    /// ```
    #[must_use]
    pub fn coerce(part_number: &str, quantity: &str, address: &str) -> Self {
        Self {
            part_number: PartNumber::coerce(part_number),
            quantity: Quantity::coerce(quantity),
            address: Address::escape(address),
        }
    }

    /// Build a delivery from raw input, rejecting anything malformed.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] found, checking part number, then
    /// quantity, then address.
    pub fn validate(part_number: &str, quantity: &str, address: &str) -> Result<Self, InputError> {
        Ok(Self {
            part_number: PartNumber::parse(part_number)?,
            quantity: Quantity::parse(quantity)?,
            address: Address::parse(address)?,
        })
    }
}
