//! Core types for the delivery tracker.
//!
//! This module provides type-safe wrappers for the delivery domain.

pub mod address;
pub mod delivery;
pub mod id;
pub mod input;

pub use address::{Address, escape_markup};
pub use delivery::{Delivery, NewDelivery};
pub use id::*;
pub use input::{InputError, PartNumber, Quantity, is_numeric};
