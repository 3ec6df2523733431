//! Delivery Tracker Core - Shared domain types.
//!
//! This crate provides the types used across all delivery tracker components:
//! - `web` - Dispatch board and the delivery store
//! - `cli` - Command-line tools for migrations and store access
//!
//! # Architecture
//!
//! The core crate contains only types and input normalization - no I/O, no
//! database access. Enabling the `postgres` feature adds sqlx encode/decode
//! support for the newtypes so the store can bind and read them directly.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, part numbers, quantities, escaped addresses and
//!   the delivery record itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
