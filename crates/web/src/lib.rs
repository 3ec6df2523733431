//! Delivery Tracker web library.
//!
//! The delivery store (`db`) and the dispatch board that sits on top of it
//! (`routes`). Both the web binary and the CLI build on this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod routes;
pub mod state;
