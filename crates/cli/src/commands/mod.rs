//! CLI subcommands.

pub mod deliveries;
pub mod migrate;
