//! Delivery Tracker CLI - Database migrations and delivery management.
//!
//! # Usage
//!
//! ```bash
//! # Create the orders table
//! dt-cli migrate
//!
//! # Record a delivery
//! dt-cli deliveries add -p 4417 -q 12 -a "Dock 3, 12 Harbor Rd"
//!
//! # List pending and fulfilled deliveries
//! dt-cli deliveries pending
//! dt-cli deliveries fulfilled
//!
//! # Mark a delivery fulfilled
//! dt-cli deliveries fulfill 7
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `deliveries` - Record, list, inspect and fulfill deliveries

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use delivery_tracker_core::DeliveryId;

mod commands;

#[derive(Parser)]
#[command(name = "dt-cli")]
#[command(author, version, about = "Delivery Tracker CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage deliveries
    Deliveries {
        #[command(subcommand)]
        action: DeliveryAction,
    },
}

#[derive(Subcommand)]
enum DeliveryAction {
    /// Record a new delivery
    Add {
        /// Part number (numeric)
        #[arg(short, long)]
        part_number: String,

        /// Quantity (whole number)
        #[arg(short, long)]
        quantity: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Reject non-numeric input instead of storing 0
        #[arg(long)]
        strict: bool,
    },
    /// List pending deliveries, oldest first
    Pending,
    /// List fulfilled deliveries, newest first
    Fulfilled,
    /// Mark a delivery fulfilled
    Fulfill {
        /// Delivery ID
        id: DeliveryId,
    },
    /// Show a single delivery
    Show {
        /// Delivery ID
        id: DeliveryId,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Deliveries { action } => {
            let store = commands::deliveries::open_store()?;
            match action {
                DeliveryAction::Add {
                    part_number,
                    quantity,
                    address,
                    strict,
                } => {
                    commands::deliveries::add(&store, &part_number, &quantity, &address, strict)
                        .await?;
                }
                DeliveryAction::Pending => commands::deliveries::pending(&store).await?,
                DeliveryAction::Fulfilled => commands::deliveries::fulfilled(&store).await?,
                DeliveryAction::Fulfill { id } => commands::deliveries::fulfill(&store, id).await?,
                DeliveryAction::Show { id } => commands::deliveries::show(&store, id).await?,
            }
        }
    }
    Ok(())
}
