//! Delivery route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use delivery_tracker_core::{Delivery, DeliveryId};

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Delivery view for templates.
///
/// `address` is already escaped by the store, so templates emit it with
/// `|safe`. Every other field goes through normal escaping.
#[derive(Debug, Clone)]
pub struct DeliveryView {
    pub id: i32,
    pub part_number: String,
    pub quantity: i32,
    pub address: String,
    pub posted_at: String,
}

impl From<&Delivery> for DeliveryView {
    fn from(delivery: &Delivery) -> Self {
        Self {
            id: delivery.id.as_i32(),
            part_number: delivery.part_number.to_string(),
            quantity: delivery.quantity.get(),
            address: delivery.address.to_string(),
            posted_at: delivery.date_posted.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Pending deliveries page template.
#[derive(Template, WebTemplate)]
#[template(path = "deliveries/pending.html")]
pub struct PendingTemplate {
    pub current_path: String,
    pub deliveries: Vec<DeliveryView>,
    /// Show the numbers-only hint on the entry form.
    pub strict_input: bool,
}

/// Fulfilled deliveries page template.
#[derive(Template, WebTemplate)]
#[template(path = "deliveries/fulfilled.html")]
pub struct FulfilledTemplate {
    pub current_path: String,
    pub deliveries: Vec<DeliveryView>,
}

/// Form input for recording a delivery.
///
/// Fields are raw text; a missing field reads as empty and is coerced (or
/// rejected, in strict mode) like any other bad value.
#[derive(Debug, Deserialize)]
pub struct CreateDeliveryInput {
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub address: String,
}

/// Send the root URL to the pending list.
pub async fn index() -> Redirect {
    Redirect::to("/deliveries")
}

/// Pending deliveries, oldest first.
///
/// # Errors
///
/// Returns 500 if the store query fails.
#[instrument(skip(state))]
pub async fn pending(State(state): State<AppState>) -> Result<PendingTemplate> {
    let deliveries = state.store().list_pending().await?;

    Ok(PendingTemplate {
        current_path: "/deliveries".to_string(),
        deliveries: deliveries.iter().map(DeliveryView::from).collect(),
        strict_input: state.strict_input(),
    })
}

/// Fulfilled deliveries, newest first.
///
/// # Errors
///
/// Returns 500 if the store query fails.
#[instrument(skip(state))]
pub async fn fulfilled(State(state): State<AppState>) -> Result<FulfilledTemplate> {
    let deliveries = state.store().list_fulfilled().await?;

    Ok(FulfilledTemplate {
        current_path: "/deliveries/fulfilled".to_string(),
        deliveries: deliveries.iter().map(DeliveryView::from).collect(),
    })
}

/// Record a delivery and return to the pending list.
///
/// # Errors
///
/// Returns 400 for rejected input in strict mode, 500 if the insert fails.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Form(input): Form<CreateDeliveryInput>,
) -> Result<Redirect> {
    let store = state.store();
    let id = if state.strict_input() {
        store
            .create_validated(&input.part_number, &input.quantity, &input.address)
            .await?
    } else {
        store
            .create_from_input(&input.part_number, &input.quantity, &input.address)
            .await?
    };

    tracing::info!(delivery_id = %id, "Delivery recorded");
    Ok(Redirect::to("/deliveries"))
}

/// Mark a delivery fulfilled and return to the pending list.
///
/// Unknown or already fulfilled IDs are ignored.
///
/// # Errors
///
/// Returns 500 if the update fails.
#[instrument(skip(state))]
pub async fn fulfill(
    State(state): State<AppState>,
    Path(id): Path<DeliveryId>,
) -> Result<Redirect> {
    if state.store().mark_fulfilled(id).await? {
        tracing::info!(delivery_id = %id, "Delivery fulfilled");
    } else {
        tracing::warn!(delivery_id = %id, "No pending delivery to fulfill");
    }
    Ok(Redirect::to("/deliveries"))
}
