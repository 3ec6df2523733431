//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (store round trip)
//!
//! GET  /                         - Redirect to /deliveries
//! GET  /deliveries               - Pending deliveries, oldest first, with the entry form
//! POST /deliveries               - Record a delivery
//! GET  /deliveries/fulfilled     - Fulfilled deliveries, newest first
//! POST /deliveries/{id}/fulfill  - Mark a delivery fulfilled
//! ```

pub mod deliveries;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .with_state(state)
}

/// Create the delivery routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(deliveries::index))
        .route(
            "/deliveries",
            get(deliveries::pending).post(deliveries::create),
        )
        .route("/deliveries/fulfilled", get(deliveries::fulfilled))
        .route("/deliveries/{id}/fulfill", post(deliveries::fulfill))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Runs a round trip against the delivery store, which also forces the
/// first connection. Returns 503 Service Unavailable if the store is not
/// reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::db::{LazyDeliveryStore, MemoryDeliveryStore};

    #[tokio::test]
    async fn test_health() {
        let app = router(AppState::new(Arc::new(MemoryDeliveryStore::new()), false));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_ok() {
        let app = router(AppState::new(Arc::new(MemoryDeliveryStore::new()), false));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_unavailable_without_store() {
        let app = router(AppState::new(Arc::new(LazyDeliveryStore::new()), false));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
