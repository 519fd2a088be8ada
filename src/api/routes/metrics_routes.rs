//! Metrics routes (e.g., /api/v1/circles/*)

use axum::{routing::get, Router};

use crate::api::controller::metric::circle::CircleMetricsController;
use crate::app_state::AppState;

/// Build the router for circle metric endpoints under /api/v1
pub fn metrics_routes() -> Router<AppState> {
    Router::new().route(
        "/circles/{circle_id}/components/metrics",
        get(CircleMetricsController::get_circle_components_metrics),
    )
}
