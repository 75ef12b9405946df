use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability/compute",
            post(handlers::availability::compute_availability),
        )
        .route(
            "/api/availability/validate",
            post(handlers::availability::validate_slot),
        )
}
