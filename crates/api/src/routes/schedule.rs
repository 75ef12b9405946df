use axum::{routing::put, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/branches/:id/hours",
            put(handlers::schedule::upsert_branch_hours),
        )
        .route(
            "/api/employees/:id/hours",
            put(handlers::schedule::upsert_employee_hours),
        )
}
