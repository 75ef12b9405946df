//! # Schedule Settings Handlers
//!
//! The business-owner settings flow: one weekly-hours entry per day per
//! branch or employee. Entries are validated with the same invariants the
//! engine enforces, so broken configuration (inverted hours, break outside
//! open hours) is rejected at write time with a 422 instead of surfacing
//! later on every availability request.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use slotwise_core::errors::BookingError;
use slotwise_core::models::schedule::WeeklyScheduleEntry;

use crate::{middleware::error_handling::AppError, ApiState};

/// Sets a branch's operating hours for one weekday
///
/// # Endpoint
///
/// ```text
/// PUT /api/branches/{id}/hours
/// ```
#[axum::debug_handler]
pub async fn upsert_branch_hours(
    State(state): State<Arc<ApiState>>,
    Path(branch_id): Path<Uuid>,
    Json(entry): Json<WeeklyScheduleEntry>,
) -> Result<Json<WeeklyScheduleEntry>, AppError> {
    if entry.day_of_week > 6 {
        return Err(AppError(BookingError::Validation(
            "day_of_week must be 0..=6 (Sunday=0)".to_string(),
        )));
    }
    entry.validate("branch")?;

    let row = slotwise_db::repositories::schedule::upsert_branch_day(
        &state.db_pool,
        branch_id,
        i16::from(entry.day_of_week),
        entry.is_open,
        entry.opens_at,
        entry.closes_at,
        entry.break_start,
        entry.break_end,
    )
    .await?;

    Ok(Json(row.into()))
}

/// Sets an employee's working hours for one weekday
///
/// # Endpoint
///
/// ```text
/// PUT /api/employees/{id}/hours
/// ```
#[axum::debug_handler]
pub async fn upsert_employee_hours(
    State(state): State<Arc<ApiState>>,
    Path(employee_id): Path<Uuid>,
    Json(entry): Json<WeeklyScheduleEntry>,
) -> Result<Json<WeeklyScheduleEntry>, AppError> {
    if entry.day_of_week > 6 {
        return Err(AppError(BookingError::Validation(
            "day_of_week must be 0..=6 (Sunday=0)".to_string(),
        )));
    }
    entry.validate("employee")?;

    slotwise_db::repositories::schedule::get_employee_by_id(&state.db_pool, employee_id)
        .await?
        .ok_or_else(|| {
            AppError(BookingError::NotFound(format!(
                "Employee with ID {employee_id} not found"
            )))
        })?;

    let row = slotwise_db::repositories::schedule::upsert_employee_day(
        &state.db_pool,
        employee_id,
        i16::from(entry.day_of_week),
        entry.is_open,
        entry.opens_at,
        entry.closes_at,
        entry.break_start,
        entry.break_end,
    )
    .await?;

    Ok(Json(row.into()))
}
