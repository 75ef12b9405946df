//! # Appointment Handlers
//!
//! The write boundary. Availability lists are advisory — two clients can
//! both see a slot as free before either books it — so the create and
//! reschedule handlers re-validate the proposed slot against occupancy
//! loaded INSIDE the same database transaction that inserts or updates the
//! row. That re-check is what enforces at-most-one committed appointment
//! per overlapping interval for an employee (or branch, in the
//! owner-operated model).
//!
//! A losing race returns 409 with the conflict reason; the client re-runs
//! the availability computation and picks another slot.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use slotwise_core::engine;
use slotwise_core::errors::BookingError;
use slotwise_core::models::{
    appointment::{
        AppointmentResponse, CreateAppointmentRequest, RescheduleAppointmentRequest,
    },
    availability::{AvailabilityRequest, ConflictReason, OccupancyScope, SlotValidation},
};

use crate::handlers::availability::load_schedule_context;
use crate::{middleware::error_handling::AppError, ApiState};

fn to_response(row: slotwise_db::models::DbAppointment) -> AppointmentResponse {
    AppointmentResponse {
        id: row.id,
        branch_id: row.branch_id,
        employee_id: row.employee_id,
        service_id: row.service_id,
        date: row.scheduled_on,
        start_time: row.start_time,
        end_time: row.end_time,
        status: slotwise_db::models::parse_status(&row.status),
    }
}

fn conflict_response(reason: ConflictReason) -> Response {
    (
        StatusCode::CONFLICT,
        Json(SlotValidation::conflict(reason)),
    )
        .into_response()
}

/// Books an appointment
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// The slot end is derived from the service duration. The proposed slot is
/// validated against occupancy loaded inside the insert transaction; a
/// conflict aborts with 409 and `{ok: false, reason}`.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Response, AppError> {
    let request = AvailabilityRequest {
        date: payload.date,
        branch_id: payload.branch_id,
        service_id: payload.service_id,
        employee_id: payload.employee_id,
        granularity_minutes: 15,
    };
    let mut parts = load_schedule_context(&state, &request).await?;

    let duration = Duration::minutes(i64::from(parts.service.duration_minutes));
    let (end_time, wrapped) = payload.start_time.overflowing_add_signed(duration);
    if wrapped != 0 {
        // Slot would spill past midnight; no window can contain it.
        return Ok(conflict_response(ConflictReason::OutsideHours));
    }

    let mut tx = state.db_pool.begin().await.map_err(eyre::Report::from)?;

    let scope = OccupancyScope::for_request(payload.branch_id, payload.employee_id);
    let occupancy_rows =
        slotwise_db::repositories::appointment::find_occupancy(&mut *tx, &scope, payload.date)
            .await?;
    parts.occupancy = occupancy_rows.into_iter().map(Into::into).collect();

    let verdict = engine::validate_slot(
        &parts.as_snapshot(&request),
        payload.start_time,
        end_time,
        None,
    )?;
    if let Some(reason) = verdict.reason {
        tx.rollback().await.map_err(eyre::Report::from)?;
        return Ok(conflict_response(reason));
    }

    let appointment = slotwise_db::repositories::appointment::create_appointment(
        &mut *tx,
        payload.branch_id,
        payload.employee_id,
        payload.service_id,
        payload.date,
        payload.start_time,
        end_time,
    )
    .await?;

    tx.commit().await.map_err(eyre::Report::from)?;

    Ok((StatusCode::CREATED, Json(to_response(appointment))).into_response())
}

/// Reschedules an existing appointment
///
/// # Endpoint
///
/// ```text
/// PUT /api/appointments/{id}
/// ```
///
/// The edit path: the appointment being moved is excluded from its own
/// conflict set, so re-confirming the current slot (or shifting within it)
/// succeeds. Everything else matches the create path, including the
/// in-transaction re-validation.
#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleAppointmentRequest>,
) -> Result<Response, AppError> {
    let existing =
        slotwise_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
            .await?
            .ok_or_else(|| {
                AppError(BookingError::NotFound(format!(
                    "Appointment with ID {id} not found"
                )))
            })?;

    let request = AvailabilityRequest {
        date: payload.date,
        branch_id: existing.branch_id,
        service_id: existing.service_id,
        employee_id: existing.employee_id,
        granularity_minutes: 15,
    };
    let mut parts = load_schedule_context(&state, &request).await?;

    let duration = Duration::minutes(i64::from(parts.service.duration_minutes));
    let (end_time, wrapped) = payload.start_time.overflowing_add_signed(duration);
    if wrapped != 0 {
        return Ok(conflict_response(ConflictReason::OutsideHours));
    }

    let mut tx = state.db_pool.begin().await.map_err(eyre::Report::from)?;

    let scope = OccupancyScope::for_request(existing.branch_id, existing.employee_id);
    let occupancy_rows =
        slotwise_db::repositories::appointment::find_occupancy(&mut *tx, &scope, payload.date)
            .await?;
    parts.occupancy = occupancy_rows.into_iter().map(Into::into).collect();

    let verdict = engine::validate_slot(
        &parts.as_snapshot(&request),
        payload.start_time,
        end_time,
        Some(id),
    )?;
    if let Some(reason) = verdict.reason {
        tx.rollback().await.map_err(eyre::Report::from)?;
        return Ok(conflict_response(reason));
    }

    let appointment = slotwise_db::repositories::appointment::update_appointment_times(
        &mut *tx,
        id,
        payload.date,
        payload.start_time,
        end_time,
    )
    .await?;

    tx.commit().await.map_err(eyre::Report::from)?;

    Ok(Json(to_response(appointment)).into_response())
}

/// Cancels an appointment
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments/{id}/cancel
/// ```
///
/// Cancelled appointments stop blocking time immediately; the freed slot
/// shows up in the next availability computation.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    slotwise_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| {
            AppError(BookingError::NotFound(format!(
                "Appointment with ID {id} not found"
            )))
        })?;

    let appointment = slotwise_db::repositories::appointment::update_appointment_status(
        &state.db_pool,
        id,
        "CANCELLED",
    )
    .await?;

    Ok(Json(to_response(appointment)))
}
