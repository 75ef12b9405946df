//! # Availability Handlers
//!
//! Handlers for the two engine entry points: computing the bookable slot
//! list for a date and validating one proposed slot. Both assemble an
//! immutable snapshot (schedules, service, occupancy) from the repositories
//! and hand it to the pure pipeline in `slotwise-core`.
//!
//! ## Snapshot assembly
//!
//! 1. Fetch the service and its branch set; reject requests for services
//!    not offered at the branch.
//! 2. Fetch the branch's weekly hours, and the employee's when one is named
//!    (after checking the employee exists and works at that branch).
//! 3. Select the occupancy scope: employee-scoped when an employee is
//!    named, branch-wide otherwise — the owner-operated model means ANY
//!    appointment at the branch blocks the owner, so the branch query
//!    deliberately carries no employee filter.
//! 4. Load occupancy and run the engine.
//!
//! The computed list is advisory: it can go stale between read and booking.
//! The write path in `handlers::appointment` re-validates inside its
//! transaction.

use axum::{extract::State, Json};
use std::sync::Arc;

use slotwise_core::engine::{self, AvailabilitySnapshot};
use slotwise_core::errors::BookingError;
use slotwise_core::models::{
    appointment::ExistingAppointment,
    availability::{
        AvailabilityRequest, AvailabilityResponse, OccupancyScope, SlotValidation,
        ValidateSlotRequest,
    },
    schedule::WeeklySchedule,
    service::ServiceDefinition,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// The owned data an engine call borrows from.
pub(crate) struct SnapshotParts {
    pub branch_schedule: WeeklySchedule,
    pub employee_schedule: Option<WeeklySchedule>,
    pub service: ServiceDefinition,
    pub occupancy: Vec<ExistingAppointment>,
}

impl SnapshotParts {
    pub fn as_snapshot<'a>(&'a self, request: &AvailabilityRequest) -> AvailabilitySnapshot<'a> {
        AvailabilitySnapshot {
            date: request.date,
            branch_schedule: &self.branch_schedule,
            employee_schedule: self.employee_schedule.as_ref(),
            service: &self.service,
            occupancy: &self.occupancy,
            granularity_minutes: request.granularity_minutes,
        }
    }
}

/// Fetches the schedule-side inputs: service, branch hours, employee hours.
///
/// Occupancy is left empty so the caller decides where it comes from — the
/// read path loads it through the pool, the booking write path loads it
/// inside the transaction that commits the appointment.
pub(crate) async fn load_schedule_context(
    state: &ApiState,
    request: &AvailabilityRequest,
) -> Result<SnapshotParts, AppError> {
    // Service lookup and branch-offering check
    let db_service = slotwise_db::repositories::service::get_service_by_id(
        &state.db_pool,
        request.service_id,
    )
    .await?
    .ok_or_else(|| {
        AppError(BookingError::NotFound(format!(
            "Service with ID {} not found",
            request.service_id
        )))
    })?;
    let branch_ids = slotwise_db::repositories::service::get_service_branch_ids(
        &state.db_pool,
        request.service_id,
    )
    .await?;
    let service = slotwise_db::models::into_service_definition(db_service, branch_ids);
    if !service.offered_at(request.branch_id) {
        return Err(AppError(BookingError::Validation(format!(
            "Service {} is not offered at branch {}",
            request.service_id, request.branch_id
        ))));
    }

    // Branch hours
    let branch_rows =
        slotwise_db::repositories::schedule::get_branch_week(&state.db_pool, request.branch_id)
            .await?;
    let branch_schedule = slotwise_db::models::into_weekly_schedule(branch_rows);

    // Employee hours, when an employee is named
    let employee_schedule = match request.employee_id {
        Some(employee_id) => {
            let employee = slotwise_db::repositories::schedule::get_employee_by_id(
                &state.db_pool,
                employee_id,
            )
            .await?
            .ok_or_else(|| {
                AppError(BookingError::NotFound(format!(
                    "Employee with ID {employee_id} not found"
                )))
            })?;
            if employee.branch_id != request.branch_id {
                return Err(AppError(BookingError::Validation(format!(
                    "Employee {} does not work at branch {}",
                    employee_id, request.branch_id
                ))));
            }
            let rows = slotwise_db::repositories::schedule::get_employee_week(
                &state.db_pool,
                employee_id,
            )
            .await?;
            Some(slotwise_db::models::into_weekly_schedule(rows))
        }
        None => None,
    };

    Ok(SnapshotParts {
        branch_schedule,
        employee_schedule,
        service,
        occupancy: Vec::new(),
    })
}

/// Fetches everything one read-path availability computation needs,
/// occupancy included, at the scope the staffing model dictates.
pub(crate) async fn load_snapshot_parts(
    state: &ApiState,
    request: &AvailabilityRequest,
) -> Result<SnapshotParts, AppError> {
    let mut parts = load_schedule_context(state, request).await?;

    let scope = OccupancyScope::for_request(request.branch_id, request.employee_id);
    let occupancy_rows =
        slotwise_db::repositories::appointment::find_occupancy(&state.db_pool, &scope, request.date)
            .await?;
    parts.occupancy = occupancy_rows.into_iter().map(Into::into).collect();

    Ok(parts)
}

/// Computes the bookable slot list for one date
///
/// # Endpoint
///
/// ```text
/// POST /api/availability/compute
/// ```
///
/// Returns every candidate slot in ascending start order, tagged available
/// or not. A closed day or an empty window intersection is a 200 with an
/// empty list — only broken configuration or failed fetches produce errors.
#[axum::debug_handler]
pub async fn compute_availability(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let parts = load_snapshot_parts(&state, &request).await?;
    let slots = engine::compute_availability(&parts.as_snapshot(&request))?;

    Ok(Json(AvailabilityResponse {
        date: request.date,
        branch_id: request.branch_id,
        employee_id: request.employee_id,
        slots,
    }))
}

/// Validates one proposed slot
///
/// # Endpoint
///
/// ```text
/// POST /api/availability/validate
/// ```
///
/// The narrow re-check intended for submission time. A conflicting proposal
/// is a 200 with `{ok: false, reason}` — the slot being taken is an answer,
/// not a failure. Note this endpoint reads a fresh snapshot but takes no
/// lock; the transactional re-check in the booking handlers is what
/// guarantees at-most-one committed appointment per interval.
#[axum::debug_handler]
pub async fn validate_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ValidateSlotRequest>,
) -> Result<Json<SlotValidation>, AppError> {
    let parts = load_snapshot_parts(&state, &payload.request).await?;
    let verdict = engine::validate_slot(
        &parts.as_snapshot(&payload.request),
        payload.proposed_start,
        payload.proposed_end,
        payload.exclude_appointment_id,
    )?;

    Ok(Json(verdict))
}
