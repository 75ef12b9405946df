//! # Availability Engine
//!
//! The deterministic pipeline that turns schedules, a service, and an
//! occupancy snapshot into bookable slots:
//!
//! 1. Resolve the effective window (branch ∩ employee hours) — [`window`]
//! 2. Generate duration-aware candidates at a fixed step — [`slots`]
//! 3. Evaluate each candidate against occupancy and breaks — [`conflict`]
//!
//! Every conflict test, break or appointment, goes through the single
//! half-open overlap predicate in [`interval`].
//!
//! ## Concurrency contract
//!
//! The engine is pure and stateless: each call works on an immutable
//! snapshot fetched by the caller and holds no locks. Two concurrent booking
//! attempts can therefore both see an "available" slot before either
//! commits. The availability list is a hint, not a reservation — the actual
//! at-most-one-committed-appointment guarantee belongs to the write
//! boundary, which must call [`validate_slot`] again on a fresh snapshot
//! inside the same database transaction that inserts or updates the
//! appointment.

pub mod conflict;
pub mod interval;
pub mod slots;
pub mod window;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::ExistingAppointment;
use crate::models::availability::{CandidateSlot, ConflictReason, SlotValidation};
use crate::models::schedule::WeeklySchedule;
use crate::models::service::ServiceDefinition;

pub use window::{EffectiveWindow, ResolvedDay};

/// Everything one availability computation reads, fetched up front by the
/// caller. Occupancy may contain cancelled records; the engine filters them.
#[derive(Debug, Clone)]
pub struct AvailabilitySnapshot<'a> {
    pub date: NaiveDate,
    pub branch_schedule: &'a WeeklySchedule,
    pub employee_schedule: Option<&'a WeeklySchedule>,
    pub service: &'a ServiceDefinition,
    pub occupancy: &'a [ExistingAppointment],
    pub granularity_minutes: u32,
}

/// Computes the ordered candidate list for one date, each slot tagged
/// available or not.
///
/// A closed day, an empty window intersection, or a fully booked window all
/// return `Ok` with an empty or all-unavailable list; errors are reserved
/// for malformed schedule or service configuration. Identical inputs yield
/// identical, order-preserved output.
pub fn compute_availability(
    snapshot: &AvailabilitySnapshot<'_>,
) -> BookingResult<Vec<CandidateSlot>> {
    snapshot.service.validate()?;
    if snapshot.granularity_minutes == 0 {
        return Err(BookingError::Validation(
            "granularity_minutes must be positive".to_string(),
        ));
    }

    let Some(day) = window::resolve_window(
        snapshot.date,
        snapshot.branch_schedule,
        snapshot.employee_schedule,
    )?
    else {
        debug!(date = %snapshot.date, "no effective window, returning empty availability");
        return Ok(Vec::new());
    };
    debug!(
        date = %snapshot.date,
        window_start = %day.window.start,
        window_end = %day.window.end,
        "resolved effective window"
    );

    let blocking = snapshot.occupancy.iter().filter(|a| a.blocks_time()).count();
    debug!(
        total = snapshot.occupancy.len(),
        blocking,
        "loaded occupancy snapshot"
    );

    let candidates = slots::generate_slots(
        day.window,
        snapshot.service.duration_minutes,
        snapshot.granularity_minutes,
    );
    debug!(count = candidates.len(), "generated candidate slots");

    let evaluated: Vec<CandidateSlot> = candidates
        .into_iter()
        .map(|(start_time, end_time)| {
            let conflict = conflict::evaluate(
                start_time,
                end_time,
                snapshot.occupancy,
                day.branch_break,
                day.employee_break,
                None,
            );
            CandidateSlot {
                start_time,
                end_time,
                available: conflict.is_none(),
            }
        })
        .collect();

    let available = evaluated.iter().filter(|s| s.available).count();
    debug!(
        total = evaluated.len(),
        available,
        "evaluated candidate slots"
    );

    Ok(evaluated)
}

/// Re-checks one proposed slot, the narrow entry point for the write
/// boundary.
///
/// `exclude_appointment_id` is mandatory on the update path: an appointment
/// being rescheduled must not conflict with its own current interval.
///
/// Verdicts, in precedence order:
/// - `OUTSIDE_HOURS` — no effective window that day, or the slot is not
///   fully inside it;
/// - `OCCUPIED` / `BREAK` — conflict evaluation of that exact interval.
pub fn validate_slot(
    snapshot: &AvailabilitySnapshot<'_>,
    proposed_start: NaiveTime,
    proposed_end: NaiveTime,
    exclude_appointment_id: Option<Uuid>,
) -> BookingResult<SlotValidation> {
    snapshot.service.validate()?;

    let Some(day) = window::resolve_window(
        snapshot.date,
        snapshot.branch_schedule,
        snapshot.employee_schedule,
    )?
    else {
        debug!(date = %snapshot.date, "validation rejected: no effective window");
        return Ok(SlotValidation::conflict(ConflictReason::OutsideHours));
    };

    if proposed_start >= proposed_end
        || proposed_start < day.window.start
        || proposed_end > day.window.end
    {
        debug!(
            start = %proposed_start,
            end = %proposed_end,
            "validation rejected: slot outside effective window"
        );
        return Ok(SlotValidation::conflict(ConflictReason::OutsideHours));
    }

    let verdict = match conflict::evaluate(
        proposed_start,
        proposed_end,
        snapshot.occupancy,
        day.branch_break,
        day.employee_break,
        exclude_appointment_id,
    ) {
        Some(reason) => SlotValidation::conflict(reason),
        None => SlotValidation::ok(),
    };
    debug!(start = %proposed_start, end = %proposed_end, ok = verdict.ok, "validated proposed slot");

    Ok(verdict)
}
