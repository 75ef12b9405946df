//! Effective-window resolution: intersect the branch's operating hours with
//! an employee's working hours for one calendar date.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::BookingResult;
use crate::models::schedule::{BreakInterval, WeeklySchedule};

/// The time-of-day interval actually bookable on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A resolved day: the effective window plus the breaks that apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDay {
    pub window: EffectiveWindow,
    pub branch_break: Option<BreakInterval>,
    pub employee_break: Option<BreakInterval>,
}

/// Resolves the effective open interval for `date`.
///
/// Returns `Ok(None)` — a legitimate "no availability", not an error — when
/// the branch has no entry or is closed that day, when an employee was given
/// but has no entry or is off, or when the two windows do not intersect.
/// Without an employee the branch window alone is effective (owner-operated
/// booking). Malformed entries fail with `InvalidScheduleConfiguration`
/// rather than being folded into "closed".
///
/// Times compare as `NaiveTime` values, never as strings.
pub fn resolve_window(
    date: NaiveDate,
    branch_schedule: &WeeklySchedule,
    employee_schedule: Option<&WeeklySchedule>,
) -> BookingResult<Option<ResolvedDay>> {
    let Some(branch_day) = branch_schedule.entry_for(date) else {
        return Ok(None);
    };
    branch_day.validate("branch")?;
    if !branch_day.is_open {
        return Ok(None);
    }

    let employee_day = match employee_schedule {
        Some(schedule) => {
            let Some(day) = schedule.entry_for(date) else {
                return Ok(None);
            };
            day.validate("employee")?;
            if !day.is_open {
                return Ok(None);
            }
            Some(day)
        }
        None => None,
    };

    // Most restrictive window wins on both ends.
    let start = employee_day
        .map(|d| branch_day.opens_at.max(d.opens_at))
        .unwrap_or(branch_day.opens_at);
    let end = employee_day
        .map(|d| branch_day.closes_at.min(d.closes_at))
        .unwrap_or(branch_day.closes_at);

    if start >= end {
        // Non-overlapping schedules, e.g. branch closes before the
        // employee's shift starts.
        return Ok(None);
    }

    Ok(Some(ResolvedDay {
        window: EffectiveWindow { start, end },
        branch_break: branch_day.break_interval(),
        employee_break: employee_day.and_then(|d| d.break_interval()),
    }))
}
