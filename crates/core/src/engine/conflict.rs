//! Conflict evaluation for one candidate slot against breaks and occupancy.

use chrono::NaiveTime;
use uuid::Uuid;

use super::interval::overlaps;
use crate::models::appointment::ExistingAppointment;
use crate::models::availability::ConflictReason;
use crate::models::schedule::BreakInterval;

/// Whether a slot falls into a configured break.
pub fn is_within_break(
    slot_start: NaiveTime,
    slot_end: NaiveTime,
    break_interval: BreakInterval,
) -> bool {
    overlaps(slot_start, slot_end, break_interval.start, break_interval.end)
}

/// Evaluates one candidate against occupancy and breaks.
///
/// Returns the first conflict found, or `None` when the slot is free:
/// - any record that still blocks time (cancelled ones never do) and
///   overlaps the candidate by the record's OWN stored interval → `Occupied`;
/// - overlap with the branch break or the employee break → `Break`.
///
/// `exclude_appointment_id` drops one record from the conflict set. The edit
/// flow passes the appointment being rescheduled so it does not conflict
/// with itself; the create flow passes `None`.
pub fn evaluate(
    slot_start: NaiveTime,
    slot_end: NaiveTime,
    occupancy: &[ExistingAppointment],
    branch_break: Option<BreakInterval>,
    employee_break: Option<BreakInterval>,
    exclude_appointment_id: Option<Uuid>,
) -> Option<ConflictReason> {
    let occupied = occupancy
        .iter()
        .filter(|appt| appt.blocks_time())
        .filter(|appt| Some(appt.id) != exclude_appointment_id)
        .any(|appt| overlaps(slot_start, slot_end, appt.start_time, appt.end_time));
    if occupied {
        return Some(ConflictReason::Occupied);
    }

    // Branch and employee breaks are independent; either rejects.
    for brk in [branch_break, employee_break].into_iter().flatten() {
        if is_within_break(slot_start, slot_end, brk) {
            return Some(ConflictReason::Break);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::AppointmentStatus;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn appt(start: NaiveTime, end: NaiveTime, status: AppointmentStatus) -> ExistingAppointment {
        ExistingAppointment {
            id: Uuid::new_v4(),
            start_time: start,
            end_time: end,
            status,
        }
    }

    #[test]
    fn occupied_wins_over_free() {
        let occupancy = vec![appt(t(10, 0), t(11, 0), AppointmentStatus::Confirmed)];
        let conflict = evaluate(t(10, 30), t(11, 30), &occupancy, None, None, None);
        assert_eq!(conflict, Some(ConflictReason::Occupied));
    }

    #[test]
    fn cancelled_appointments_never_block() {
        let occupancy = vec![appt(t(10, 0), t(11, 0), AppointmentStatus::Cancelled)];
        let conflict = evaluate(t(10, 0), t(11, 0), &occupancy, None, None, None);
        assert_eq!(conflict, None);
    }

    #[test]
    fn blocking_uses_the_records_own_interval() {
        // A 3-hour appointment blocks a 30-minute candidate in its middle.
        let occupancy = vec![appt(t(9, 0), t(12, 0), AppointmentStatus::Pending)];
        let conflict = evaluate(t(10, 0), t(10, 30), &occupancy, None, None, None);
        assert_eq!(conflict, Some(ConflictReason::Occupied));
    }

    #[test]
    fn excluded_appointment_does_not_conflict_with_itself() {
        let existing = appt(t(10, 0), t(11, 0), AppointmentStatus::Confirmed);
        let id = existing.id;
        let conflict = evaluate(t(10, 0), t(11, 0), &[existing], None, None, Some(id));
        assert_eq!(conflict, None);
    }

    #[test]
    fn either_break_rejects() {
        let branch_break = BreakInterval { start: t(13, 0), end: t(14, 0) };
        let employee_break = BreakInterval { start: t(16, 0), end: t(16, 30) };

        let conflict = evaluate(t(13, 30), t(14, 30), &[], Some(branch_break), Some(employee_break), None);
        assert_eq!(conflict, Some(ConflictReason::Break));

        let conflict = evaluate(t(15, 45), t(16, 45), &[], Some(branch_break), Some(employee_break), None);
        assert_eq!(conflict, Some(ConflictReason::Break));
    }

    #[test]
    fn back_to_back_with_break_is_free() {
        let branch_break = BreakInterval { start: t(13, 0), end: t(14, 0) };
        let conflict = evaluate(t(12, 0), t(13, 0), &[], Some(branch_break), None, None);
        assert_eq!(conflict, None);
    }
}
