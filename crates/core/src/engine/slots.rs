//! Candidate slot enumeration across an effective window.

use chrono::{Duration, NaiveTime};

use super::window::EffectiveWindow;

/// Enumerates candidate `(start, end)` pairs across the window.
///
/// Starts at `window.start` and steps forward by `step_minutes` while the
/// slot still ends within the window (`start + duration <= window.end`).
/// Ascending order by start time is a contract, not an accident — the
/// booking UI renders the list as returned.
///
/// A duration longer than the window yields an empty vec, which is a valid
/// silent result.
pub fn generate_slots(
    window: EffectiveWindow,
    duration_minutes: u32,
    step_minutes: u32,
) -> Vec<(NaiveTime, NaiveTime)> {
    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(i64::from(step_minutes));

    let mut slots = Vec::new();
    let mut start = window.start;

    loop {
        // NaiveTime arithmetic wraps at midnight; a non-zero wrap means the
        // slot would spill into the next day, so it cannot fit.
        let (end, wrapped) = start.overflowing_add_signed(duration);
        if wrapped != 0 || end > window.end {
            break;
        }
        slots.push((start, end));

        let (next, wrapped) = start.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        start = next;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn window(start: NaiveTime, end: NaiveTime) -> EffectiveWindow {
        EffectiveWindow { start, end }
    }

    #[test]
    fn steps_through_window_with_duration_aware_ends() {
        let slots = generate_slots(window(t(9, 0), t(10, 0)), 30, 15);
        assert_eq!(
            slots,
            vec![
                (t(9, 0), t(9, 30)),
                (t(9, 15), t(9, 45)),
                (t(9, 30), t(10, 0)),
            ]
        );
    }

    #[test]
    fn last_slot_may_end_exactly_at_window_end() {
        let slots = generate_slots(window(t(16, 0), t(17, 0)), 60, 15);
        assert_eq!(slots, vec![(t(16, 0), t(17, 0))]);
    }

    #[test]
    fn duration_exceeding_window_yields_no_slots() {
        let slots = generate_slots(window(t(9, 0), t(9, 45)), 60, 15);
        assert!(slots.is_empty());
    }

    #[test]
    fn ordering_is_ascending_by_start() {
        let slots = generate_slots(window(t(9, 0), t(18, 0)), 45, 15);
        assert!(slots.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }
}
