//! Half-open interval overlap, the one predicate every conflict check uses.
//!
//! Intervals are `[start, end)`: the end instant is excluded, so a slot
//! ending at 11:00 never conflicts with one starting at 11:00. Break checks
//! and appointment checks both go through [`overlaps`] — keeping a single
//! definition is what prevents the boundary conditions from drifting apart
//! between call sites.

use chrono::NaiveTime;

/// Whether `[a_start, a_end)` and `[b_start, b_end)` share any instant.
///
/// Two half-open intervals overlap iff `a_start < b_end && b_start < a_end`.
/// The predicate is symmetric, and back-to-back intervals do not overlap.
pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn overlapping_intervals() {
        assert!(overlaps(t(9, 0), t(10, 0), t(9, 30), t(10, 30)));
        assert!(overlaps(t(9, 30), t(10, 30), t(9, 0), t(10, 0)));
    }

    #[test]
    fn contained_interval_overlaps() {
        assert!(overlaps(t(9, 0), t(12, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        assert!(!overlaps(t(9, 0), t(10, 0), t(10, 0), t(11, 0)));
        assert!(!overlaps(t(10, 0), t(11, 0), t(9, 0), t(10, 0)));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert!(!overlaps(t(9, 0), t(10, 0), t(14, 0), t(15, 0)));
    }
}
