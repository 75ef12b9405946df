use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// A configured break interval within a day's open hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// One day of a weekly operating-hours table (branch or employee).
///
/// `day_of_week` uses the Sunday=0 convention. Times are wall-clock local
/// times within the business's timezone; the engine never shifts timezones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyScheduleEntry {
    pub day_of_week: u8,
    pub is_open: bool,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
}

impl WeeklyScheduleEntry {
    /// The day's break, when one is configured.
    pub fn break_interval(&self) -> Option<BreakInterval> {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => Some(BreakInterval { start, end }),
            _ => None,
        }
    }

    /// Checks the entry's invariants, surfacing broken settings instead of
    /// silently treating them as "closed".
    ///
    /// Closed days carry no constraints. An open day must have
    /// `opens_at < closes_at`; a break must have both endpoints, come in
    /// order, and lie within the open hours.
    pub fn validate(&self, owner: &str) -> BookingResult<()> {
        if !self.is_open {
            return Ok(());
        }

        if self.opens_at >= self.closes_at {
            return Err(BookingError::InvalidScheduleConfiguration(format!(
                "{owner} day {}: opens_at {} is not before closes_at {}",
                self.day_of_week, self.opens_at, self.closes_at
            )));
        }

        match (self.break_start, self.break_end) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                if start >= end {
                    return Err(BookingError::InvalidScheduleConfiguration(format!(
                        "{owner} day {}: break start {start} is not before break end {end}",
                        self.day_of_week
                    )));
                }
                if start < self.opens_at || end > self.closes_at {
                    return Err(BookingError::InvalidScheduleConfiguration(format!(
                        "{owner} day {}: break {start}-{end} lies outside open hours {}-{}",
                        self.day_of_week, self.opens_at, self.closes_at
                    )));
                }
                Ok(())
            }
            _ => Err(BookingError::InvalidScheduleConfiguration(format!(
                "{owner} day {}: break has only one endpoint configured",
                self.day_of_week
            ))),
        }
    }
}

/// A full weekly operating-hours table. Days without an entry are treated
/// as closed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub entries: Vec<WeeklyScheduleEntry>,
}

impl WeeklySchedule {
    pub fn new(entries: Vec<WeeklyScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Looks up the entry for a calendar date's weekday (Sunday=0).
    pub fn entry_for(&self, date: NaiveDate) -> Option<&WeeklyScheduleEntry> {
        let day = day_of_week(date);
        self.entries.iter().find(|e| e.day_of_week == day)
    }
}

/// Sunday=0 weekday index for a calendar date.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
