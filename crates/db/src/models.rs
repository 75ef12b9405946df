use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use uuid::Uuid;

use slotwise_core::models::{
    appointment::{AppointmentStatus, ExistingAppointment},
    schedule::{WeeklySchedule, WeeklyScheduleEntry},
    service::ServiceDefinition,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBranch {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDayHours {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub day_of_week: i16,
    pub is_open: bool,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub service_id: Uuid,
    pub scheduled_on: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbDayHours> for WeeklyScheduleEntry {
    fn from(row: DbDayHours) -> Self {
        WeeklyScheduleEntry {
            day_of_week: row.day_of_week as u8,
            is_open: row.is_open,
            opens_at: row.opens_at,
            closes_at: row.closes_at,
            break_start: row.break_start,
            break_end: row.break_end,
        }
    }
}

/// Assembles a week of hour rows into the core schedule table.
pub fn into_weekly_schedule(rows: Vec<DbDayHours>) -> WeeklySchedule {
    WeeklySchedule::new(rows.into_iter().map(Into::into).collect())
}

/// Builds the core service definition from its row plus the branch set.
pub fn into_service_definition(row: DbService, branch_ids: HashSet<Uuid>) -> ServiceDefinition {
    ServiceDefinition {
        id: row.id,
        name: row.name,
        duration_minutes: row.duration_minutes.max(0) as u32,
        branch_ids,
    }
}

/// Status strings are stored uppercase; anything unrecognized maps to
/// Pending so a bad row blocks time rather than silently freeing it.
pub fn parse_status(status: &str) -> AppointmentStatus {
    match status {
        "PENDING" => AppointmentStatus::Pending,
        "CONFIRMED" => AppointmentStatus::Confirmed,
        "COMPLETED" => AppointmentStatus::Completed,
        "CANCELLED" => AppointmentStatus::Cancelled,
        "NO_SHOW" => AppointmentStatus::NoShow,
        _ => AppointmentStatus::Pending,
    }
}

pub fn status_as_str(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Pending => "PENDING",
        AppointmentStatus::Confirmed => "CONFIRMED",
        AppointmentStatus::Completed => "COMPLETED",
        AppointmentStatus::Cancelled => "CANCELLED",
        AppointmentStatus::NoShow => "NO_SHOW",
    }
}

impl From<DbAppointment> for ExistingAppointment {
    fn from(row: DbAppointment) -> Self {
        ExistingAppointment {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            status: parse_status(&row.status),
        }
    }
}
