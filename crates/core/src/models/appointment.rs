use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

/// An existing appointment as seen by the conflict evaluator.
///
/// A read-only occupancy snapshot: the booking/edit flows own the records,
/// the engine only tests candidate slots against them. Conflicts always use
/// the appointment's own stored start/end, never the candidate's service
/// duration, so appointments of differing lengths block correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingAppointment {
    pub id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
}

impl ExistingAppointment {
    /// Whether this record occupies its interval. Cancelled appointments
    /// never block; every other status does, including no-shows that staff
    /// have not yet cleared from the book.
    pub fn blocks_time(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

/// Booking request. The end time is not a client input: it is derived from
/// the service duration at the write boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub branch_id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// Reschedule request for an existing appointment (the edit path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub branch_id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
}
