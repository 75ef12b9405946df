use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request for bookable slots on one calendar date.
///
/// `employee_id` is serialized as an explicit `null` when absent — "no
/// employee" is a meaningful value (owner-operated booking), not a missing
/// field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub date: NaiveDate,
    pub branch_id: Uuid,
    pub service_id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    #[serde(default = "default_granularity")]
    pub granularity_minutes: u32,
}

fn default_granularity() -> u32 {
    15
}

/// A candidate start/end pair of fixed service duration, tagged with the
/// conflict evaluation result. Produced fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictReason {
    Occupied,
    Break,
    OutsideHours,
}

/// Verdict for one proposed slot, returned by the validation entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotValidation {
    pub ok: bool,
    pub reason: Option<ConflictReason>,
}

impl SlotValidation {
    pub fn ok() -> Self {
        Self { ok: true, reason: None }
    }

    pub fn conflict(reason: ConflictReason) -> Self {
        Self { ok: false, reason: Some(reason) }
    }
}

/// Response for the compute entry point: the candidate list in display
/// order, with the request echo the widget needs to render headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub branch_id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub slots: Vec<CandidateSlot>,
}

/// Request for the validation entry point: one proposed interval on top of
/// the usual availability parameters. `exclude_appointment_id` is set on the
/// edit path so an appointment never conflicts with itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSlotRequest {
    #[serde(flatten)]
    pub request: AvailabilityRequest,
    pub proposed_start: NaiveTime,
    pub proposed_end: NaiveTime,
    #[serde(default)]
    pub exclude_appointment_id: Option<Uuid>,
}

/// Which appointments count as occupancy for a request.
///
/// When no employee is assigned (owner-operated model) the scope is the
/// whole branch: the owner is implicitly busy for ANY appointment at that
/// branch at that time, whichever staff record it hangs off. Modeling the
/// choice as a tagged enum keeps that rule out of call-site discipline —
/// there is no nullable employee field to forget to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyScope {
    /// Only the named employee's appointments at the branch conflict.
    Employee { branch_id: Uuid, employee_id: Uuid },
    /// Every appointment at the branch conflicts, employee or not.
    Branch { branch_id: Uuid },
}

impl OccupancyScope {
    pub fn for_request(branch_id: Uuid, employee_id: Option<Uuid>) -> Self {
        match employee_id {
            Some(employee_id) => Self::Employee { branch_id, employee_id },
            None => Self::Branch { branch_id },
        }
    }

    pub fn branch_id(&self) -> Uuid {
        match self {
            Self::Employee { branch_id, .. } | Self::Branch { branch_id } => *branch_id,
        }
    }
}
