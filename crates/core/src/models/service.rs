use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// A bookable service offered by a business.
///
/// Immutable for the duration of a computation; the engine only reads the
/// duration and the set of branches the service is offered at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: u32,
    pub branch_ids: HashSet<Uuid>,
}

impl ServiceDefinition {
    pub fn offered_at(&self, branch_id: Uuid) -> bool {
        self.branch_ids.contains(&branch_id)
    }

    pub fn validate(&self) -> BookingResult<()> {
        if self.duration_minutes == 0 {
            return Err(BookingError::InvalidServiceDefinition(format!(
                "service {} has non-positive duration",
                self.id
            )));
        }
        Ok(())
    }
}
