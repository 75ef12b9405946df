use thiserror::Error;

/// Domain errors for the booking engine.
///
/// An empty slot list is never an error: a closed branch, an employee's day
/// off, or a fully booked window all produce `Ok(vec![])`. Errors are
/// reserved for broken configuration and failed upstream fetches so callers
/// can always tell "legitimately no availability" apart from "computation
/// failed".
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid schedule configuration: {0}")]
    InvalidScheduleConfiguration(String),

    #[error("Invalid service definition: {0}")]
    InvalidServiceDefinition(String),

    #[error("Upstream data unavailable: {0}")]
    UpstreamDataUnavailable(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
