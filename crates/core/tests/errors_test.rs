use std::error::Error;
use slotwise_core::errors::{BookingError, BookingResult};

#[test]
fn test_booking_error_display() {
    let not_found = BookingError::NotFound("Service not found".to_string());
    let validation = BookingError::Validation("Invalid input".to_string());
    let schedule = BookingError::InvalidScheduleConfiguration(
        "break start is not before break end".to_string(),
    );
    let service = BookingError::InvalidServiceDefinition("non-positive duration".to_string());
    let upstream = BookingError::UpstreamDataUnavailable(eyre::eyre!("connection refused"));
    let internal = BookingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(not_found.to_string(), "Resource not found: Service not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(
        schedule.to_string(),
        "Invalid schedule configuration: break start is not before break end"
    );
    assert_eq!(
        service.to_string(),
        "Invalid service definition: non-positive duration"
    );
    assert!(upstream.to_string().contains("Upstream data unavailable:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let booking_error = BookingError::Internal(Box::new(io_error));

    assert!(booking_error.source().is_some());
}

#[test]
fn test_upstream_error_from_eyre() {
    fn fetch() -> eyre::Result<()> {
        Err(eyre::eyre!("storage timeout"))
    }

    let err: BookingError = fetch().unwrap_err().into();
    assert!(matches!(err, BookingError::UpstreamDataUnavailable(_)));
}

#[test]
fn test_booking_result() {
    let result: BookingResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: BookingResult<i32> = Err(BookingError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}
