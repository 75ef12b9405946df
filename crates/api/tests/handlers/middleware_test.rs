use axum::http::StatusCode;
use axum::response::IntoResponse;
use pretty_assertions::assert_eq;
use rstest::rstest;

use slotwise_api::middleware::error_handling::AppError;
use slotwise_core::errors::BookingError;

#[rstest]
#[case(BookingError::NotFound("missing".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("bad input".to_string()), StatusCode::BAD_REQUEST)]
#[case(
    BookingError::InvalidScheduleConfiguration("break outside hours".to_string()),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(
    BookingError::InvalidServiceDefinition("zero duration".to_string()),
    StatusCode::UNPROCESSABLE_ENTITY
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_upstream_error_is_retryable_service_unavailable() {
    let error = BookingError::UpstreamDataUnavailable(eyre::eyre!("connection refused"));
    let response = AppError(error).into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_eyre_report_converts_to_upstream_error() {
    let report = eyre::eyre!("pool timed out");
    let app_error: AppError = report.into();
    assert!(matches!(
        app_error.0,
        BookingError::UpstreamDataUnavailable(_)
    ));
}
