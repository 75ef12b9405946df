use chrono::{NaiveDate, NaiveTime, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use uuid::Uuid;

use slotwise_api::middleware::error_handling::AppError;
use slotwise_core::engine::{self, AvailabilitySnapshot};
use slotwise_core::errors::BookingError;
use slotwise_core::models::availability::{
    AvailabilityRequest, AvailabilityResponse, OccupancyScope, SlotValidation,
};
use slotwise_core::models::schedule::WeeklySchedule;
use slotwise_db::models::{DbAppointment, DbDayHours, DbService};

use crate::test_utils::TestContext;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// 2025-06-02 is a Monday (day_of_week 1, Sunday=0).
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn day_hours(owner_id: Uuid, day_of_week: i16, opens: NaiveTime, closes: NaiveTime) -> DbDayHours {
    DbDayHours {
        id: Uuid::new_v4(),
        owner_id,
        day_of_week,
        is_open: true,
        opens_at: opens,
        closes_at: closes,
        break_start: None,
        break_end: None,
    }
}

fn db_service(id: Uuid, duration_minutes: i32) -> DbService {
    DbService {
        id,
        name: "Haircut".to_string(),
        duration_minutes,
        created_at: Utc::now(),
    }
}

fn db_appointment(
    branch_id: Uuid,
    employee_id: Option<Uuid>,
    start: NaiveTime,
    end: NaiveTime,
    status: &str,
) -> DbAppointment {
    DbAppointment {
        id: Uuid::new_v4(),
        branch_id,
        employee_id,
        service_id: Uuid::new_v4(),
        scheduled_on: monday(),
        start_time: start,
        end_time: end,
        status: status.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn request(branch_id: Uuid, service_id: Uuid, employee_id: Option<Uuid>) -> AvailabilityRequest {
    AvailabilityRequest {
        date: monday(),
        branch_id,
        service_id,
        employee_id,
        granularity_minutes: 15,
    }
}

// Mirrors the snapshot assembly the compute handler performs, driven by the
// mock repositories instead of a live pool.
async fn assemble_and_compute(
    ctx: &mut TestContext,
    request: &AvailabilityRequest,
) -> Result<AvailabilityResponse, AppError> {
    let db_service = ctx
        .service_repo
        .get_service_by_id(request.service_id)
        .await?
        .ok_or_else(|| {
            AppError(BookingError::NotFound(format!(
                "Service with ID {} not found",
                request.service_id
            )))
        })?;
    let branch_ids = ctx
        .service_repo
        .get_service_branch_ids(request.service_id)
        .await?;
    let service = slotwise_db::models::into_service_definition(db_service, branch_ids);
    if !service.offered_at(request.branch_id) {
        return Err(AppError(BookingError::Validation(format!(
            "Service {} is not offered at branch {}",
            request.service_id, request.branch_id
        ))));
    }

    let branch_rows = ctx.schedule_repo.get_branch_week(request.branch_id).await?;
    let branch_schedule = slotwise_db::models::into_weekly_schedule(branch_rows);

    let employee_schedule: Option<WeeklySchedule> = match request.employee_id {
        Some(employee_id) => {
            let rows = ctx.schedule_repo.get_employee_week(employee_id).await?;
            Some(slotwise_db::models::into_weekly_schedule(rows))
        }
        None => None,
    };

    let scope = OccupancyScope::for_request(request.branch_id, request.employee_id);
    let occupancy: Vec<_> = ctx
        .appointment_repo
        .find_occupancy(scope, request.date)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let snapshot = AvailabilitySnapshot {
        date: request.date,
        branch_schedule: &branch_schedule,
        employee_schedule: employee_schedule.as_ref(),
        service: &service,
        occupancy: &occupancy,
        granularity_minutes: request.granularity_minutes,
    };
    let slots = engine::compute_availability(&snapshot).map_err(AppError)?;

    Ok(AvailabilityResponse {
        date: request.date,
        branch_id: request.branch_id,
        employee_id: request.employee_id,
        slots,
    })
}

#[tokio::test]
async fn test_compute_availability_unknown_service_is_not_found() {
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    ctx.service_repo
        .expect_get_service_by_id()
        .with(predicate::eq(service_id))
        .returning(|_| Ok(None));

    let result = assemble_and_compute(&mut ctx, &request(branch_id, service_id, None)).await;

    assert!(matches!(
        result,
        Err(AppError(BookingError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_compute_availability_service_not_offered_at_branch() {
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();
    let other_branch = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, 60))));
    ctx.service_repo
        .expect_get_service_branch_ids()
        .returning(move |_| Ok(HashSet::from([other_branch])));

    let result = assemble_and_compute(&mut ctx, &request(branch_id, service_id, None)).await;

    assert!(matches!(
        result,
        Err(AppError(BookingError::Validation(_)))
    ));
}

#[tokio::test]
async fn test_owner_operated_request_uses_branch_wide_occupancy() {
    // Regression guard for the staffing-scope rule: with no employee on the
    // request, occupancy must be loaded branch-wide, and an appointment
    // attached to SOME staff record still blocks the owner's slot.
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();
    let some_staff_member = Uuid::new_v4();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, 60))));
    ctx.service_repo
        .expect_get_service_branch_ids()
        .returning(move |_| Ok(HashSet::from([branch_id])));
    ctx.schedule_repo
        .expect_get_branch_week()
        .with(predicate::eq(branch_id))
        .returning(move |owner| Ok(vec![day_hours(owner, 1, t(9, 0), t(18, 0))]));
    ctx.appointment_repo
        .expect_find_occupancy()
        .with(
            predicate::eq(OccupancyScope::Branch { branch_id }),
            predicate::eq(monday()),
        )
        .returning(move |_, _| {
            Ok(vec![db_appointment(
                branch_id,
                Some(some_staff_member),
                t(10, 0),
                t(11, 0),
                "CONFIRMED",
            )])
        });

    let response = assemble_and_compute(&mut ctx, &request(branch_id, service_id, None))
        .await
        .expect("compute should succeed");

    let ten = response
        .slots
        .iter()
        .find(|s| s.start_time == t(10, 0))
        .expect("10:00 candidate should exist");
    assert!(!ten.available);
}

#[tokio::test]
async fn test_employee_request_uses_employee_scoped_occupancy() {
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, 30))));
    ctx.service_repo
        .expect_get_service_branch_ids()
        .returning(move |_| Ok(HashSet::from([branch_id])));
    ctx.schedule_repo
        .expect_get_branch_week()
        .returning(move |owner| Ok(vec![day_hours(owner, 1, t(9, 0), t(18, 0))]));
    ctx.schedule_repo
        .expect_get_employee_week()
        .with(predicate::eq(employee_id))
        .returning(move |owner| Ok(vec![day_hours(owner, 1, t(10, 0), t(16, 0))]));
    ctx.appointment_repo
        .expect_find_occupancy()
        .with(
            predicate::eq(OccupancyScope::Employee { branch_id, employee_id }),
            predicate::eq(monday()),
        )
        .returning(|_, _| Ok(vec![]));

    let response =
        assemble_and_compute(&mut ctx, &request(branch_id, service_id, Some(employee_id)))
            .await
            .expect("compute should succeed");

    // The employee's narrower window bounds the slot list.
    assert_eq!(response.slots.first().unwrap().start_time, t(10, 0));
    assert_eq!(response.slots.last().unwrap().end_time, t(16, 0));
    assert!(response.slots.iter().all(|s| s.available));
}

#[tokio::test]
async fn test_closed_day_yields_empty_slot_list_not_error() {
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, 30))));
    ctx.service_repo
        .expect_get_service_branch_ids()
        .returning(move |_| Ok(HashSet::from([branch_id])));
    // No entry for Monday at all: the branch is closed that day.
    ctx.schedule_repo
        .expect_get_branch_week()
        .returning(|_| Ok(vec![]));
    ctx.appointment_repo
        .expect_find_occupancy()
        .returning(|_, _| Ok(vec![]));

    let response = assemble_and_compute(&mut ctx, &request(branch_id, service_id, None))
        .await
        .expect("compute should succeed");

    assert_eq!(response.slots, vec![]);
}

#[tokio::test]
async fn test_validate_slot_with_self_exclusion() {
    // The edit path: re-validating an appointment's own interval with its
    // id excluded passes even though an identical occupied row exists.
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    let existing = db_appointment(branch_id, None, t(10, 0), t(11, 0), "CONFIRMED");
    let existing_id = existing.id;

    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, 60))));
    ctx.service_repo
        .expect_get_service_branch_ids()
        .returning(move |_| Ok(HashSet::from([branch_id])));
    ctx.schedule_repo
        .expect_get_branch_week()
        .returning(move |owner| Ok(vec![day_hours(owner, 1, t(9, 0), t(18, 0))]));
    ctx.appointment_repo
        .expect_find_occupancy()
        .returning(move |_, _| Ok(vec![existing.clone()]));

    let req = request(branch_id, service_id, None);
    let branch_rows = ctx.schedule_repo.get_branch_week(branch_id).await.unwrap();
    let branch_schedule = slotwise_db::models::into_weekly_schedule(branch_rows);
    let db_svc = ctx
        .service_repo
        .get_service_by_id(service_id)
        .await
        .unwrap()
        .unwrap();
    let branch_ids = ctx
        .service_repo
        .get_service_branch_ids(service_id)
        .await
        .unwrap();
    let service = slotwise_db::models::into_service_definition(db_svc, branch_ids);
    let occupancy: Vec<_> = ctx
        .appointment_repo
        .find_occupancy(OccupancyScope::Branch { branch_id }, monday())
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();

    let snapshot = AvailabilitySnapshot {
        date: req.date,
        branch_schedule: &branch_schedule,
        employee_schedule: None,
        service: &service,
        occupancy: &occupancy,
        granularity_minutes: req.granularity_minutes,
    };

    let verdict =
        engine::validate_slot(&snapshot, t(10, 0), t(11, 0), Some(existing_id)).unwrap();
    assert_eq!(verdict, SlotValidation::ok());

    let verdict = engine::validate_slot(&snapshot, t(10, 0), t(11, 0), None).unwrap();
    assert!(!verdict.ok);
}
