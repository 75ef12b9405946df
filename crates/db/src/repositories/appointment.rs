use crate::models::DbAppointment;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use slotwise_core::models::availability::OccupancyScope;
use sqlx::PgExecutor;
use uuid::Uuid;

/// The occupancy loader: every appointment on `date` that can conflict with
/// a candidate slot under the given scope.
///
/// The scope enum picks the query shape. `Employee` filters to that staff
/// member's appointments. `Branch` (owner-operated booking) deliberately has
/// NO employee filter: every appointment at the branch occupies the owner,
/// whether or not it hangs off a staff record. Cancelled rows are returned
/// as-is; the engine decides which statuses block.
///
/// Takes any executor so the write path can re-load occupancy inside the
/// transaction that commits the appointment.
pub async fn find_occupancy(
    executor: impl PgExecutor<'_>,
    scope: &OccupancyScope,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let rows = match scope {
        OccupancyScope::Employee {
            branch_id,
            employee_id,
        } => {
            tracing::debug!(
                "Loading occupancy: branch_id={}, employee_id={}, date={}",
                branch_id,
                employee_id,
                date
            );
            sqlx::query_as::<_, DbAppointment>(
                r#"
                SELECT id, branch_id, employee_id, service_id, scheduled_on,
                       start_time, end_time, status, created_at, updated_at
                FROM appointments
                WHERE branch_id = $1 AND employee_id = $2 AND scheduled_on = $3
                ORDER BY start_time
                "#,
            )
            .bind(branch_id)
            .bind(employee_id)
            .bind(date)
            .fetch_all(executor)
            .await?
        }
        OccupancyScope::Branch { branch_id } => {
            tracing::debug!(
                "Loading branch-wide occupancy: branch_id={}, date={}",
                branch_id,
                date
            );
            sqlx::query_as::<_, DbAppointment>(
                r#"
                SELECT id, branch_id, employee_id, service_id, scheduled_on,
                       start_time, end_time, status, created_at, updated_at
                FROM appointments
                WHERE branch_id = $1 AND scheduled_on = $2
                ORDER BY start_time
                "#,
            )
            .bind(branch_id)
            .bind(date)
            .fetch_all(executor)
            .await?
        }
    };

    tracing::debug!("Loaded {} occupancy rows", rows.len());
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn create_appointment(
    executor: impl PgExecutor<'_>,
    branch_id: Uuid,
    employee_id: Option<Uuid>,
    service_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, branch_id={}, date={}, start={}",
        id,
        branch_id,
        date,
        start_time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments
            (id, branch_id, employee_id, service_id, scheduled_on,
             start_time, end_time, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'PENDING', $8, $8)
        RETURNING id, branch_id, employee_id, service_id, scheduled_on,
                  start_time, end_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(branch_id)
    .bind(employee_id)
    .bind(service_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(appointment)
}

pub async fn get_appointment_by_id(
    executor: impl PgExecutor<'_>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Getting appointment by id: {}", id);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, branch_id, employee_id, service_id, scheduled_on,
               start_time, end_time, status, created_at, updated_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(appointment)
}

pub async fn update_appointment_times(
    executor: impl PgExecutor<'_>,
    id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Rescheduling appointment: id={}, date={}, start={}",
        id,
        date,
        start_time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET scheduled_on = $2, start_time = $3, end_time = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING id, branch_id, employee_id, service_id, scheduled_on,
                  start_time, end_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(executor)
    .await?;

    Ok(appointment)
}

pub async fn update_appointment_status(
    executor: impl PgExecutor<'_>,
    id: Uuid,
    status: &str,
) -> Result<DbAppointment> {
    tracing::debug!("Updating appointment status: id={}, status={}", id, status);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, branch_id, employee_id, service_id, scheduled_on,
                  start_time, end_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_one(executor)
    .await?;

    Ok(appointment)
}
