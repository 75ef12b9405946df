use crate::models::DbDayHours;
use chrono::NaiveTime;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_branch_week(pool: &Pool<Postgres>, branch_id: Uuid) -> Result<Vec<DbDayHours>> {
    tracing::debug!("Loading branch hours: branch_id={}", branch_id);

    let rows = sqlx::query_as::<_, DbDayHours>(
        r#"
        SELECT id, branch_id AS owner_id, day_of_week, is_open,
               opens_at, closes_at, break_start, break_end
        FROM branch_hours
        WHERE branch_id = $1
        ORDER BY day_of_week
        "#,
    )
    .bind(branch_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} branch hour rows", rows.len());
    Ok(rows)
}

pub async fn get_employee_week(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
) -> Result<Vec<DbDayHours>> {
    tracing::debug!("Loading employee hours: employee_id={}", employee_id);

    let rows = sqlx::query_as::<_, DbDayHours>(
        r#"
        SELECT id, employee_id AS owner_id, day_of_week, is_open,
               opens_at, closes_at, break_start, break_end
        FROM employee_hours
        WHERE employee_id = $1
        ORDER BY day_of_week
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} employee hour rows", rows.len());
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn upsert_branch_day(
    pool: &Pool<Postgres>,
    branch_id: Uuid,
    day_of_week: i16,
    is_open: bool,
    opens_at: NaiveTime,
    closes_at: NaiveTime,
    break_start: Option<NaiveTime>,
    break_end: Option<NaiveTime>,
) -> Result<DbDayHours> {
    tracing::debug!(
        "Upserting branch day: branch_id={}, day_of_week={}",
        branch_id,
        day_of_week
    );

    let row = sqlx::query_as::<_, DbDayHours>(
        r#"
        INSERT INTO branch_hours
            (id, branch_id, day_of_week, is_open, opens_at, closes_at, break_start, break_end)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (branch_id, day_of_week) DO UPDATE
            SET is_open = EXCLUDED.is_open,
                opens_at = EXCLUDED.opens_at,
                closes_at = EXCLUDED.closes_at,
                break_start = EXCLUDED.break_start,
                break_end = EXCLUDED.break_end
        RETURNING id, branch_id AS owner_id, day_of_week, is_open,
                  opens_at, closes_at, break_start, break_end
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(branch_id)
    .bind(day_of_week)
    .bind(is_open)
    .bind(opens_at)
    .bind(closes_at)
    .bind(break_start)
    .bind(break_end)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

#[allow(clippy::too_many_arguments)]
pub async fn upsert_employee_day(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    day_of_week: i16,
    is_open: bool,
    opens_at: NaiveTime,
    closes_at: NaiveTime,
    break_start: Option<NaiveTime>,
    break_end: Option<NaiveTime>,
) -> Result<DbDayHours> {
    tracing::debug!(
        "Upserting employee day: employee_id={}, day_of_week={}",
        employee_id,
        day_of_week
    );

    let row = sqlx::query_as::<_, DbDayHours>(
        r#"
        INSERT INTO employee_hours
            (id, employee_id, day_of_week, is_open, opens_at, closes_at, break_start, break_end)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (employee_id, day_of_week) DO UPDATE
            SET is_open = EXCLUDED.is_open,
                opens_at = EXCLUDED.opens_at,
                closes_at = EXCLUDED.closes_at,
                break_start = EXCLUDED.break_start,
                break_end = EXCLUDED.break_end
        RETURNING id, employee_id AS owner_id, day_of_week, is_open,
                  opens_at, closes_at, break_start, break_end
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employee_id)
    .bind(day_of_week)
    .bind(is_open)
    .bind(opens_at)
    .bind(closes_at)
    .bind(break_start)
    .bind(break_end)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_employee_by_id(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
) -> Result<Option<crate::models::DbEmployee>> {
    tracing::debug!("Getting employee by id: {}", employee_id);

    let employee = sqlx::query_as::<_, crate::models::DbEmployee>(
        r#"
        SELECT id, branch_id, display_name, created_at
        FROM employees
        WHERE id = $1
        "#,
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}
