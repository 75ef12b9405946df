use crate::models::DbService;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use std::collections::HashSet;
use uuid::Uuid;

pub async fn create_service(
    pool: &Pool<Postgres>,
    name: &str,
    duration_minutes: i32,
) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating service: id={}, name={}, duration_minutes={}",
        id,
        name,
        duration_minutes
    );

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, name, duration_minutes, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, duration_minutes, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(duration_minutes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    tracing::debug!("Getting service by id: {}", id);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration_minutes, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_branch_ids(pool: &Pool<Postgres>, service_id: Uuid) -> Result<HashSet<Uuid>> {
    tracing::debug!("Getting branch availability for service: {}", service_id);

    let rows: Vec<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT branch_id
        FROM service_branches
        WHERE service_id = $1
        "#,
    )
    .bind(service_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn assign_service_to_branch(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    branch_id: Uuid,
) -> Result<()> {
    tracing::debug!(
        "Assigning service to branch: service_id={}, branch_id={}",
        service_id,
        branch_id
    );

    sqlx::query(
        r#"
        INSERT INTO service_branches (service_id, branch_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(service_id)
    .bind(branch_id)
    .execute(pool)
    .await?;

    Ok(())
}
