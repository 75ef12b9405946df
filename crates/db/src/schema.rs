use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create branches table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS branches (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            business_id UUID NOT NULL,
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create employees table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            branch_id UUID NOT NULL REFERENCES branches(id),
            display_name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create branch_hours table (one row per branch per weekday, Sunday=0)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS branch_hours (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            branch_id UUID NOT NULL REFERENCES branches(id),
            day_of_week SMALLINT NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
            is_open BOOLEAN NOT NULL DEFAULT FALSE,
            opens_at TIME NOT NULL,
            closes_at TIME NOT NULL,
            break_start TIME NULL,
            break_end TIME NULL,
            UNIQUE (branch_id, day_of_week)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create employee_hours table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employee_hours (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            employee_id UUID NOT NULL REFERENCES employees(id),
            day_of_week SMALLINT NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
            is_open BOOLEAN NOT NULL DEFAULT FALSE,
            opens_at TIME NOT NULL,
            closes_at TIME NOT NULL,
            break_start TIME NULL,
            break_end TIME NULL,
            UNIQUE (employee_id, day_of_week)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create service_branches table (which branches offer a service)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_branches (
            service_id UUID NOT NULL REFERENCES services(id),
            branch_id UUID NOT NULL REFERENCES branches(id),
            PRIMARY KEY (service_id, branch_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. employee_id is nullable: owner-operated
    // bookings carry no staff record.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            branch_id UUID NOT NULL REFERENCES branches(id),
            employee_id UUID NULL REFERENCES employees(id),
            service_id UUID NOT NULL REFERENCES services(id),
            scheduled_on DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'PENDING',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_branch_date
            ON appointments(branch_id, scheduled_on);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_employee_date
            ON appointments(employee_id, scheduled_on);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_branch_hours_branch
            ON branch_hours(branch_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_employee_hours_employee
            ON employee_hours(employee_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized");
    Ok(())
}
