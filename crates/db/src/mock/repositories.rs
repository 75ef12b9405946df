use chrono::{NaiveDate, NaiveTime};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAppointment, DbDayHours, DbEmployee, DbService};
use slotwise_core::models::availability::OccupancyScope;
use std::collections::HashSet;

// Mock repositories for testing
mock! {
    pub ScheduleRepo {
        pub async fn get_branch_week(
            &self,
            branch_id: Uuid,
        ) -> eyre::Result<Vec<DbDayHours>>;

        pub async fn get_employee_week(
            &self,
            employee_id: Uuid,
        ) -> eyre::Result<Vec<DbDayHours>>;

        pub async fn get_employee_by_id(
            &self,
            employee_id: Uuid,
        ) -> eyre::Result<Option<DbEmployee>>;

        pub async fn upsert_branch_day(
            &self,
            branch_id: Uuid,
            day_of_week: i16,
            is_open: bool,
            opens_at: NaiveTime,
            closes_at: NaiveTime,
            break_start: Option<NaiveTime>,
            break_end: Option<NaiveTime>,
        ) -> eyre::Result<DbDayHours>;
    }
}

mock! {
    pub ServiceRepo {
        pub async fn get_service_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbService>>;

        pub async fn get_service_branch_ids(
            &self,
            service_id: Uuid,
        ) -> eyre::Result<HashSet<Uuid>>;

        pub async fn create_service(
            &self,
            name: &'static str,
            duration_minutes: i32,
        ) -> eyre::Result<DbService>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn find_occupancy(
            &self,
            scope: OccupancyScope,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn create_appointment(
            &self,
            branch_id: Uuid,
            employee_id: Option<Uuid>,
            service_id: Uuid,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<DbAppointment>;

        pub async fn get_appointment_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn update_appointment_times(
            &self,
            id: Uuid,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<DbAppointment>;
    }
}
