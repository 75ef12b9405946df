//! # Slotwise Core
//!
//! Domain models and the availability engine for the Slotwise appointment
//! booking platform. This crate is pure computation: it takes immutable
//! snapshots of schedules, services, and existing appointments and produces
//! bookable time slots or conflict verdicts. All I/O (fetching schedules,
//! loading occupancy) lives in the `slotwise-db` crate; HTTP lives in
//! `slotwise-api`.

pub mod engine;
pub mod errors;
pub mod models;
