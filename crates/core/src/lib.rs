//! Domain logic for the tempo timesheet engine.
//!
//! Everything in this crate is pure: the calendar period resolver, the
//! timesheet state machine, the per-action capability checks, and the
//! report builders all operate on plain values and carry no I/O. The
//! `db` and `api` crates wire these rules to PostgreSQL and axum.

pub mod authz;
pub mod error;
pub mod period;
pub mod reports;
pub mod roles;
pub mod status;
pub mod types;
