//! Time entry entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use tempo_core::types::{DbId, Timestamp};

/// Full time entry row from the `time_entries` table.
///
/// At most one row exists per (user, project, date); several projects on
/// the same day are separate rows. Zero-hour days are not stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TimeEntry {
    pub id: DbId,
    pub timesheet_id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub date: NaiveDate,
    pub hours: f64,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Entry joined with its project's identity, as embedded in timesheet
/// responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntryWithProject {
    pub id: DbId,
    pub project_id: DbId,
    pub project_code: String,
    pub project_name: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub notes: Option<String>,
}

/// DTO for inserting a new entry. `user_id` always comes from the
/// authenticated actor, never from request input.
#[derive(Debug)]
pub struct CreateEntry {
    pub timesheet_id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub date: NaiveDate,
    pub hours: f64,
    pub notes: Option<String>,
}
