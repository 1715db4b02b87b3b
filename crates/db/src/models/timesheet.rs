//! Timesheet entity model and composite response shapes.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use tempo_core::reports::EmployeeRef;
use tempo_core::status::TimesheetStatus;
use tempo_core::types::{DbId, Timestamp};

use crate::models::time_entry::EntryWithProject;

/// Full timesheet row from the `timesheets` table.
///
/// One row per (user, week); `week_start_date` is always a Monday and
/// `week_end_date` the Sunday six days later.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Timesheet {
    pub id: DbId,
    pub user_id: DbId,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub status: TimesheetStatus,
    pub submitted_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub approver_id: Option<DbId>,
    pub comments: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A timesheet with its entries and weekly total, as returned to the
/// owning employee.
#[derive(Debug, Serialize)]
pub struct TimesheetDetail {
    #[serde(flatten)]
    pub timesheet: Timesheet,
    pub entries: Vec<EntryWithProject>,
    pub total_hours: f64,
}

/// A submitted timesheet in a manager's pending queue, with the owner's
/// identity attached.
#[derive(Debug, Serialize)]
pub struct PendingTimesheet {
    #[serde(flatten)]
    pub timesheet: Timesheet,
    pub user: EmployeeRef,
    pub entries: Vec<EntryWithProject>,
    pub total_hours: f64,
}

/// Flat row backing the pending queue query: timesheet columns plus the
/// owner's identity, joined in one pass to avoid N+1 lookups.
#[derive(Debug, FromRow)]
pub struct PendingSheetRow {
    #[sqlx(flatten)]
    pub timesheet: Timesheet,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl PendingSheetRow {
    /// Split into the timesheet and the owner's identity.
    pub fn into_parts(self) -> (Timesheet, EmployeeRef) {
        let user = EmployeeRef {
            id: self.timesheet.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        };
        (self.timesheet, user)
    }
}
