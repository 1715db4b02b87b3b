//! Project assignment model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use tempo_core::roles::Role;
use tempo_core::types::{DbId, Timestamp};

/// Row from the `project_assignments` table.
///
/// One row per (user, project); re-assignment means delete and recreate,
/// never date-range layering.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectAssignment {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub start_date: NaiveDate,
    /// `None` = open-ended.
    pub end_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

/// Assignment joined with user and project identity, for the admin list.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssignmentDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub project_id: DbId,
    pub project_code: String,
    pub project_name: String,
    pub project_active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// DTO for creating an assignment.
#[derive(Debug)]
pub struct CreateAssignment {
    pub user_id: DbId,
    pub project_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
