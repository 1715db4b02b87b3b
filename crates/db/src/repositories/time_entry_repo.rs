//! Repository for the `time_entries` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use tempo_core::types::DbId;

use crate::models::time_entry::{CreateEntry, EntryWithProject, TimeEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, timesheet_id, user_id, project_id, date, hours, notes, created_at, updated_at";

/// Provides operations for time entries.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Insert a new entry, returning the created row.
    ///
    /// The `uq_time_entries_user_project_date` constraint is the backstop
    /// against concurrent duplicate inserts for the same cell.
    pub async fn create(pool: &PgPool, input: &CreateEntry) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries (timesheet_id, user_id, project_id, date, hours, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(input.timesheet_id)
            .bind(input.user_id)
            .bind(input.project_id)
            .bind(input.date)
            .bind(input.hours)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_entries WHERE id = $1");
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the unique entry for one (user, project, date) cell.
    pub async fn find_by_cell(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
        date: NaiveDate,
    ) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE user_id = $1 AND project_id = $2 AND date = $3"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Update an entry's hours and notes in place.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        hours: f64,
        notes: Option<&str>,
    ) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "UPDATE time_entries SET hours = $2, notes = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .bind(hours)
            .bind(notes)
            .fetch_one(pool)
            .await
    }

    /// Delete an entry. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a timesheet's entries with project identity, ordered by
    /// project then date (the order the weekly grid renders in).
    pub async fn list_for_timesheet(
        pool: &PgPool,
        timesheet_id: DbId,
    ) -> Result<Vec<EntryWithProject>, sqlx::Error> {
        sqlx::query_as::<_, EntryWithProject>(
            "SELECT e.id, e.project_id, p.code AS project_code, p.name AS project_name,
                    e.date, e.hours, e.notes
             FROM time_entries e
             JOIN projects p ON p.id = e.project_id
             WHERE e.timesheet_id = $1
             ORDER BY e.project_id ASC, e.date ASC",
        )
        .bind(timesheet_id)
        .fetch_all(pool)
        .await
    }

    /// Sum of hours on a timesheet. Zero when the sheet has no entries.
    pub async fn total_hours(pool: &PgPool, timesheet_id: DbId) -> Result<f64, sqlx::Error> {
        let (total,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(hours), 0)::DOUBLE PRECISION
             FROM time_entries WHERE timesheet_id = $1",
        )
        .bind(timesheet_id)
        .fetch_one(pool)
        .await?;
        Ok(total)
    }
}
