//! Report input queries.
//!
//! Fetches the flat entry rows the pure builders in `tempo_core::reports`
//! aggregate. Date bounds are inclusive and optional; `NULL` binds
//! disable a filter, which keeps the SQL static.

use chrono::NaiveDate;
use sqlx::PgPool;
use tempo_core::reports::EntryRow;
use tempo_core::types::DbId;

/// Provides read queries for the aggregation engine.
pub struct ReportRepo;

impl ReportRepo {
    /// Time entries in `[start, end]` joined with user, project, and
    /// owning-timesheet metadata, optionally narrowed to one project
    /// and/or one user. Ordered by project code, user last name, date --
    /// the order the flat project-hours listing is consumed in.
    pub async fn entry_rows(
        pool: &PgPool,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        project_id: Option<DbId>,
        user_id: Option<DbId>,
    ) -> Result<Vec<EntryRow>, sqlx::Error> {
        sqlx::query_as::<_, EntryRow>(
            "SELECT
                e.user_id, u.first_name, u.last_name, u.email,
                e.project_id, p.code AS project_code, p.name AS project_name,
                e.date, e.hours, e.notes,
                t.week_start_date AS week_start, t.status
             FROM time_entries e
             JOIN users u ON u.id = e.user_id
             JOIN projects p ON p.id = e.project_id
             JOIN timesheets t ON t.id = e.timesheet_id
             WHERE ($1::date IS NULL OR e.date >= $1)
               AND ($2::date IS NULL OR e.date <= $2)
               AND ($3::bigint IS NULL OR e.project_id = $3)
               AND ($4::bigint IS NULL OR e.user_id = $4)
             ORDER BY p.code ASC, u.last_name ASC, u.first_name ASC, e.date ASC",
        )
        .bind(start)
        .bind(end)
        .bind(project_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Like [`Self::entry_rows`] without a project filter, but restricted
    /// to active projects -- the population of the unfiltered
    /// project -> employee breakdown.
    pub async fn entry_rows_active_projects(
        pool: &PgPool,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<EntryRow>, sqlx::Error> {
        sqlx::query_as::<_, EntryRow>(
            "SELECT
                e.user_id, u.first_name, u.last_name, u.email,
                e.project_id, p.code AS project_code, p.name AS project_name,
                e.date, e.hours, e.notes,
                t.week_start_date AS week_start, t.status
             FROM time_entries e
             JOIN users u ON u.id = e.user_id
             JOIN projects p ON p.id = e.project_id
             JOIN timesheets t ON t.id = e.timesheet_id
             WHERE p.active
               AND ($1::date IS NULL OR e.date >= $1)
               AND ($2::date IS NULL OR e.date <= $2)
             ORDER BY p.code ASC, u.last_name ASC, u.first_name ASC, e.date ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }
}
