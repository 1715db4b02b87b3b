//! Repository for the `timesheets` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use tempo_core::period::WeekPeriod;
use tempo_core::reports::SheetStatusRow;
use tempo_core::types::DbId;

use crate::models::timesheet::{PendingSheetRow, Timesheet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, week_start_date, week_end_date, status, \
                       submitted_at, approved_at, approver_id, comments, created_at, updated_at";

/// Provides operations for weekly timesheets.
pub struct TimesheetRepo;

impl TimesheetRepo {
    /// Find a timesheet by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Timesheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timesheets WHERE id = $1");
        sqlx::query_as::<_, Timesheet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the timesheet for one user's one week.
    pub async fn find_by_user_week(
        pool: &PgPool,
        user_id: DbId,
        week_start: NaiveDate,
    ) -> Result<Option<Timesheet>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM timesheets WHERE user_id = $1 AND week_start_date = $2");
        sqlx::query_as::<_, Timesheet>(&query)
            .bind(user_id)
            .bind(week_start)
            .fetch_optional(pool)
            .await
    }

    /// Read-or-create: return the user's timesheet for the given week,
    /// creating it as DRAFT when it does not exist yet.
    ///
    /// The second tuple element reports whether a row was created, so
    /// callers (and tests) can observe the creation side effect. Two
    /// racing callers both get the same row: the insert uses
    /// `ON CONFLICT DO NOTHING` and the loser re-reads.
    pub async fn find_or_create(
        pool: &PgPool,
        user_id: DbId,
        week: WeekPeriod,
    ) -> Result<(Timesheet, bool), sqlx::Error> {
        if let Some(sheet) = Self::find_by_user_week(pool, user_id, week.start).await? {
            return Ok((sheet, false));
        }

        let query = format!(
            "INSERT INTO timesheets (user_id, week_start_date, week_end_date)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, week_start_date) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Timesheet>(&query)
            .bind(user_id)
            .bind(week.start)
            .bind(week.end)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(sheet) => {
                tracing::debug!(user_id, week_start = %week.start, "Created DRAFT timesheet");
                Ok((sheet, true))
            }
            // Lost the insert race; the row exists now.
            None => {
                let sheet = Self::find_by_user_week(pool, user_id, week.start)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((sheet, false))
            }
        }
    }

    /// List SUBMITTED timesheets belonging to a manager's direct reports,
    /// oldest submission first, with the owner's identity joined in.
    pub async fn list_pending_for_manager(
        pool: &PgPool,
        manager_id: DbId,
    ) -> Result<Vec<PendingSheetRow>, sqlx::Error> {
        sqlx::query_as::<_, PendingSheetRow>(
            "SELECT t.id, t.user_id, t.week_start_date, t.week_end_date, t.status,
                    t.submitted_at, t.approved_at, t.approver_id, t.comments,
                    t.created_at, t.updated_at,
                    u.first_name, u.last_name, u.email
             FROM timesheets t
             JOIN users u ON u.id = t.user_id
             WHERE t.status = 'SUBMITTED' AND u.manager_id = $1
             ORDER BY t.submitted_at ASC",
        )
        .bind(manager_id)
        .fetch_all(pool)
        .await
    }

    /// Mark a timesheet SUBMITTED and stamp `submitted_at`.
    pub async fn set_submitted(pool: &PgPool, id: DbId) -> Result<Timesheet, sqlx::Error> {
        let query = format!(
            "UPDATE timesheets SET status = 'SUBMITTED', submitted_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Timesheet>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Mark a timesheet APPROVED, recording the approver and optional
    /// comments.
    pub async fn set_approved(
        pool: &PgPool,
        id: DbId,
        approver_id: DbId,
        comments: Option<&str>,
    ) -> Result<Timesheet, sqlx::Error> {
        let query = format!(
            "UPDATE timesheets SET status = 'APPROVED', approved_at = NOW(),
                    approver_id = $2, comments = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Timesheet>(&query)
            .bind(id)
            .bind(approver_id)
            .bind(comments)
            .fetch_one(pool)
            .await
    }

    /// Mark a timesheet REJECTED with the reviewer's comments.
    /// `approved_at` stays null.
    pub async fn set_rejected(
        pool: &PgPool,
        id: DbId,
        comments: &str,
    ) -> Result<Timesheet, sqlx::Error> {
        let query = format!(
            "UPDATE timesheets SET status = 'REJECTED', comments = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Timesheet>(&query)
            .bind(id)
            .bind(comments)
            .fetch_one(pool)
            .await
    }

    /// Status metadata of every timesheet the given users own with a week
    /// starting on or after `oldest_week`. Feeds the status matrix.
    pub async fn statuses_since(
        pool: &PgPool,
        user_ids: &[DbId],
        oldest_week: NaiveDate,
    ) -> Result<Vec<SheetStatusRow>, sqlx::Error> {
        sqlx::query_as::<_, SheetStatusRow>(
            "SELECT user_id, week_start_date AS week_start, status, submitted_at, approved_at
             FROM timesheets
             WHERE user_id = ANY($1) AND week_start_date >= $2",
        )
        .bind(user_ids)
        .bind(oldest_week)
        .fetch_all(pool)
        .await
    }
}
