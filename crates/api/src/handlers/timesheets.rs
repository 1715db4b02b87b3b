//! Handlers for the `/timesheets` resource: the weekly grid, the
//! approval workflow, and the manager status matrix.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tempo_core::authz;
use tempo_core::error::CoreError;
use tempo_core::period::{self, WeekPeriod};
use tempo_core::reports::{self, StatusMatrix};
use tempo_core::status::{validate_rejection_comment, TimesheetAction};
use tempo_core::types::DbId;
use tempo_db::models::timesheet::{PendingTimesheet, Timesheet, TimesheetDetail};
use tempo_db::repositories::{TimeEntryRepo, TimesheetRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of weeks in the status matrix.
const DEFAULT_MATRIX_WEEKS: usize = 8;

/// Upper bound on requested matrix weeks; half a year of columns is
/// already more than any screen renders.
const MAX_MATRIX_WEEKS: usize = 26;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /timesheets/{id}/approve` and `.../reject`.
#[derive(Debug, Deserialize, Default)]
pub struct ReviewRequest {
    /// Optional for approval, required (non-blank) for rejection.
    pub comments: Option<String>,
}

/// Query string for `GET /timesheets/status-matrix`.
#[derive(Debug, Deserialize)]
pub struct MatrixQuery {
    pub weeks: Option<usize>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/timesheets/current
///
/// The actor's timesheet for the current week, created as DRAFT when it
/// does not exist yet.
pub async fn current(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<TimesheetDetail>> {
    let week = period::period_for(chrono::Utc::now().date_naive());
    read_or_create(&state, user.user_id, week).await
}

/// GET /api/v1/timesheets/week/{date}
///
/// The actor's timesheet for the week containing `date` (any day of the
/// week works, not just the Monday), created as DRAFT when missing.
pub async fn week(
    State(state): State<AppState>,
    user: AuthUser,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<TimesheetDetail>> {
    let week = period::period_for(date);
    read_or_create(&state, user.user_id, week).await
}

/// GET /api/v1/timesheets/pending
///
/// SUBMITTED timesheets of the calling manager's direct reports, oldest
/// submission first, each with its entries and the owner's identity.
pub async fn pending(
    State(state): State<AppState>,
    RequireManager(manager): RequireManager,
) -> AppResult<Json<DataResponse<Vec<PendingTimesheet>>>> {
    let rows = TimesheetRepo::list_pending_for_manager(&state.pool, manager.user_id).await?;

    let mut sheets = Vec::with_capacity(rows.len());
    for row in rows {
        let (timesheet, owner) = row.into_parts();
        let entries = TimeEntryRepo::list_for_timesheet(&state.pool, timesheet.id).await?;
        let total_hours = TimeEntryRepo::total_hours(&state.pool, timesheet.id).await?;
        sheets.push(PendingTimesheet {
            timesheet,
            user: owner,
            entries,
            total_hours,
        });
    }

    Ok(Json(DataResponse { data: sheets }))
}

/// GET /api/v1/timesheets/status-matrix?weeks=N
///
/// Dense (direct report x week) grid of submission statuses, newest week
/// first. `weeks` defaults to 8 and is clamped to 1..=26.
pub async fn status_matrix(
    State(state): State<AppState>,
    RequireManager(manager): RequireManager,
    Query(query): Query<MatrixQuery>,
) -> AppResult<Json<StatusMatrix>> {
    let count = query
        .weeks
        .unwrap_or(DEFAULT_MATRIX_WEEKS)
        .clamp(1, MAX_MATRIX_WEEKS);

    let employees = UserRepo::direct_reports(&state.pool, manager.user_id).await?;
    let weeks = period::recent_weeks(chrono::Utc::now().date_naive(), count);

    // Weeks are newest first, so the last element bounds the query.
    let oldest_week = weeks.last().map(|w| w.start).unwrap_or_default();
    let user_ids: Vec<DbId> = employees.iter().map(|e| e.id).collect();
    let sheets = TimesheetRepo::statuses_since(&state.pool, &user_ids, oldest_week).await?;

    Ok(Json(reports::status_matrix(employees, weeks, &sheets)))
}

/// PUT /api/v1/timesheets/{id}/submit
///
/// Owner-only. DRAFT -> SUBMITTED.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Timesheet>> {
    let sheet = find_sheet(&state, id).await?;
    authz::can_submit(&user.actor(), sheet.user_id)?;
    sheet.status.apply(TimesheetAction::Submit)?;

    let sheet = TimesheetRepo::set_submitted(&state.pool, id).await?;
    tracing::info!(
        timesheet_id = sheet.id,
        user_id = sheet.user_id,
        week_start = %sheet.week_start_date,
        "Submitted timesheet"
    );
    Ok(Json(sheet))
}

/// PUT /api/v1/timesheets/{id}/approve
///
/// Owner's manager or an admin. SUBMITTED -> APPROVED; comments optional.
pub async fn approve(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<Timesheet>> {
    let sheet = find_sheet(&state, id).await?;
    let owner = find_owner(&state, &sheet).await?;
    authz::can_review(&user.actor(), owner.manager_id)?;
    sheet.status.apply(TimesheetAction::Approve)?;

    let sheet =
        TimesheetRepo::set_approved(&state.pool, id, user.user_id, input.comments.as_deref())
            .await?;
    tracing::info!(
        timesheet_id = sheet.id,
        user_id = sheet.user_id,
        approver_id = user.user_id,
        "Approved timesheet"
    );
    Ok(Json(sheet))
}

/// PUT /api/v1/timesheets/{id}/reject
///
/// Owner's manager or an admin. SUBMITTED -> REJECTED; a non-blank
/// comment is mandatory so the employee knows what to fix.
pub async fn reject(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<Timesheet>> {
    let sheet = find_sheet(&state, id).await?;
    let owner = find_owner(&state, &sheet).await?;
    authz::can_review(&user.actor(), owner.manager_id)?;
    sheet.status.apply(TimesheetAction::Reject)?;
    validate_rejection_comment(input.comments.as_deref())?;

    let comments = input.comments.as_deref().unwrap_or_default();
    let sheet = TimesheetRepo::set_rejected(&state.pool, id, comments).await?;
    tracing::info!(
        timesheet_id = sheet.id,
        user_id = sheet.user_id,
        reviewer_id = user.user_id,
        "Rejected timesheet"
    );
    Ok(Json(sheet))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read-or-create the sheet for one week and attach its entries.
async fn read_or_create(
    state: &AppState,
    user_id: DbId,
    week: WeekPeriod,
) -> AppResult<Json<TimesheetDetail>> {
    let (timesheet, _created) = TimesheetRepo::find_or_create(&state.pool, user_id, week).await?;
    let entries = TimeEntryRepo::list_for_timesheet(&state.pool, timesheet.id).await?;
    let total_hours = TimeEntryRepo::total_hours(&state.pool, timesheet.id).await?;
    Ok(Json(TimesheetDetail {
        timesheet,
        entries,
        total_hours,
    }))
}

async fn find_sheet(state: &AppState, id: DbId) -> AppResult<Timesheet> {
    TimesheetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Timesheet",
            id,
        }))
}

/// The sheet owner's user row, for the manager-chain check.
async fn find_owner(
    state: &AppState,
    sheet: &Timesheet,
) -> AppResult<tempo_db::models::user::User> {
    UserRepo::find_by_id(&state.pool, sheet.user_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Timesheet {} references missing user {}",
                sheet.id, sheet.user_id
            ))
        })
}
