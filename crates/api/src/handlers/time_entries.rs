//! Handlers for the `/time-entries` resource.
//!
//! Entries are stored sparsely: a day with zero hours has no row, so the
//! upsert treats `hours == 0` as "delete if present". All writes are
//! guarded by ownership and by the owning sheet being in DRAFT.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tempo_core::authz;
use tempo_core::error::CoreError;
use tempo_core::period::validate_date_in_week;
use tempo_core::types::DbId;
use tempo_db::models::time_entry::{CreateEntry, TimeEntry};
use tempo_db::models::timesheet::Timesheet;
use tempo_db::repositories::{ProjectRepo, TimeEntryRepo, TimesheetRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Most hours storable on one entry. A calendar day has no more.
const MAX_HOURS_PER_ENTRY: f64 = 24.0;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One upsert item, used for both `POST /time-entries` and the batch
/// endpoint.
#[derive(Debug, Deserialize)]
pub struct UpsertEntryRequest {
    pub timesheet_id: DbId,
    pub project_id: DbId,
    pub date: NaiveDate,
    pub hours: f64,
    pub notes: Option<String>,
}

/// Request body for `POST /time-entries/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub entries: Vec<UpsertEntryRequest>,
}

/// Outcome of a best-effort batch: what was written plus, per failed
/// item, its index and the reason.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub saved: Vec<TimeEntry>,
    pub failed: Vec<BatchFailure>,
}

/// One rejected batch item.
#[derive(Debug, Serialize)]
pub struct BatchFailure {
    /// Index into the request's `entries` array.
    pub index: usize,
    pub error: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/time-entries
///
/// Upsert one (project, date) cell of the actor's own DRAFT timesheet:
/// `hours > 0` creates or updates the entry, `hours == 0` deletes it
/// (no-op when absent). Returns the entry, or `data: null` after a
/// delete/no-op.
pub async fn upsert(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpsertEntryRequest>,
) -> AppResult<Json<DataResponse<Option<TimeEntry>>>> {
    let entry = upsert_one(&state, &user, &input).await?;
    Ok(Json(DataResponse { data: entry }))
}

/// POST /api/v1/time-entries/batch
///
/// Apply a whole grid of upserts best-effort: each item is validated and
/// written independently, and one bad cell does not roll back its
/// neighbours. Failures come back with their index and reason.
pub async fn batch(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<BatchRequest>,
) -> AppResult<Json<DataResponse<BatchOutcome>>> {
    let mut saved = Vec::new();
    let mut failed = Vec::new();

    for (index, item) in input.entries.iter().enumerate() {
        match upsert_one(&state, &user, item).await {
            Ok(Some(entry)) => saved.push(entry),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(index, error = %err, "Batch entry rejected");
                failed.push(BatchFailure {
                    index,
                    error: err.to_string(),
                });
            }
        }
    }

    Ok(Json(DataResponse {
        data: BatchOutcome { saved, failed },
    }))
}

/// DELETE /api/v1/time-entries/{id}
///
/// Delete one entry by id, under the same ownership and DRAFT guards as
/// the upsert. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let entry = TimeEntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Time entry",
            id,
        }))?;

    let sheet = owning_sheet(&state, entry.timesheet_id).await?;
    guard_mutable(&user, &sheet)?;

    TimeEntryRepo::delete(&state.pool, id).await?;
    tracing::info!(entry_id = id, timesheet_id = sheet.id, "Deleted time entry");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate and apply one upsert. Every check precedes the write.
async fn upsert_one(
    state: &AppState,
    user: &AuthUser,
    input: &UpsertEntryRequest,
) -> AppResult<Option<TimeEntry>> {
    let sheet = owning_sheet(state, input.timesheet_id).await?;
    guard_mutable(user, &sheet)?;

    if !(0.0..=MAX_HOURS_PER_ENTRY).contains(&input.hours) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Hours must be between 0 and {MAX_HOURS_PER_ENTRY}"
        ))));
    }
    validate_date_in_week(input.date, sheet.week_start_date)?;

    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let existing =
        TimeEntryRepo::find_by_cell(&state.pool, user.user_id, input.project_id, input.date)
            .await?;

    match existing {
        Some(entry) if input.hours == 0.0 => {
            // Zero hours = delete; zero-hour days are never stored.
            TimeEntryRepo::delete(&state.pool, entry.id).await?;
            Ok(None)
        }
        Some(entry) => {
            let updated =
                TimeEntryRepo::update(&state.pool, entry.id, input.hours, input.notes.as_deref())
                    .await?;
            Ok(Some(updated))
        }
        None if input.hours == 0.0 => Ok(None),
        None => {
            let created = TimeEntryRepo::create(
                &state.pool,
                &CreateEntry {
                    timesheet_id: sheet.id,
                    user_id: user.user_id,
                    project_id: input.project_id,
                    date: input.date,
                    hours: input.hours,
                    notes: input.notes.clone(),
                },
            )
            .await?;
            Ok(Some(created))
        }
    }
}

async fn owning_sheet(state: &AppState, timesheet_id: DbId) -> AppResult<Timesheet> {
    TimesheetRepo::find_by_id(&state.pool, timesheet_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Timesheet",
            id: timesheet_id,
        }))
}

/// Ownership + lifecycle guard shared by every entry mutation.
fn guard_mutable(user: &AuthUser, sheet: &Timesheet) -> Result<(), AppError> {
    authz::can_edit_entries(&user.actor(), sheet.user_id)?;
    if !sheet.status.allows_entry_mutation() {
        return Err(AppError::Core(CoreError::InvalidState(format!(
            "Cannot modify entries on a {} timesheet",
            sheet.status
        ))));
    }
    Ok(())
}
