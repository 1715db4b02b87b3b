//! Handlers for the `/reports` resource.
//!
//! Each handler fetches flat entry rows and hands them to the pure
//! builders in `tempo_core::reports`. No aggregation happens in SQL
//! beyond filtering, so all report shapes agree on the same input rows.

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tempo_core::reports::{
    self, EmployeeBreakdown, EntryRow, ProjectBreakdown, Summary,
};
use tempo_core::types::DbId;
use tempo_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query string for the flat project-hours listing. Every filter is
/// optional; date bounds are inclusive.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: Option<DbId>,
    pub user_id: Option<DbId>,
}

/// Query string for the project -> employee breakdown: an optional
/// project scope on top of the date range.
#[derive(Debug, Deserialize)]
pub struct ProjectBreakdownQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: Option<DbId>,
}

/// Query string for the employee -> project breakdown: an optional
/// employee scope on top of the date range.
#[derive(Debug, Deserialize)]
pub struct EmployeeBreakdownQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub user_id: Option<DbId>,
}

/// Date range accepted by the summary. The summary always covers the
/// whole population; unknown query params are ignored, not applied.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /api/v1/reports/project-hours
///
/// Flat listing of entries with user, project, and sheet status, for
/// tables and CSV export.
pub async fn project_hours(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<DataResponse<Vec<EntryRow>>>> {
    let rows = ReportRepo::entry_rows(
        &state.pool,
        query.start_date,
        query.end_date,
        query.project_id,
        query.user_id,
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/reports/project-employee-breakdown
///
/// Hours grouped by project, then by employee, with per-entry drill-down.
/// Without a project filter the population is entries on active projects.
pub async fn project_employee_breakdown(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Query(query): Query<ProjectBreakdownQuery>,
) -> AppResult<Json<DataResponse<Vec<ProjectBreakdown>>>> {
    let rows = match query.project_id {
        Some(project_id) => {
            ReportRepo::entry_rows(
                &state.pool,
                query.start_date,
                query.end_date,
                Some(project_id),
                None,
            )
            .await?
        }
        None => {
            ReportRepo::entry_rows_active_projects(&state.pool, query.start_date, query.end_date)
                .await?
        }
    };
    Ok(Json(DataResponse {
        data: reports::project_employee_breakdown(&rows),
    }))
}

/// GET /api/v1/reports/employee-project-breakdown
///
/// Hours grouped by employee, then by project, with per-week subtotals
/// carrying the week's submission status.
pub async fn employee_project_breakdown(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Query(query): Query<EmployeeBreakdownQuery>,
) -> AppResult<Json<DataResponse<Vec<EmployeeBreakdown>>>> {
    let rows = ReportRepo::entry_rows(
        &state.pool,
        query.start_date,
        query.end_date,
        None,
        query.user_id,
    )
    .await?;
    Ok(Json(DataResponse {
        data: reports::employee_project_breakdown(&rows),
    }))
}

/// GET /api/v1/reports/summary
///
/// Totals by project and by employee plus the grand total, each list
/// sorted by hours descending. Only the date range narrows the
/// population; project and user params are not honoured here.
pub async fn summary(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<DataResponse<Summary>>> {
    let rows = ReportRepo::entry_rows(&state.pool, query.start_date, query.end_date, None, None)
        .await?;
    Ok(Json(DataResponse {
        data: reports::summary(&rows),
    }))
}
