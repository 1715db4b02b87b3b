//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`. All require MANAGER or ADMIN.
///
/// ```text
/// GET /project-hours                -> flat entry listing
/// GET /project-employee-breakdown   -> project -> employee rollup
/// GET /employee-project-breakdown   -> employee -> project rollup
/// GET /summary                      -> totals + grand total
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project-hours", get(reports::project_hours))
        .route(
            "/project-employee-breakdown",
            get(reports::project_employee_breakdown),
        )
        .route(
            "/employee-project-breakdown",
            get(reports::employee_project_breakdown),
        )
        .route("/summary", get(reports::summary))
}
