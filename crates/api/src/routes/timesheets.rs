//! Route definitions for the `/timesheets` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::timesheets;
use crate::state::AppState;

/// Routes mounted at `/timesheets`.
///
/// ```text
/// GET /current           -> own sheet for the current week (read-or-create)
/// GET /week/{date}       -> own sheet for the week of date (read-or-create)
/// GET /pending           -> direct reports' SUBMITTED sheets (manager)
/// GET /status-matrix     -> dense status grid (manager/admin)
/// PUT /{id}/submit       -> DRAFT -> SUBMITTED (owner)
/// PUT /{id}/approve      -> SUBMITTED -> APPROVED (reviewer)
/// PUT /{id}/reject       -> SUBMITTED -> REJECTED (reviewer)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(timesheets::current))
        .route("/week/{date}", get(timesheets::week))
        .route("/pending", get(timesheets::pending))
        .route("/status-matrix", get(timesheets::status_matrix))
        .route("/{id}/submit", put(timesheets::submit))
        .route("/{id}/approve", put(timesheets::approve))
        .route("/{id}/reject", put(timesheets::reject))
}
