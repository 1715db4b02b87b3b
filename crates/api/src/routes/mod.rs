pub mod auth;
pub mod health;
pub mod projects;
pub mod reports;
pub mod time_entries;
pub mod timesheets;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/me                                own profile (requires auth)
///
/// /users                                  list (manager/admin)
/// /users/employees                        direct reports (manager/admin)
/// /users/{id}                             update, delete (admin only)
///
/// /projects                               list active (scoped by role), create (admin)
/// /projects/assigned                      own current assignments
/// /projects/assignments                   all assignments (admin only)
/// /projects/{id}                          update (admin only)
/// /projects/{id}/assign                   assign user (manager/admin, POST)
/// /projects/{id}/assign/{user_id}         unassign user (manager/admin, DELETE)
///
/// /timesheets/current                     own sheet, current week (read-or-create)
/// /timesheets/week/{date}                 own sheet, week of date (read-or-create)
/// /timesheets/pending                     direct reports' SUBMITTED sheets (manager)
/// /timesheets/status-matrix               dense status grid (manager/admin, ?weeks=N)
/// /timesheets/{id}/submit                 DRAFT -> SUBMITTED (owner, PUT)
/// /timesheets/{id}/approve                SUBMITTED -> APPROVED (reviewer, PUT)
/// /timesheets/{id}/reject                 SUBMITTED -> REJECTED (reviewer, PUT)
///
/// /time-entries                           upsert one cell (owner, POST)
/// /time-entries/batch                     best-effort grid upsert (owner, POST)
/// /time-entries/{id}                      delete (owner, DELETE)
///
/// /reports/project-hours                  flat entry listing (manager/admin)
/// /reports/project-employee-breakdown     project -> employee rollup (manager/admin)
/// /reports/employee-project-breakdown     employee -> project rollup (manager/admin)
/// /reports/summary                        totals + grand total (manager/admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (register, login, me).
        .nest("/auth", auth::router())
        // User listing and admin user management.
        .nest("/users", users::router())
        // Projects and assignments.
        .nest("/projects", projects::router())
        // The weekly grid, approval workflow, and status matrix.
        .nest("/timesheets", timesheets::router())
        // Sparse per-day entry upserts.
        .nest("/time-entries", time_entries::router())
        // Aggregation reports.
        .nest("/reports", reports::router())
}
