//! Route definitions for the `/projects` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                        -> list (role-scoped)
/// POST   /                        -> create (admin only)
/// GET    /assigned                -> own current assignments
/// GET    /assignments             -> all assignments (admin only)
/// PUT    /{id}                    -> update (admin only)
/// POST   /{id}/assign             -> assign user (manager/admin)
/// DELETE /{id}/assign/{user_id}   -> unassign user (manager/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route("/assigned", get(projects::assigned))
        .route("/assignments", get(projects::assignments))
        .route("/{id}", put(projects::update))
        .route("/{id}/assign", post(projects::assign))
        .route("/{id}/assign/{user_id}", delete(projects::unassign))
}
