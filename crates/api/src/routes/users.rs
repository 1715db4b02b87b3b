//! Route definitions for the `/users` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /            -> list (manager/admin)
/// GET    /employees   -> direct reports (manager/admin)
/// PUT    /{id}        -> update (admin only)
/// DELETE /{id}        -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/employees", get(users::employees))
        .route("/{id}", put(users::update).delete(users::delete))
}
