//! Route definitions for the `/time-entries` resource.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::time_entries;
use crate::state::AppState;

/// Routes mounted at `/time-entries`.
///
/// ```text
/// POST   /        -> upsert one cell (owner)
/// POST   /batch   -> best-effort grid upsert (owner)
/// DELETE /{id}    -> delete (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(time_entries::upsert))
        .route("/batch", post(time_entries::batch))
        .route("/{id}", delete(time_entries::delete))
}
