//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tempo_core::error::CoreError;
use tempo_core::reports::EmployeeRef;
use tempo_core::roles::Role;
use tempo_core::types::DbId;
use tempo_db::models::user::{UpdateUser, UserResponse};
use tempo_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /users/{id}`.
///
/// `manager_id` is always applied, so sending `null` (or omitting the
/// field) clears the manager link.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub manager_id: Option<DbId>,
}

/// GET /api/v1/users
///
/// All users, for manager and admin views.
pub async fn list(
    State(state): State<AppState>,
    RequireManager(_user): RequireManager,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/employees
///
/// The calling manager's direct reports.
pub async fn employees(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
) -> AppResult<Json<DataResponse<Vec<EmployeeRef>>>> {
    let reports = UserRepo::direct_reports(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// PUT /api/v1/users/{id}
///
/// Admin-only user update, including role grants and manager assignment.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let update = UpdateUser {
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        role: input.role,
        manager_id: input.manager_id,
    };

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = user.id, role = %user.role, "Updated user");
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/users/{id}
///
/// Admin-only. Returns 204 No Content.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}
