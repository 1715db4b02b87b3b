//! Handlers for the `/projects` resource, including assignments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tempo_core::error::CoreError;
use tempo_core::roles::Role;
use tempo_core::types::DbId;
use tempo_db::models::assignment::{AssignmentDetail, CreateAssignment, ProjectAssignment};
use tempo_db::models::project::{CreateProject, Project, UpdateProject};
use tempo_db::repositories::{AssignmentRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireManager};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Request body for `PUT /projects/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

/// Request body for `POST /projects/{id}/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub user_id: DbId,
    /// Defaults to today when omitted.
    pub start_date: Option<NaiveDate>,
    /// `None` = open-ended assignment.
    pub end_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// Active projects. Employees see only their current assignments;
/// managers and admins see everything active.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let today = chrono::Utc::now().date_naive();
    let projects = match user.role {
        Role::Employee => ProjectRepo::list_assigned(&state.pool, user.user_id, today).await?,
        Role::Manager | Role::Admin => ProjectRepo::list_active(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/assigned
///
/// The actor's own currently assigned active projects, for the weekly
/// grid's project picker. Same for every role.
pub async fn assigned(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let today = chrono::Utc::now().date_naive();
    let projects = ProjectRepo::list_assigned(&state.pool, user.user_id, today).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/assignments
///
/// Admin overview of every assignment with user and project identity.
pub async fn assignments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<AssignmentDetail>>>> {
    let assignments = AssignmentRepo::list_detailed(&state.pool).await?;
    Ok(Json(DataResponse { data: assignments }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.code.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project code must not be empty".into(),
        )));
    }

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            code: input.code,
            name: input.name,
            description: input.description,
        },
    )
    .await?;

    tracing::info!(project_id = project.id, code = %project.code, "Created project");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    let update = UpdateProject {
        code: input.code,
        name: input.name,
        description: input.description,
        active: input.active,
    };

    let project = ProjectRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(project_id = project.id, active = project.active, "Updated project");
    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/assign
///
/// Link a user to a project. A second assignment for the same pair is a
/// 409 from the unique constraint.
pub async fn assign(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Path(project_id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<(StatusCode, Json<ProjectAssignment>)> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    if !project.active {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot assign users to an inactive project".into(),
        )));
    }

    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    let assignment = AssignmentRepo::create(
        &state.pool,
        &CreateAssignment {
            user_id: input.user_id,
            project_id,
            start_date: input
                .start_date
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
            end_date: input.end_date,
        },
    )
    .await?;

    tracing::info!(
        user_id = assignment.user_id,
        project_id = assignment.project_id,
        "Assigned user to project"
    );
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// DELETE /api/v1/projects/{id}/assign/{user_id}
///
/// Remove a user's assignment. Returns 204 No Content.
pub async fn unassign(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    Path((project_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = AssignmentRepo::delete(&state.pool, user_id, project_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Assignment",
            id: project_id,
        }));
    }
    tracing::info!(user_id, project_id, "Removed project assignment");
    Ok(StatusCode::NO_CONTENT)
}
