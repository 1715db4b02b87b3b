//! Repository for the `projects` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use tempo_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, description, active, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (code, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a project by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active projects ordered by code.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE active ORDER BY code ASC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List active projects the user currently has an assignment for
    /// (end date NULL or not yet passed), ordered by code.
    pub async fn list_assigned(
        pool: &PgPool,
        user_id: DbId,
        today: NaiveDate,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects p
             WHERE p.active
               AND EXISTS (
                   SELECT 1 FROM project_assignments a
                   WHERE a.project_id = p.id
                     AND a.user_id = $1
                     AND (a.end_date IS NULL OR a.end_date >= $2)
               )
             ORDER BY p.code ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(today)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                active = COALESCE($5, active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }
}
