//! Repository for the `project_assignments` table.

use sqlx::PgPool;
use tempo_core::types::DbId;

use crate::models::assignment::{AssignmentDetail, CreateAssignment, ProjectAssignment};

const COLUMNS: &str = "id, user_id, project_id, start_date, end_date, created_at";

/// Provides operations for project assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert a new assignment, returning the created row.
    ///
    /// The `uq_project_assignments_user_project` constraint rejects a
    /// second assignment for the same (user, project); re-assignment is
    /// delete-then-create.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssignment,
    ) -> Result<ProjectAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_assignments (user_id, project_id, start_date, end_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectAssignment>(&query)
            .bind(input.user_id)
            .bind(input.project_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// List all assignments with user and project identity, for the admin
    /// overview. Ordered by user last name, first name, project code.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<AssignmentDetail>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentDetail>(
            "SELECT
                a.id, a.user_id, u.first_name, u.last_name, u.email, u.role,
                a.project_id, p.code AS project_code, p.name AS project_name,
                p.active AS project_active, a.start_date, a.end_date
             FROM project_assignments a
             JOIN users u ON u.id = a.user_id
             JOIN projects p ON p.id = a.project_id
             ORDER BY u.last_name ASC, u.first_name ASC, p.code ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Remove the assignment linking a user to a project.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_assignments WHERE user_id = $1 AND project_id = $2")
                .bind(user_id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
