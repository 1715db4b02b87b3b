//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tempo_core::types::{DbId, Timestamp};

/// Full project row from the `projects` table.
///
/// Inactive projects are excluded from pickers and new assignments but
/// stay visible in historical reports.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug)]
pub struct CreateProject {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing project. Only `Some` fields are applied.
#[derive(Debug)]
pub struct UpdateProject {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}
