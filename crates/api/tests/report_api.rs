//! Integration tests for the report endpoints and the status matrix.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;
use tempo_core::roles::Role;
use tempo_core::types::DbId;
use tempo_db::models::project::CreateProject;
use tempo_db::repositories::ProjectRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_project(pool: &PgPool, code: &str) -> DbId {
    ProjectRepo::create(
        pool,
        &CreateProject {
            code: code.to_string(),
            name: format!("Project {code}"),
            description: None,
        },
    )
    .await
    .expect("project creation should succeed")
    .id
}

/// Log in, read-or-create the current sheet, and write one entry on its
/// first day. Returns the sheet id.
async fn log_hours(pool: &PgPool, email: &str, project_id: DbId, hours: f64) -> DbId {
    let token = common::login(common::build_test_app(pool.clone()), email).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/timesheets/current",
        &token,
    )
    .await;
    let sheet = body_json(response).await;
    let sheet_id = sheet["id"].as_i64().unwrap();
    let week_start: NaiveDate = sheet["week_start_date"].as_str().unwrap().parse().unwrap();

    let body = serde_json::json!({
        "timesheet_id": sheet_id,
        "project_id": project_id,
        "date": week_start,
        "hours": hours
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/time-entries",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    sheet_id
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

/// Every report endpoint requires MANAGER or ADMIN.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reports_forbidden_for_employees(pool: PgPool) {
    common::create_user(&pool, "emp@test.com", Role::Employee, None).await;
    let token = common::login(common::build_test_app(pool.clone()), "emp@test.com").await;

    for uri in [
        "/api/v1/reports/project-hours",
        "/api/v1/reports/project-employee-breakdown",
        "/api/v1/reports/employee-project-breakdown",
        "/api/v1/reports/summary",
        "/api/v1/timesheets/status-matrix",
    ] {
        let response = get_auth(common::build_test_app(pool.clone()), uri, &token).await;
        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "{uri} must be manager-only"
        );
    }
}

// ---------------------------------------------------------------------------
// Breakdowns and summary
// ---------------------------------------------------------------------------

/// The project -> employee breakdown groups hours per project and per
/// employee, with per-entry drill-down.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_employee_breakdown(pool: PgPool) {
    let manager = common::create_user(&pool, "mgr@test.com", Role::Manager, None).await;
    common::create_user(&pool, "a@test.com", Role::Employee, Some(manager.id)).await;
    common::create_user(&pool, "b@test.com", Role::Employee, Some(manager.id)).await;
    let acme = create_project(&pool, "ACME").await;

    log_hours(&pool, "a@test.com", acme, 8.0).await;
    log_hours(&pool, "b@test.com", acme, 6.5).await;

    let token = common::login(common::build_test_app(pool.clone()), "mgr@test.com").await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/reports/project-employee-breakdown",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let projects = json["data"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["project"]["code"], "ACME");
    assert_eq!(projects[0]["total_hours"], 14.5);

    let employees = projects[0]["employees"].as_array().unwrap();
    assert_eq!(employees.len(), 2);
    let hours: f64 = employees
        .iter()
        .map(|e| e["total_hours"].as_f64().unwrap())
        .sum();
    assert_eq!(hours, 14.5);
    assert!(employees[0]["entries"].is_array());
}

/// The employee -> project breakdown carries each week's submission
/// status on the weekly subtotal.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_employee_project_breakdown_week_status(pool: PgPool) {
    let manager = common::create_user(&pool, "mgr@test.com", Role::Manager, None).await;
    common::create_user(&pool, "a@test.com", Role::Employee, Some(manager.id)).await;
    let acme = create_project(&pool, "ACME").await;
    log_hours(&pool, "a@test.com", acme, 8.0).await;

    let token = common::login(common::build_test_app(pool.clone()), "mgr@test.com").await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/reports/employee-project-breakdown",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let employees = json["data"].as_array().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["employee"]["email"], "a@test.com");

    let projects = employees[0]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    let weeks = projects[0]["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0]["hours"], 8.0);
    assert_eq!(weeks[0]["status"], "DRAFT");
}

/// The summary sorts totals descending and reports a grand total.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_summary_totals(pool: PgPool) {
    let manager = common::create_user(&pool, "mgr@test.com", Role::Manager, None).await;
    common::create_user(&pool, "a@test.com", Role::Employee, Some(manager.id)).await;
    common::create_user(&pool, "b@test.com", Role::Employee, Some(manager.id)).await;
    let acme = create_project(&pool, "ACME").await;
    let beta = create_project(&pool, "BETA").await;

    log_hours(&pool, "a@test.com", acme, 3.0).await;
    log_hours(&pool, "b@test.com", beta, 7.0).await;

    let token = common::login(common::build_test_app(pool.clone()), "mgr@test.com").await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/reports/summary",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_hours"], 10.0);

    let projects = json["data"]["projects"].as_array().unwrap();
    assert_eq!(projects[0]["total_hours"], 7.0, "descending by hours");
    assert_eq!(projects[1]["total_hours"], 3.0);

    let employees = json["data"]["employees"].as_array().unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0]["total_hours"], 7.0);
}

/// The summary always covers the whole population: project and user
/// params in the query string do not narrow the totals.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_summary_ignores_entity_filters(pool: PgPool) {
    let manager = common::create_user(&pool, "mgr@test.com", Role::Manager, None).await;
    let a = common::create_user(&pool, "a@test.com", Role::Employee, Some(manager.id)).await;
    common::create_user(&pool, "b@test.com", Role::Employee, Some(manager.id)).await;
    let acme = create_project(&pool, "ACME").await;
    let beta = create_project(&pool, "BETA").await;

    log_hours(&pool, "a@test.com", acme, 3.0).await;
    log_hours(&pool, "b@test.com", beta, 7.0).await;

    let token = common::login(common::build_test_app(pool.clone()), "mgr@test.com").await;
    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/reports/summary?project_id={acme}&user_id={}", a.id),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_hours"], 10.0, "filters must not apply");
    assert_eq!(json["data"]["projects"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["employees"].as_array().unwrap().len(), 2);
}

/// The employee -> project breakdown scopes by employee only; a project
/// param in the query string is ignored.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_employee_breakdown_ignores_project_filter(pool: PgPool) {
    let manager = common::create_user(&pool, "mgr@test.com", Role::Manager, None).await;
    common::create_user(&pool, "a@test.com", Role::Employee, Some(manager.id)).await;
    let acme = create_project(&pool, "ACME").await;
    let beta = create_project(&pool, "BETA").await;

    log_hours(&pool, "a@test.com", acme, 8.0).await;
    log_hours(&pool, "a@test.com", beta, 2.0).await;

    let token = common::login(common::build_test_app(pool.clone()), "mgr@test.com").await;
    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/reports/employee-project-breakdown?project_id={beta}"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let employees = json["data"].as_array().unwrap();
    assert_eq!(employees.len(), 1);
    let projects = employees[0]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2, "both projects stay in scope");
    assert_eq!(employees[0]["total_hours"], 10.0);
}

/// The flat project-hours listing honours the project filter.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_hours_filtering(pool: PgPool) {
    let manager = common::create_user(&pool, "mgr@test.com", Role::Manager, None).await;
    common::create_user(&pool, "a@test.com", Role::Employee, Some(manager.id)).await;
    let acme = create_project(&pool, "ACME").await;
    let beta = create_project(&pool, "BETA").await;

    log_hours(&pool, "a@test.com", acme, 8.0).await;
    log_hours(&pool, "a@test.com", beta, 2.0).await;

    let token = common::login(common::build_test_app(pool.clone()), "mgr@test.com").await;
    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/reports/project-hours?project_id={acme}"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["project_code"], "ACME");
    assert_eq!(rows[0]["hours"], 8.0);
}

// ---------------------------------------------------------------------------
// Status matrix
// ---------------------------------------------------------------------------

/// The matrix is dense: every (direct report, week) pair gets a cell,
/// with NOT_CREATED filling the weeks that have no timesheet row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_matrix_is_dense(pool: PgPool) {
    let manager = common::create_user(&pool, "mgr@test.com", Role::Manager, None).await;
    common::create_user(&pool, "a@test.com", Role::Employee, Some(manager.id)).await;
    common::create_user(&pool, "b@test.com", Role::Employee, Some(manager.id)).await;
    let acme = create_project(&pool, "ACME").await;

    // Only employee A has a sheet, and only for the current week.
    log_hours(&pool, "a@test.com", acme, 8.0).await;

    let token = common::login(common::build_test_app(pool.clone()), "mgr@test.com").await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/timesheets/status-matrix?weeks=4",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let weeks = json["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 4);

    let matrix = json["matrix"].as_array().unwrap();
    assert_eq!(matrix.len(), 2, "one row per direct report");

    let total_cells: usize = matrix
        .iter()
        .map(|row| row["cells"].as_array().unwrap().len())
        .sum();
    assert_eq!(total_cells, 8, "2 reports x 4 weeks, no gaps");

    // Row order follows the employee listing; A's current week is DRAFT,
    // everything else NOT_CREATED.
    let a_cells = matrix[0]["cells"].as_array().unwrap();
    assert_eq!(a_cells[0]["status"], "DRAFT");
    for cell in &a_cells[1..] {
        assert_eq!(cell["status"], "NOT_CREATED");
    }
    for cell in matrix[1]["cells"].as_array().unwrap() {
        assert_eq!(cell["status"], "NOT_CREATED");
    }
}
