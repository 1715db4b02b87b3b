//! Report builders.
//!
//! The aggregation engine is a set of pure functions over flat entry rows
//! fetched by the db crate. Each builder produces one report shape:
//!
//! - project -> employee breakdown (with per-entry drill-down)
//! - employee -> project breakdown (with per-week subtotals and status)
//! - submission status matrix over a manager's direct reports
//! - overall summary (totals by project and by employee)
//!
//! Consumers (CSV export, UI tables) only ever see these structured
//! aggregates; no formatting happens here.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::period::WeekPeriod;
use crate::status::TimesheetStatus;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Input rows (fetched by tempo-db)
// ---------------------------------------------------------------------------

/// One time entry joined with its user, project, and owning timesheet.
///
/// The single input shape for every report builder. `week_start` and
/// `status` come from the owning timesheet.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EntryRow {
    pub user_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub project_id: DbId,
    pub project_code: String,
    pub project_name: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub notes: Option<String>,
    pub week_start: NaiveDate,
    pub status: TimesheetStatus,
}

/// A direct report of the requesting manager (matrix row key).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EmployeeRef {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Status metadata of one existing timesheet (matrix cell source).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SheetStatusRow {
    pub user_id: DbId,
    pub week_start: NaiveDate,
    pub status: TimesheetStatus,
    pub submitted_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

/// Project identity carried in report output.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRef {
    pub id: DbId,
    pub code: String,
    pub name: String,
}

/// One entry in an employee's drill-down list.
#[derive(Debug, Clone, Serialize)]
pub struct EntryDetail {
    pub date: NaiveDate,
    pub hours: f64,
    pub notes: Option<String>,
}

/// One employee's share of a project.
#[derive(Debug, Serialize)]
pub struct ProjectEmployeeHours {
    pub employee: EmployeeRef,
    pub total_hours: f64,
    /// Raw entries in date order, for drill-down.
    pub entries: Vec<EntryDetail>,
}

/// One project with its per-employee breakdown.
#[derive(Debug, Serialize)]
pub struct ProjectBreakdown {
    pub project: ProjectRef,
    pub employees: Vec<ProjectEmployeeHours>,
    pub total_hours: f64,
}

/// Hours one employee logged on one project during one week.
#[derive(Debug, Serialize)]
pub struct WeekHours {
    pub week_start: NaiveDate,
    pub hours: f64,
    /// Approval status of the timesheet that week.
    pub status: TimesheetStatus,
}

/// One project inside an employee's breakdown.
#[derive(Debug, Serialize)]
pub struct EmployeeProjectHours {
    pub project: ProjectRef,
    pub total_hours: f64,
    /// Weekly subtotals in week order.
    pub weeks: Vec<WeekHours>,
}

/// One employee with their per-project breakdown.
#[derive(Debug, Serialize)]
pub struct EmployeeBreakdown {
    pub employee: EmployeeRef,
    pub projects: Vec<EmployeeProjectHours>,
    pub total_hours: f64,
}

/// Per-project total for the summary report.
#[derive(Debug, Serialize)]
pub struct ProjectTotal {
    pub project: ProjectRef,
    pub total_hours: f64,
}

/// Per-employee total for the summary report.
#[derive(Debug, Serialize)]
pub struct EmployeeTotal {
    pub employee: EmployeeRef,
    pub total_hours: f64,
}

/// Overall summary: totals by project, totals by employee, grand total.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// Sorted descending by hours.
    pub projects: Vec<ProjectTotal>,
    /// Sorted descending by hours.
    pub employees: Vec<EmployeeTotal>,
    pub total_hours: f64,
}

/// Status of one matrix cell. `NOT_CREATED` marks weeks for which no
/// timesheet row exists; cells are never omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatrixStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    NotCreated,
}

impl From<TimesheetStatus> for MatrixStatus {
    fn from(status: TimesheetStatus) -> Self {
        match status {
            TimesheetStatus::Draft => MatrixStatus::Draft,
            TimesheetStatus::Submitted => MatrixStatus::Submitted,
            TimesheetStatus::Approved => MatrixStatus::Approved,
            TimesheetStatus::Rejected => MatrixStatus::Rejected,
        }
    }
}

/// One cell of the status matrix.
#[derive(Debug, Serialize)]
pub struct MatrixCell {
    pub week_start: NaiveDate,
    pub status: MatrixStatus,
    pub submitted_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
}

/// One matrix row: an employee and their cell per requested week.
#[derive(Debug, Serialize)]
pub struct MatrixRow {
    pub employee: EmployeeRef,
    /// Aligned with the `weeks` list of the enclosing [`StatusMatrix`].
    pub cells: Vec<MatrixCell>,
}

/// Dense (direct report x week) grid of submission statuses.
#[derive(Debug, Serialize)]
pub struct StatusMatrix {
    /// Requested weeks, newest first.
    pub weeks: Vec<WeekPeriod>,
    pub matrix: Vec<MatrixRow>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn project_ref(row: &EntryRow) -> ProjectRef {
    ProjectRef {
        id: row.project_id,
        code: row.project_code.clone(),
        name: row.project_name.clone(),
    }
}

fn employee_ref(row: &EntryRow) -> EmployeeRef {
    EmployeeRef {
        id: row.user_id,
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        email: row.email.clone(),
    }
}

fn by_name(a: &EmployeeRef, b: &EmployeeRef) -> std::cmp::Ordering {
    // Last name ascending; first name breaks ties deterministically.
    (a.last_name.as_str(), a.first_name.as_str()).cmp(&(b.last_name.as_str(), b.first_name.as_str()))
}

/// Build the project -> employee breakdown.
///
/// Rows are grouped by project, then by employee within each project.
/// Projects with zero total hours are dropped; projects are ordered by
/// code, employees by last name (then first name), and each employee's
/// drill-down entries by date.
pub fn project_employee_breakdown(rows: &[EntryRow]) -> Vec<ProjectBreakdown> {
    let mut per_project: BTreeMap<DbId, (ProjectRef, BTreeMap<DbId, ProjectEmployeeHours>)> =
        BTreeMap::new();

    for row in rows {
        let (_, employees) = per_project
            .entry(row.project_id)
            .or_insert_with(|| (project_ref(row), BTreeMap::new()));
        let bucket = employees
            .entry(row.user_id)
            .or_insert_with(|| ProjectEmployeeHours {
                employee: employee_ref(row),
                total_hours: 0.0,
                entries: Vec::new(),
            });
        bucket.total_hours += row.hours;
        bucket.entries.push(EntryDetail {
            date: row.date,
            hours: row.hours,
            notes: row.notes.clone(),
        });
    }

    let mut breakdown: Vec<ProjectBreakdown> = per_project
        .into_values()
        .map(|(project, employees)| {
            let mut employees: Vec<ProjectEmployeeHours> = employees.into_values().collect();
            for emp in &mut employees {
                emp.entries.sort_by_key(|e| e.date);
            }
            employees.sort_by(|a, b| by_name(&a.employee, &b.employee));
            let total_hours = employees.iter().map(|e| e.total_hours).sum();
            ProjectBreakdown {
                project,
                employees,
                total_hours,
            }
        })
        .filter(|p| p.total_hours > 0.0)
        .collect();

    breakdown.sort_by(|a, b| a.project.code.cmp(&b.project.code));
    breakdown
}

/// Build the employee -> project breakdown (inverse view).
///
/// Rows are grouped by employee, then by project, then by the owning
/// timesheet's week. Each week carries that timesheet's status. Employees
/// with zero total hours are dropped; employees are ordered by last name,
/// projects by code, weeks by start date.
pub fn employee_project_breakdown(rows: &[EntryRow]) -> Vec<EmployeeBreakdown> {
    type WeekMap = BTreeMap<NaiveDate, WeekHours>;
    let mut per_employee: BTreeMap<DbId, (EmployeeRef, BTreeMap<DbId, (ProjectRef, WeekMap)>)> =
        BTreeMap::new();

    for row in rows {
        let (_, projects) = per_employee
            .entry(row.user_id)
            .or_insert_with(|| (employee_ref(row), BTreeMap::new()));
        let (_, weeks) = projects
            .entry(row.project_id)
            .or_insert_with(|| (project_ref(row), BTreeMap::new()));
        let week = weeks.entry(row.week_start).or_insert_with(|| WeekHours {
            week_start: row.week_start,
            hours: 0.0,
            status: row.status,
        });
        week.hours += row.hours;
    }

    let mut breakdown: Vec<EmployeeBreakdown> = per_employee
        .into_values()
        .map(|(employee, projects)| {
            let mut projects: Vec<EmployeeProjectHours> = projects
                .into_values()
                .map(|(project, weeks)| {
                    let weeks: Vec<WeekHours> = weeks.into_values().collect();
                    let total_hours = weeks.iter().map(|w| w.hours).sum();
                    EmployeeProjectHours {
                        project,
                        total_hours,
                        weeks,
                    }
                })
                .collect();
            projects.sort_by(|a, b| a.project.code.cmp(&b.project.code));
            let total_hours = projects.iter().map(|p| p.total_hours).sum();
            EmployeeBreakdown {
                employee,
                projects,
                total_hours,
            }
        })
        .filter(|e| e.total_hours > 0.0)
        .collect();

    breakdown.sort_by(|a, b| by_name(&a.employee, &b.employee));
    breakdown
}

/// Build the overall summary: totals grouped by project and by employee,
/// each sorted descending by hours, plus the grand total.
pub fn summary(rows: &[EntryRow]) -> Summary {
    let mut projects: BTreeMap<DbId, ProjectTotal> = BTreeMap::new();
    let mut employees: BTreeMap<DbId, EmployeeTotal> = BTreeMap::new();
    let mut total_hours = 0.0;

    for row in rows {
        projects
            .entry(row.project_id)
            .or_insert_with(|| ProjectTotal {
                project: project_ref(row),
                total_hours: 0.0,
            })
            .total_hours += row.hours;
        employees
            .entry(row.user_id)
            .or_insert_with(|| EmployeeTotal {
                employee: employee_ref(row),
                total_hours: 0.0,
            })
            .total_hours += row.hours;
        total_hours += row.hours;
    }

    let mut projects: Vec<ProjectTotal> = projects.into_values().collect();
    projects.sort_by(|a, b| {
        b.total_hours
            .partial_cmp(&a.total_hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.project.code.cmp(&b.project.code))
    });

    let mut employees: Vec<EmployeeTotal> = employees.into_values().collect();
    employees.sort_by(|a, b| {
        b.total_hours
            .partial_cmp(&a.total_hours)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| by_name(&a.employee, &b.employee))
    });

    Summary {
        projects,
        employees,
        total_hours,
    }
}

/// Build the dense status matrix for a manager's direct reports.
///
/// Emits exactly `reports.len() * weeks.len()` cells: every (employee,
/// week) pair is present, with [`MatrixStatus::NotCreated`] filling the
/// weeks an employee has no timesheet row for. Rows follow the order of
/// `reports`; cells follow the order of `weeks`.
pub fn status_matrix(
    reports: Vec<EmployeeRef>,
    weeks: Vec<WeekPeriod>,
    sheets: &[SheetStatusRow],
) -> StatusMatrix {
    let matrix = reports
        .into_iter()
        .map(|employee| {
            let cells = weeks
                .iter()
                .map(|week| {
                    let sheet = sheets
                        .iter()
                        .find(|s| s.user_id == employee.id && s.week_start == week.start);
                    match sheet {
                        Some(s) => MatrixCell {
                            week_start: week.start,
                            status: s.status.into(),
                            submitted_at: s.submitted_at,
                            approved_at: s.approved_at,
                        },
                        None => MatrixCell {
                            week_start: week.start,
                            status: MatrixStatus::NotCreated,
                            submitted_at: None,
                            approved_at: None,
                        },
                    }
                })
                .collect();
            MatrixRow { employee, cells }
        })
        .collect();

    StatusMatrix { weeks, matrix }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::recent_weeks;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(
        user: (DbId, &str, &str),
        project: (DbId, &str),
        day: NaiveDate,
        hours: f64,
        status: TimesheetStatus,
    ) -> EntryRow {
        EntryRow {
            user_id: user.0,
            first_name: user.1.to_string(),
            last_name: user.2.to_string(),
            email: format!("{}@example.com", user.1.to_lowercase()),
            project_id: project.0,
            project_code: project.1.to_string(),
            project_name: format!("Project {}", project.1),
            date: day,
            hours,
            notes: None,
            week_start: crate::period::period_for(day).start,
            status,
        }
    }

    fn sample_rows() -> Vec<EntryRow> {
        let alice = (1, "Alice", "Zimmer");
        let bob = (2, "Bob", "Acker");
        let p1 = (10, "PROJ-001");
        let p2 = (20, "PROJ-002");
        vec![
            // Week of 2024-03-04.
            row(alice, p1, date(2024, 3, 4), 8.0, TimesheetStatus::Approved),
            row(alice, p1, date(2024, 3, 5), 4.0, TimesheetStatus::Approved),
            row(alice, p2, date(2024, 3, 5), 4.0, TimesheetStatus::Approved),
            row(bob, p1, date(2024, 3, 6), 6.0, TimesheetStatus::Submitted),
            // Week of 2024-03-11.
            row(alice, p1, date(2024, 3, 11), 7.5, TimesheetStatus::Draft),
        ]
    }

    #[test]
    fn test_project_breakdown_groups_and_sums() {
        let breakdown = project_employee_breakdown(&sample_rows());
        assert_eq!(breakdown.len(), 2);

        // Projects ordered by code.
        assert_eq!(breakdown[0].project.code, "PROJ-001");
        assert_eq!(breakdown[1].project.code, "PROJ-002");

        let p1 = &breakdown[0];
        assert_eq!(p1.total_hours, 25.5);
        // Employees ordered by last name: Acker before Zimmer.
        assert_eq!(p1.employees[0].employee.last_name, "Acker");
        assert_eq!(p1.employees[0].total_hours, 6.0);
        assert_eq!(p1.employees[1].employee.last_name, "Zimmer");
        assert_eq!(p1.employees[1].total_hours, 19.5);
        // Drill-down entries kept in date order.
        let dates: Vec<NaiveDate> = p1.employees[1].entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 3, 4), date(2024, 3, 5), date(2024, 3, 11)]
        );
    }

    #[test]
    fn test_employee_breakdown_groups_by_project_then_week() {
        let breakdown = employee_project_breakdown(&sample_rows());
        assert_eq!(breakdown.len(), 2);

        // Employees ordered by last name.
        assert_eq!(breakdown[0].employee.last_name, "Acker");
        let alice = &breakdown[1];
        assert_eq!(alice.employee.last_name, "Zimmer");
        assert_eq!(alice.total_hours, 23.5);

        // Projects ordered by code within the employee.
        assert_eq!(alice.projects[0].project.code, "PROJ-001");
        assert_eq!(alice.projects[1].project.code, "PROJ-002");

        // PROJ-001 split across two weeks, each carrying its status.
        let weeks = &alice.projects[0].weeks;
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].week_start, date(2024, 3, 4));
        assert_eq!(weeks[0].hours, 12.0);
        assert_eq!(weeks[0].status, TimesheetStatus::Approved);
        assert_eq!(weeks[1].week_start, date(2024, 3, 11));
        assert_eq!(weeks[1].hours, 7.5);
        assert_eq!(weeks[1].status, TimesheetStatus::Draft);
    }

    #[test]
    fn test_breakdowns_are_numerically_consistent() {
        let rows = sample_rows();
        let by_project = project_employee_breakdown(&rows);
        let by_employee = employee_project_breakdown(&rows);

        let raw_total: f64 = rows.iter().map(|r| r.hours).sum();
        let project_total: f64 = by_project.iter().map(|p| p.total_hours).sum();
        let employee_total: f64 = by_employee.iter().map(|e| e.total_hours).sum();
        assert_eq!(project_total, raw_total);
        assert_eq!(employee_total, raw_total);

        // Per-project sums across employees match the inverse view.
        for p in &by_project {
            let inverse: f64 = by_employee
                .iter()
                .flat_map(|e| &e.projects)
                .filter(|ep| ep.project.id == p.project.id)
                .map(|ep| ep.total_hours)
                .sum();
            assert_eq!(inverse, p.total_hours, "project {}", p.project.code);
        }
    }

    #[test]
    fn test_empty_input_yields_empty_reports() {
        assert!(project_employee_breakdown(&[]).is_empty());
        assert!(employee_project_breakdown(&[]).is_empty());
        let s = summary(&[]);
        assert!(s.projects.is_empty());
        assert!(s.employees.is_empty());
        assert_eq!(s.total_hours, 0.0);
    }

    #[test]
    fn test_summary_totals_and_descending_order() {
        let s = summary(&sample_rows());
        assert_eq!(s.total_hours, 29.5);

        assert_eq!(s.projects.len(), 2);
        assert_eq!(s.projects[0].project.code, "PROJ-001");
        assert_eq!(s.projects[0].total_hours, 25.5);
        assert_eq!(s.projects[1].total_hours, 4.0);
        assert!(s.projects[0].total_hours >= s.projects[1].total_hours);

        assert_eq!(s.employees[0].employee.last_name, "Zimmer");
        assert_eq!(s.employees[0].total_hours, 23.5);
        assert_eq!(s.employees[1].total_hours, 6.0);
    }

    #[test]
    fn test_matrix_is_dense_with_not_created_fill() {
        let today = date(2024, 6, 12);
        let weeks = recent_weeks(today, 4);
        let reports = vec![
            EmployeeRef {
                id: 1,
                first_name: "Alice".into(),
                last_name: "Zimmer".into(),
                email: "alice@example.com".into(),
            },
            EmployeeRef {
                id: 2,
                first_name: "Bob".into(),
                last_name: "Acker".into(),
                email: "bob@example.com".into(),
            },
        ];
        // Alice has a sheet only for the current week.
        let sheets = vec![SheetStatusRow {
            user_id: 1,
            week_start: weeks[0].start,
            status: TimesheetStatus::Submitted,
            submitted_at: None,
            approved_at: None,
        }];

        let matrix = status_matrix(reports, weeks, &sheets);

        // 2 direct reports x 4 weeks = 8 cells, no gaps.
        assert_eq!(matrix.weeks.len(), 4);
        assert_eq!(matrix.matrix.len(), 2);
        let cell_count: usize = matrix.matrix.iter().map(|r| r.cells.len()).sum();
        assert_eq!(cell_count, 8);

        let alice = &matrix.matrix[0];
        assert_eq!(alice.cells[0].status, MatrixStatus::Submitted);
        for cell in &alice.cells[1..] {
            assert_eq!(cell.status, MatrixStatus::NotCreated);
        }
        for cell in &matrix.matrix[1].cells {
            assert_eq!(cell.status, MatrixStatus::NotCreated);
        }

        // Cells align with the week columns.
        for row in &matrix.matrix {
            for (cell, week) in row.cells.iter().zip(&matrix.weeks) {
                assert_eq!(cell.week_start, week.start);
            }
        }
    }

    #[test]
    fn test_matrix_status_serializes_not_created() {
        let v = serde_json::to_value(MatrixStatus::NotCreated).unwrap();
        assert_eq!(v, "NOT_CREATED");
        assert_eq!(
            serde_json::to_value(MatrixStatus::Approved).unwrap(),
            "APPROVED"
        );
    }
}
