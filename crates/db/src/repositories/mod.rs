//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod project_repo;
pub mod report_repo;
pub mod time_entry_repo;
pub mod timesheet_repo;
pub mod user_repo;

pub use assignment_repo::AssignmentRepo;
pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
pub use time_entry_repo::TimeEntryRepo;
pub use timesheet_repo::TimesheetRepo;
pub use user_repo::UserRepo;
