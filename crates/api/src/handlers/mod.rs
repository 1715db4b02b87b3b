//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod projects;
pub mod reports;
pub mod time_entries;
pub mod timesheets;
pub mod users;
