//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO for patches where the entity supports them

pub mod assignment;
pub mod project;
pub mod time_entry;
pub mod timesheet;
pub mod user;
