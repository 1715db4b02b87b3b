//! User role enumeration.
//!
//! Stored in PostgreSQL as the `user_role` enum type (see the schema
//! migration). Authorization decisions never match on raw role strings;
//! they go through the capability checks in [`crate::authz`].

use serde::{Deserialize, Serialize};

/// The three roles the system distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Logs time and submits their own weekly timesheets.
    Employee,
    /// Approves or rejects submitted timesheets of direct reports.
    Manager,
    /// Full access, including user and project administration.
    Admin,
}

impl Role {
    /// Stable uppercase name, matching both the database enum and the
    /// JSON representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_json_representation_is_uppercase() {
        assert_eq!(serde_json::to_value(Role::Employee).unwrap(), "EMPLOYEE");
        assert_eq!(serde_json::to_value(Role::Manager).unwrap(), "MANAGER");
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "ADMIN");
    }

    #[test]
    fn test_role_round_trips_through_json() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            let json = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }
}
