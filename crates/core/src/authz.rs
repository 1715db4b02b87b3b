//! Per-action capability checks.
//!
//! Authorization is decided here, once per action, from the acting user's
//! role and their relationship to the target (ownership or management
//! chain). Handlers call the check before touching any state, so a denial
//! never leaves a partial mutation behind.

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// The authenticated user an operation runs as.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

/// Only the timesheet's owner may edit its entries.
pub fn can_edit_entries(actor: &Actor, owner_id: DbId) -> Result<(), CoreError> {
    if actor.id == owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the timesheet owner may modify its entries".to_string(),
        ))
    }
}

/// Only the timesheet's owner may submit it for approval.
pub fn can_submit(actor: &Actor, owner_id: DbId) -> Result<(), CoreError> {
    if actor.id == owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the timesheet owner may submit it".to_string(),
        ))
    }
}

/// Approving or rejecting requires being the owner's manager, or ADMIN.
pub fn can_review(actor: &Actor, owner_manager_id: Option<DbId>) -> Result<(), CoreError> {
    if actor.role == Role::Admin || owner_manager_id == Some(actor.id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the owner's manager or an admin may review this timesheet".to_string(),
        ))
    }
}

/// Reports and the pending queue are for managers and admins.
pub fn can_view_reports(actor: &Actor) -> Result<(), CoreError> {
    match actor.role {
        Role::Manager | Role::Admin => Ok(()),
        Role::Employee => Err(CoreError::Forbidden(
            "Manager or Admin role required".to_string(),
        )),
    }
}
