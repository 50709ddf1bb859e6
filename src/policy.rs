// Access policy.
//
// Every read or write of a record goes through [`authorize`]. Patients may
// only view or update their own account; providers may do anything to any
// account. The action menu is derived from the same table via
// [`actions_for`], so a menu entry can never exist for an action the
// policy would refuse.

use std::fmt;

use tracing::warn;

use crate::auth::Session;
use crate::error::AccessDenied;
use crate::model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewOwn,
    UpdateOwn,
    ViewAll,
    ViewOther,
    UpdateOther,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::ViewOwn,
        Action::UpdateOwn,
        Action::ViewAll,
        Action::ViewOther,
        Action::UpdateOther,
    ];

    /// Menu label shown in the action menu.
    pub fn label(&self) -> &'static str {
        match self {
            Action::ViewOwn => "View my records",
            Action::UpdateOwn => "Update my records",
            Action::ViewAll => "View all records",
            Action::ViewOther => "View a patient's records",
            Action::UpdateOther => "Update a patient's records",
        }
    }

    /// Whether the action targets an account other than the session's own.
    pub fn targets_other(&self) -> bool {
        matches!(self, Action::ViewOther | Action::UpdateOther)
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Action::UpdateOwn | Action::UpdateOther)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn role_allows(role: Role, action: Action) -> bool {
    match role {
        Role::Provider => true,
        Role::Patient => matches!(action, Action::ViewOwn | Action::UpdateOwn),
    }
}

/// May `session` perform `action` on the account at index `target`?
pub fn can_access(session: &Session, target: usize, action: Action) -> bool {
    match session.role {
        Role::Provider => true,
        Role::Patient => role_allows(Role::Patient, action) && target == session.account,
    }
}

pub fn authorize(session: &Session, target: usize, action: Action) -> Result<(), AccessDenied> {
    if can_access(session, target, action) {
        return Ok(());
    }
    warn!(
        "Denied {:?} on account {} for session on account {}",
        action, target, session.account
    );
    Err(AccessDenied {
        action: action.label().to_string(),
        target,
    })
}

/// Actions offered in the menu for `role`, in display order.
pub fn actions_for(role: Role) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|a| role_allows(role, *a))
        .collect()
}
