//! Capability table keyed by (role, resource, action).
//!
//! Every route handler consults this single table instead of repeating ad hoc
//! role checks. Data-dependent refinements (an assignee updating their own
//! target progress, an uploader deleting their own document, the last Owner
//! never being demoted) live in the owning service.

use super::workspaces_model::Role;
use serde::{Deserialize, Serialize};

/// Resources gated by workspace role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    Workspace,
    Member,
    Invitation,
    Team,
    Project,
    Task,
    Target,
    Document,
    Notification,
    Attendance,
    Report,
}

/// Actions a role may perform on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    /// Administrative operations beyond plain CRUD (role changes,
    /// workspace-wide summaries).
    Manage,
}

/// Returns whether `role` may perform `action` on `resource`.
pub fn role_allows(role: Role, resource: Resource, action: Action) -> bool {
    use Action::*;
    use Resource::*;

    match (resource, action) {
        // Everyone in the workspace can read its content.
        (_, Read) => true,

        // Workspace lifecycle: admins edit, only the Owner deletes or manages.
        (Workspace, Update) => role.is_admin(),
        (Workspace, Delete | Manage) => role == Role::Owner,
        (Workspace, Create) => false, // creation happens outside a workspace context

        // Membership: role changes are Owner-only, removal is admin-level.
        (Member, Manage | Update) => role == Role::Owner,
        (Member, Delete) => role.is_admin(),
        (Member, Create) => role.is_admin(),

        (Invitation, Create | Delete | Manage) => role.is_admin(),
        (Invitation, Update) => false,

        (Team, Create | Update | Delete | Manage) => role.is_admin(),

        (Project, Create | Update | Delete | Manage) => role.is_admin(),

        // Any member may open or work tasks; deletion stays admin-level
        // (the service additionally lets the creator delete their own).
        (Task, Create | Update) => true,
        (Task, Delete) => role.is_admin(),
        (Task, Manage) => role.is_admin(),

        // Targets are assigned by admins; assignee progress updates go
        // through a dedicated service operation.
        (Target, Create | Update | Delete | Manage) => role.is_admin(),

        (Document, Create) => true,
        (Document, Delete) => role.is_admin(),
        (Document, Update | Manage) => role.is_admin(),

        // Notifications are per-user; nothing beyond reading your own.
        (Notification, Update) => true, // mark read / act on own notifications
        (Notification, Create | Delete | Manage) => false,

        (Attendance, Create) => true, // clock in/out
        (Attendance, Update | Delete) => false,
        (Attendance, Manage) => role.is_admin(),

        // Self-export is special-cased by the handler; the table answers
        // for exporting someone else's report.
        (Report, Create | Manage) => role.is_admin(),
        (Report, Update | Delete) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_reads() {
        for role in [Role::Owner, Role::Admin, Role::Member] {
            assert!(role_allows(role, Resource::Task, Action::Read));
            assert!(role_allows(role, Resource::Target, Action::Read));
            assert!(role_allows(role, Resource::Document, Action::Read));
        }
    }

    #[test]
    fn member_cannot_administer_targets() {
        assert!(!role_allows(Role::Member, Resource::Target, Action::Create));
        assert!(!role_allows(Role::Member, Resource::Target, Action::Update));
        assert!(!role_allows(Role::Member, Resource::Target, Action::Delete));
        assert!(role_allows(Role::Admin, Resource::Target, Action::Create));
    }

    #[test]
    fn only_owner_deletes_workspace_or_changes_roles() {
        assert!(role_allows(Role::Owner, Resource::Workspace, Action::Delete));
        assert!(!role_allows(Role::Admin, Resource::Workspace, Action::Delete));
        assert!(role_allows(Role::Owner, Resource::Member, Action::Manage));
        assert!(!role_allows(Role::Admin, Resource::Member, Action::Manage));
    }

    #[test]
    fn members_clock_in_but_do_not_see_summaries() {
        assert!(role_allows(Role::Member, Resource::Attendance, Action::Create));
        assert!(!role_allows(Role::Member, Resource::Attendance, Action::Manage));
        assert!(role_allows(Role::Admin, Resource::Attendance, Action::Manage));
    }
}
