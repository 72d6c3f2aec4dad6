//! RBAC Policy
//! Mission: Pure role/action decision table, no state, no side effects

use crate::auth::models::Role;

/// Actions the ticket service asks the policy about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateOwnTicket,
    ViewOwnTickets,
    ViewAllTickets,
    UpdateAnyTicket,
    DeleteAnyTicket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Decide whether `role` may perform `action`.
///
/// Own-ticket actions are open to every authenticated role; the
/// "any/all" actions are reserved for moderators and admins.
pub fn decide(role: Role, action: Action) -> Decision {
    match action {
        Action::CreateOwnTicket | Action::ViewOwnTickets => Decision::Allow,
        Action::ViewAllTickets | Action::UpdateAnyTicket | Action::DeleteAnyTicket => match role {
            Role::Admin | Role::Moderator => Decision::Allow,
            Role::User => Decision::Deny,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 3] = [Role::User, Role::Moderator, Role::Admin];

    #[test]
    fn test_own_ticket_actions_open_to_all_roles() {
        for role in ALL_ROLES {
            assert_eq!(decide(role, Action::CreateOwnTicket), Decision::Allow);
            assert_eq!(decide(role, Action::ViewOwnTickets), Decision::Allow);
        }
    }

    #[test]
    fn test_view_all_allowed_iff_moderator_or_admin() {
        for role in ALL_ROLES {
            let expected = if matches!(role, Role::Moderator | Role::Admin) {
                Decision::Allow
            } else {
                Decision::Deny
            };
            assert_eq!(decide(role, Action::ViewAllTickets), expected);
        }
    }

    #[test]
    fn test_plain_user_cannot_moderate() {
        assert_eq!(decide(Role::User, Action::UpdateAnyTicket), Decision::Deny);
        assert_eq!(decide(Role::User, Action::DeleteAnyTicket), Decision::Deny);
    }

    #[test]
    fn test_moderator_and_admin_have_identical_ticket_powers() {
        for action in [
            Action::ViewAllTickets,
            Action::UpdateAnyTicket,
            Action::DeleteAnyTicket,
        ] {
            assert_eq!(decide(Role::Moderator, action), decide(Role::Admin, action));
        }
    }
}
