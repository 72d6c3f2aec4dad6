//! Ticket Models
//! Mission: Define the ticket record and its partial-update payload

use crate::auth::models::{Department, Role};
use serde::{Deserialize, Serialize};

/// Status a freshly submitted ticket starts in.
pub const STATUS_SUBMITTED: &str = "Submitted";
/// Status that marks a ticket as done for list filtering.
pub const STATUS_CLOSED: &str = "Closed";

/// A user-submitted ticket.
///
/// `username`, `role`, and `department` are a snapshot of the submitter
/// at submission time. `status` is free text beyond the two well-known
/// values so moderators can track intermediate states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub department: Department,
    pub theme: String,
    pub category: String,
    pub description: String,
    pub status: String,
    pub answer: String,
}

/// Ticket submission body. The submitter's identity comes from the
/// verified claims, never from the payload.
#[derive(Debug, Deserialize)]
pub struct SubmitTicketRequest {
    pub theme: String,
    pub category: String,
    pub description: String,
}

/// Partial update payload for PATCH.
///
/// Only the content fields are writable; the identity-bearing snapshot
/// fields (username, role, department) are deliberately absent from
/// this type, so a moderator cannot reassign a ticket via update.
/// Unknown JSON keys are dropped silently rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct TicketPatch {
    pub theme: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub answer: Option<String>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.answer.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_patch_keys_silently_ignored() {
        let patch: TicketPatch = serde_json::from_str(
            r#"{"status": "Closed", "bogus": 1, "username": "mallory", "role": "admin"}"#,
        )
        .unwrap();

        // The recognized key survives; identity-bearing and unknown
        // keys fall outside the allow-list and vanish.
        assert_eq!(patch.status.as_deref(), Some("Closed"));
        assert!(patch.theme.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_patch() {
        let patch: TicketPatch = serde_json::from_str(r#"{"whatever": true}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_ticket_serializes_wire_shape() {
        let ticket = Ticket {
            id: "1".to_string(),
            username: "alice".to_string(),
            role: Role::User,
            department: Department::It,
            theme: "t".to_string(),
            category: "c".to_string(),
            description: "d".to_string(),
            status: STATUS_SUBMITTED.to_string(),
            answer: String::new(),
        };

        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["role"], "user");
        assert_eq!(value["department"], "IT");
        assert_eq!(value["status"], "Submitted");
        assert_eq!(value["answer"], "");
    }
}
