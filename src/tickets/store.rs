//! Ticket Store
//! Mission: Own the in-memory ticket collection behind one lock

use crate::tickets::models::{Ticket, TicketPatch};
use parking_lot::Mutex;

struct Inner {
    /// Monotonic id counter. Ids are never derived from collection
    /// length and never reused after deletion.
    next_id: u64,
    tickets: Vec<Ticket>,
}

/// In-memory ordered collection of tickets.
///
/// All mutations go through the single mutex, which serializes id
/// assignment and rules out lost updates under concurrent requests.
pub struct TicketStore {
    inner: Mutex<Inner>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 0,
                tickets: Vec::new(),
            }),
        }
    }

    /// Append a ticket, assigning the next decimal-string id ("1", "2", ...).
    /// Returns the stored ticket with its id filled in.
    pub fn insert(&self, mut ticket: Ticket) -> Ticket {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        ticket.id = inner.next_id.to_string();
        inner.tickets.push(ticket.clone());
        ticket
    }

    pub fn find_by_id(&self, id: &str) -> Option<Ticket> {
        let inner = self.inner.lock();
        inner.tickets.iter().find(|t| t.id == id).cloned()
    }

    pub fn find_all_by_username(&self, username: &str) -> Vec<Ticket> {
        let inner = self.inner.lock();
        inner
            .tickets
            .iter()
            .filter(|t| t.username == username)
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<Ticket> {
        self.inner.lock().tickets.clone()
    }

    /// Remove the first ticket matching `id`. Remaining tickets keep
    /// their ids - deletion never renumbers.
    pub fn remove_by_id(&self, id: &str) -> bool {
        let mut inner = self.inner.lock();
        match inner.tickets.iter().position(|t| t.id == id) {
            Some(pos) => {
                inner.tickets.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Overwrite the fields present in `patch` on the matching ticket.
    /// Absent fields are untouched; an empty patch is an idempotent
    /// no-op that still returns the ticket.
    pub fn update_by_id(&self, id: &str, patch: &TicketPatch) -> Option<Ticket> {
        let mut inner = self.inner.lock();
        let ticket = inner.tickets.iter_mut().find(|t| t.id == id)?;

        if let Some(theme) = &patch.theme {
            ticket.theme = theme.clone();
        }
        if let Some(category) = &patch.category {
            ticket.category = category.clone();
        }
        if let Some(description) = &patch.description {
            ticket.description = description.clone();
        }
        if let Some(status) = &patch.status {
            ticket.status = status.clone();
        }
        if let Some(answer) = &patch.answer {
            ticket.answer = answer.clone();
        }

        Some(ticket.clone())
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::{Department, Role};
    use crate::tickets::models::STATUS_SUBMITTED;

    fn draft(username: &str) -> Ticket {
        Ticket {
            id: String::new(),
            username: username.to_string(),
            role: Role::User,
            department: Department::Hr,
            theme: "theme".to_string(),
            category: "category".to_string(),
            description: "description".to_string(),
            status: STATUS_SUBMITTED.to_string(),
            answer: String::new(),
        }
    }

    #[test]
    fn test_ids_strictly_increasing_from_one() {
        let store = TicketStore::new();
        assert_eq!(store.insert(draft("alice")).id, "1");
        assert_eq!(store.insert(draft("bob")).id, "2");
        assert_eq!(store.insert(draft("alice")).id, "3");
    }

    #[test]
    fn test_deletion_does_not_renumber_or_reuse_ids() {
        let store = TicketStore::new();
        store.insert(draft("alice"));
        store.insert(draft("bob"));
        store.insert(draft("carol"));

        assert!(store.remove_by_id("2"));

        // Ticket "3" keeps its id.
        assert_eq!(store.find_by_id("3").unwrap().username, "carol");
        assert!(store.find_by_id("2").is_none());

        // The next insert does not resurrect "2".
        assert_eq!(store.insert(draft("dave")).id, "4");
    }

    #[test]
    fn test_remove_missing_id() {
        let store = TicketStore::new();
        store.insert(draft("alice"));
        assert!(!store.remove_by_id("99"));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_find_all_by_username() {
        let store = TicketStore::new();
        store.insert(draft("alice"));
        store.insert(draft("bob"));
        store.insert(draft("alice"));

        let mine = store.find_all_by_username("alice");
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|t| t.username == "alice"));
    }

    #[test]
    fn test_update_overwrites_only_present_fields() {
        let store = TicketStore::new();
        store.insert(draft("alice"));

        let patch = TicketPatch {
            status: Some("Closed".to_string()),
            answer: Some("Resolved.".to_string()),
            ..Default::default()
        };

        let updated = store.update_by_id("1", &patch).unwrap();
        assert_eq!(updated.status, "Closed");
        assert_eq!(updated.answer, "Resolved.");
        // Untouched fields survive.
        assert_eq!(updated.theme, "theme");
        assert_eq!(updated.username, "alice");
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let store = TicketStore::new();
        let original = store.insert(draft("alice"));

        let updated = store.update_by_id("1", &TicketPatch::default()).unwrap();
        assert_eq!(updated.status, original.status);
        assert_eq!(updated.theme, original.theme);
    }

    #[test]
    fn test_update_missing_id() {
        let store = TicketStore::new();
        assert!(store.update_by_id("1", &TicketPatch::default()).is_none());
    }
}
