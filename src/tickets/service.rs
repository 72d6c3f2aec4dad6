//! Ticket Service
//! Mission: Orchestrate the ticket lifecycle, applying RBAC policy

use crate::api::error::ApiError;
use crate::auth::models::Claims;
use crate::rbac::{self, Action, Decision};
use crate::tickets::models::{
    SubmitTicketRequest, Ticket, TicketPatch, STATUS_CLOSED, STATUS_SUBMITTED,
};
use crate::tickets::store::TicketStore;
use std::sync::Arc;
use tracing::info;

/// Orchestrates creation, listing, update, and deletion of tickets.
/// Owns the store; every caller goes through the RBAC policy here.
pub struct TicketService {
    store: Arc<TicketStore>,
}

impl TicketService {
    pub fn new(store: Arc<TicketStore>) -> Self {
        Self { store }
    }

    /// Submit a new ticket, snapshotting the caller's identity, role,
    /// and department from their verified claims.
    pub fn submit(&self, claims: &Claims, req: SubmitTicketRequest) -> Ticket {
        let ticket = self.store.insert(Ticket {
            id: String::new(), // assigned by the store
            username: claims.username.clone(),
            role: claims.role,
            department: claims.department,
            theme: req.theme,
            category: req.category,
            description: req.description,
            status: STATUS_SUBMITTED.to_string(),
            answer: String::new(),
        });

        info!("🎫 Ticket {} submitted by {}", ticket.id, ticket.username);
        ticket
    }

    /// Fetch a single ticket by id. Any authenticated caller may fetch
    /// any ticket - single-ticket retrieval carries no ownership check.
    pub fn get(&self, id: &str) -> Result<Ticket, ApiError> {
        self.store
            .find_by_id(id)
            .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))
    }

    /// List tickets visible to the caller, filtered by completion.
    ///
    /// Moderators and admins see the full collection; everyone else
    /// sees only their own. `done=true` keeps closed tickets, anything
    /// else keeps the open ones.
    pub fn list(&self, claims: &Claims, done: bool) -> Vec<Ticket> {
        let mut tickets = if rbac::decide(claims.role, Action::ViewAllTickets) == Decision::Allow {
            self.store.all()
        } else {
            self.store.find_all_by_username(&claims.username)
        };

        tickets.retain(|t| (t.status == STATUS_CLOSED) == done);
        tickets
    }

    /// Apply a partial update to any ticket. Moderator/admin only.
    pub fn update(
        &self,
        claims: &Claims,
        id: &str,
        patch: &TicketPatch,
    ) -> Result<Ticket, ApiError> {
        if rbac::decide(claims.role, Action::UpdateAnyTicket) == Decision::Deny {
            return Err(ApiError::Forbidden);
        }

        let updated = self
            .store
            .update_by_id(id, patch)
            .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;

        info!("✏️  Ticket {} updated by {}", id, claims.username);
        Ok(updated)
    }

    /// Delete any ticket by id. Moderator/admin only.
    pub fn remove(&self, claims: &Claims, id: &str) -> Result<(), ApiError> {
        if rbac::decide(claims.role, Action::DeleteAnyTicket) == Decision::Deny {
            return Err(ApiError::Forbidden);
        }

        if !self.store.remove_by_id(id) {
            return Err(ApiError::NotFound("Application not found".to_string()));
        }

        info!("🗑️  Ticket {} deleted by {}", id, claims.username);
        Ok(())
    }
}
