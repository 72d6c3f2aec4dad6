//! Ticket API Endpoints
//! Mission: HTTP surface for the ticket lifecycle

use crate::api::error::ApiError;
use crate::auth::models::Claims;
use crate::tickets::models::{SubmitTicketRequest, Ticket, TicketPatch};
use crate::tickets::service::TicketService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared ticket state
#[derive(Clone)]
pub struct TicketsState {
    pub service: Arc<TicketService>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `done=true` keeps closed tickets; anything else keeps open ones.
    pub done: Option<bool>,
}

/// List response wire shape: `{length, applications}`.
#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    pub length: usize,
    pub applications: Vec<Ticket>,
}

#[derive(Debug, Serialize)]
pub struct UpdateTicketResponse {
    pub success: bool,
    #[serde(rename = "updatedTicket")]
    pub updated_ticket: Ticket,
}

/// Submit a ticket - POST /ticket
pub async fn submit_ticket(
    State(state): State<TicketsState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitTicketRequest>,
) -> (StatusCode, Json<Ticket>) {
    let ticket = state.service.submit(&claims, payload);
    (StatusCode::CREATED, Json(ticket))
}

/// Fetch one ticket - GET /ticket/:id
pub async fn get_ticket(
    State(state): State<TicketsState>,
    Path(id): Path<String>,
) -> Result<Json<Ticket>, ApiError> {
    state.service.get(&id).map(Json)
}

/// List visible tickets - GET /tickets?done=true|false
pub async fn list_tickets(
    State(state): State<TicketsState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ListQuery>,
) -> Json<TicketListResponse> {
    let applications = state.service.list(&claims, params.done.unwrap_or(false));
    Json(TicketListResponse {
        length: applications.len(),
        applications,
    })
}

/// Partially update a ticket - PATCH /ticket/:id
pub async fn update_ticket(
    State(state): State<TicketsState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(patch): Json<TicketPatch>,
) -> Result<Json<UpdateTicketResponse>, ApiError> {
    let updated_ticket = state.service.update(&claims, &id, &patch)?;
    Ok(Json(UpdateTicketResponse {
        success: true,
        updated_ticket,
    }))
}

/// Delete a ticket - DELETE /ticket/:id
pub async fn delete_ticket(
    State(state): State<TicketsState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.service.remove(&claims, &id)?;
    Ok(Json(json!({ "success": true })))
}
