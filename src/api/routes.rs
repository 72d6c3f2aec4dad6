//! Route assembly.
//!
//! One canonical route set: the duplicated/conflicting definitions the
//! original deployment spread across two server files are collapsed
//! here, with the divergent behaviors (token transport, registration
//! role) pushed into configuration.

use crate::auth::{api as auth_api, auth_middleware, AuthGate, AuthState};
use crate::middleware::request_logging;
use crate::tickets::{api as tickets_api, TicketsState};
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Create the API router
pub fn create_router(auth: AuthState, tickets: TicketsState, gate: AuthGate) -> Router {
    // Public routes: welcome, health, and the session endpoints.
    let public_routes = Router::new()
        .route("/", get(auth_api::welcome))
        .route("/health", get(health_check))
        .route("/register", post(auth_api::register))
        .route("/login", post(auth_api::login))
        .route("/logout", post(auth_api::logout))
        .with_state(auth);

    // Session introspection behind the auth gate.
    let session_routes = Router::new()
        .route("/user/info", get(auth_api::user_info))
        .route("/protected", get(auth_api::protected))
        .route_layer(middleware::from_fn_with_state(
            gate.clone(),
            auth_middleware,
        ));

    // Ticket lifecycle behind the auth gate; RBAC is applied by the
    // ticket service, the gate only establishes identity.
    let ticket_routes = Router::new()
        .route("/ticket", post(tickets_api::submit_ticket))
        .route(
            "/ticket/:id",
            get(tickets_api::get_ticket)
                .patch(tickets_api::update_ticket)
                .delete(tickets_api::delete_ticket),
        )
        .route("/tickets", get(tickets_api::list_tickets))
        .route_layer(middleware::from_fn_with_state(gate, auth_middleware))
        .with_state(tickets);

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(ticket_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
