//! Authentication Middleware
//! Mission: Convert a raw request into verified claims, or reject it

use crate::api::error::ApiError;
use crate::auth::jwt::JwtHandler;
use crate::config::TokenTransport;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// State the auth gate needs: the verifier and the configured transport.
#[derive(Clone)]
pub struct AuthGate {
    pub jwt: Arc<JwtHandler>,
    pub transport: TokenTransport,
}

/// Locate the session token in a request per the configured transport.
///
/// Bearer mode reads `Authorization: Bearer <token>`; cookie mode reads
/// the `token` cookie. Exactly one transport is consulted - the two are
/// never mixed per-route.
pub fn locate_token(headers: &HeaderMap, transport: TokenTransport) -> Option<String> {
    match transport {
        TokenTransport::Bearer => headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|t| t.to_string()),
        TokenTransport::Cookie => headers
            .get("Cookie")
            .and_then(|h| h.to_str().ok())
            .and_then(|cookies| {
                cookies
                    .split(';')
                    .map(|pair| pair.trim())
                    .find_map(|pair| pair.strip_prefix("token="))
                    .map(|t| t.to_string())
            }),
    }
}

/// Auth gate middleware.
///
/// No token present: 401. Token present but failing verification: 403.
/// On success the decoded claims are attached to the request extensions
/// for downstream handlers.
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        locate_token(req.headers(), gate.transport).ok_or(ApiError::Unauthenticated)?;

    let claims = gate
        .jwt
        .verify(&token)
        .map_err(|_| ApiError::InvalidToken)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
