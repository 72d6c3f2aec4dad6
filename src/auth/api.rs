//! Authentication API Endpoints
//! Mission: Registration, login, logout, and session introspection

use crate::api::error::{ApiError, FieldError};
use crate::auth::{
    jwt::JwtHandler,
    middleware::locate_token,
    models::{Claims, Department, LoginRequest, LoginResponse, RegisterRequest, Role},
    user_store::{CreateUserError, NewUser, UserStore},
};
use crate::config::TokenTransport;
use axum::{extract::State, http::HeaderMap, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt: Arc<JwtHandler>,
    pub transport: TokenTransport,
    pub default_registration_role: Role,
}

impl AuthState {
    pub fn new(
        user_store: Arc<UserStore>,
        jwt: Arc<JwtHandler>,
        transport: TokenTransport,
        default_registration_role: Role,
    ) -> Self {
        Self {
            user_store,
            jwt,
            transport,
            default_registration_role,
        }
    }
}

fn validate_registration(payload: &RegisterRequest) -> Result<Department, ApiError> {
    let mut fields = Vec::new();

    if payload.username.trim().is_empty() {
        fields.push(FieldError::new("username", "Must be a non-empty string"));
    }
    if payload.first_name.trim().is_empty() {
        fields.push(FieldError::new("firstName", "Must be a non-empty string"));
    }
    if payload.last_name.trim().is_empty() {
        fields.push(FieldError::new("lastName", "Must be a non-empty string"));
    }
    if payload.password.is_empty() {
        fields.push(FieldError::new("password", "Must be a non-empty string"));
    }

    let department = Department::from_str(&payload.department);
    if department.is_none() {
        fields.push(FieldError::new(
            "department",
            "Must be one of HR, IT, Finance",
        ));
    }

    match department {
        Some(department) if fields.is_empty() => Ok(department),
        _ => Err(ApiError::Validation(fields)),
    }
}

/// Register endpoint - POST /register
///
/// The granted role is fixed by server policy
/// (`DEFAULT_REGISTRATION_ROLE`), never taken from the payload.
pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    let department = validate_registration(&payload)?;

    let user = state
        .user_store
        .create(NewUser {
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
            password: payload.password,
            role: state.default_registration_role,
            department,
        })
        .map_err(|e| match e {
            CreateUserError::UsernameTaken => {
                ApiError::Conflict("Username already exists".to_string())
            }
            CreateUserError::Other(e) => ApiError::Internal(e),
        })?;

    info!("✅ Registered {} ({})", user.username, user.role.as_str());

    Ok(Json(json!({ "success": true })))
}

/// Login endpoint - POST /login
///
/// In cookie transport mode, also sets the `httpOnly` `token` cookie
/// and a readable `role` cookie for the frontend.
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let user = state
        .user_store
        .find_by_username(&payload.username)
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = state
        .user_store
        .verify_password(&payload.username, &payload.password)
        .map_err(ApiError::Internal)?;

    if !valid {
        warn!("❌ Failed login attempt: {}", payload.username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .jwt
        .issue(&user.username, user.role, user.department)
        .map_err(ApiError::Internal)?;

    info!("🔐 Login successful: {} ({})", user.username, user.role.as_str());

    let jar = match state.transport {
        TokenTransport::Cookie => {
            let mut token_cookie = Cookie::new("token", token.clone());
            token_cookie.set_http_only(true);
            token_cookie.set_path("/");

            let mut role_cookie = Cookie::new("role", user.role.as_str().to_string());
            role_cookie.set_path("/");

            jar.add(token_cookie).add(role_cookie)
        }
        TokenTransport::Bearer => jar,
    };

    Ok((jar, Json(LoginResponse { token })))
}

/// Logout endpoint - POST /logout
///
/// Clears the session cookies in cookie mode. Bearer tokens carry no
/// server-side session state, so there is nothing else to tear down.
pub async fn logout(State(state): State<AuthState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = match state.transport {
        TokenTransport::Cookie => {
            let mut token_cookie = Cookie::new("token", "");
            token_cookie.set_path("/");
            let mut role_cookie = Cookie::new("role", "");
            role_cookie.set_path("/");
            jar.remove(token_cookie).remove(role_cookie)
        }
        TokenTransport::Bearer => jar,
    };

    (jar, Json(json!({ "success": true })))
}

/// Session introspection - GET /user/info
pub async fn user_info(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}

/// Example protected route - GET /protected
pub async fn protected(Extension(claims): Extension<Claims>) -> Json<Value> {
    Json(json!({
        "message": "This is a protected route",
        "user": claims,
    }))
}

/// Public welcome route - GET /
///
/// Greets the caller by claims when a valid token is supplied, and
/// falls back to a generic welcome otherwise. Never rejects.
pub async fn welcome(State(state): State<AuthState>, headers: HeaderMap) -> String {
    if let Some(token) = locate_token(&headers, state.transport) {
        if let Ok(claims) = state.jwt.verify(&token) {
            return format!(
                "Welcome, {}! Role: {}, Department: {}",
                claims.username,
                claims.role.as_str(),
                claims.department.as_str()
            );
        }
    }

    "Welcome to the Role-based Application System".to_string()
}
