//! JWT Token Handler
//! Mission: Issue and verify signed session tokens

use crate::auth::models::{Claims, Department, Role};
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Why a token failed verification.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Signature does not match the configured secret.
    InvalidSignature,
    /// Token is past its expiry claim.
    Expired,
    /// Token could not be parsed as a JWT at all.
    Malformed,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::Expired => write!(f, "Token expired"),
            TokenError::Malformed => write!(f, "Malformed token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// JWT handler for token operations
pub struct JwtHandler {
    secret: String,
    ttl_hours: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key and token lifetime.
    pub fn new(secret: String, ttl_hours: i64) -> Self {
        Self { secret, ttl_hours }
    }

    /// Issue a signed token carrying identity, role, and department claims.
    pub fn issue(&self, username: &str, role: Role, department: Department) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::hours(self.ttl_hours))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            username: username.to_string(),
            role,
            department,
            exp: expiration,
        };

        debug!(
            "Issuing JWT for {} ({}), expires in {}h",
            username,
            role.as_str(),
            self.ttl_hours
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign JWT")
    }

    /// Verify a token and extract its claims. Pure: no side effects.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

        debug!("Validated JWT for {}", decoded.claims.username);

        Ok(decoded.claims)
    }
}
