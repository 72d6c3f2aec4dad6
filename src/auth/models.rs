//! Authentication Models
//! Mission: Define user, role, and session claim data structures

use serde::{Deserialize, Serialize};

/// User account record, owned by the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role: Role,
    pub department: Department,
    pub created_at: String,
}

/// User roles for RBAC
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User, // Submit and view own tickets
    #[serde(rename = "moderator")]
    Moderator, // Review, update, delete any ticket
    #[serde(rename = "admin")]
    Admin, // Same ticket powers as moderator
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "moderator" => Some(Role::Moderator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Departments a user (and therefore a ticket) belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Department {
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "Finance")]
    Finance,
}

impl Department {
    pub fn as_str(&self) -> &str {
        match self {
            Department::Hr => "HR",
            Department::It => "IT",
            Department::Finance => "Finance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "HR" => Some(Department::Hr),
            "IT" => Some(Department::It),
            "Finance" => Some(Department::Finance),
            _ => None,
        }
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: Role,
    pub department: Department,
    pub exp: usize, // expiration timestamp
}

/// Registration request body. Unknown department strings are rejected
/// by the handler with a field-level validation error, so the wire type
/// keeps `department` as a plain string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub department: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}
