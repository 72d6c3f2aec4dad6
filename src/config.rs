//! Runtime configuration.
//!
//! Every knob is settable via CLI flag or environment variable. The two
//! behaviors the original deployment left ambiguous - which transport
//! carries the session token, and which role self-registration grants -
//! are explicit configuration here rather than per-route accidents.

use crate::auth::models::Role;
use anyhow::{bail, Result};
use clap::Parser;

/// Where the auth gate looks for the session token. One canonical
/// transport per deployment; header and cookie sourcing are never mixed
/// per-route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTransport {
    /// `Authorization: Bearer <token>` header.
    Bearer,
    /// `httpOnly` cookie named `token` (login also sets a readable
    /// `role` cookie for the frontend).
    Cookie,
}

impl TokenTransport {
    pub fn as_str(&self) -> &str {
        match self {
            TokenTransport::Bearer => "bearer",
            TokenTransport::Cookie => "cookie",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bearer" => Some(TokenTransport::Bearer),
            "cookie" => Some(TokenTransport::Cookie),
            _ => None,
        }
    }
}

/// Command-line interface. Every flag falls back to an environment
/// variable, so a plain `.env` deployment needs no arguments.
#[derive(Debug, Parser)]
#[command(name = "ticketdesk", about = "Role-based ticketing backend")]
pub struct Cli {
    /// Address the HTTP server binds to.
    #[arg(long, env = "TICKETDESK_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: String,

    /// Path to the SQLite credential store.
    #[arg(long, env = "AUTH_DB_PATH", default_value = "ticketdesk_auth.db")]
    pub db_path: String,

    /// Secret used to sign session tokens.
    #[arg(
        long,
        env = "JWT_SECRET",
        hide_env_values = true,
        default_value = "dev-secret-change-in-production-minimum-32-characters"
    )]
    pub jwt_secret: String,

    /// Session token lifetime in hours.
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value_t = 24)]
    pub token_ttl_hours: i64,

    /// Session token transport: "bearer" or "cookie".
    #[arg(long, env = "TOKEN_TRANSPORT", default_value = "bearer")]
    pub token_transport: String,

    /// Role granted on self-registration: "user" or "admin".
    #[arg(long, env = "DEFAULT_REGISTRATION_ROLE", default_value = "user")]
    pub default_registration_role: String,

    /// Seed the demo accounts (user1/admin1/moderator1) at startup.
    #[arg(long, env = "SEED_DEMO_USERS", default_value_t = false)]
    pub seed_demo_users: bool,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub db_path: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub token_transport: TokenTransport,
    pub default_registration_role: Role,
    pub seed_demo_users: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let Some(token_transport) = TokenTransport::from_str(&cli.token_transport) else {
            bail!(
                "Invalid TOKEN_TRANSPORT '{}': expected 'bearer' or 'cookie'",
                cli.token_transport
            );
        };

        let Some(default_registration_role) = Role::from_str(&cli.default_registration_role)
        else {
            bail!(
                "Invalid DEFAULT_REGISTRATION_ROLE '{}'",
                cli.default_registration_role
            );
        };

        Ok(Self {
            addr: cli.addr,
            db_path: cli.db_path,
            jwt_secret: cli.jwt_secret,
            token_ttl_hours: cli.token_ttl_hours,
            token_transport,
            default_registration_role,
            seed_demo_users: cli.seed_demo_users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with(transport: &str, role: &str) -> Cli {
        Cli::parse_from([
            "ticketdesk",
            "--token-transport",
            transport,
            "--default-registration-role",
            role,
        ])
    }

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_cli(Cli::parse_from(["ticketdesk"])).unwrap();
        assert_eq!(config.token_transport, TokenTransport::Bearer);
        assert_eq!(config.default_registration_role, Role::User);
        assert_eq!(config.token_ttl_hours, 24);
        assert!(!config.seed_demo_users);
    }

    #[test]
    fn test_cookie_transport_and_admin_registration() {
        let config = Config::from_cli(cli_with("cookie", "admin")).unwrap();
        assert_eq!(config.token_transport, TokenTransport::Cookie);
        assert_eq!(config.default_registration_role, Role::Admin);
    }

    #[test]
    fn test_invalid_transport_rejected() {
        assert!(Config::from_cli(cli_with("carrier-pigeon", "user")).is_err());
    }

    #[test]
    fn test_invalid_registration_role_rejected() {
        assert!(Config::from_cli(cli_with("bearer", "superuser")).is_err());
    }
}
