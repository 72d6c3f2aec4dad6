//! TicketDesk Backend Library
//!
//! Role-based ticketing backend: users register and submit tickets,
//! moderators and admins review, update, and delete them. Exposes core
//! modules for use by the binary and integration tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;
pub mod rbac;
pub mod tickets;
