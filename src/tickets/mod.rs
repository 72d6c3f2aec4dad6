//! Tickets Module
//! Mission: Ticket records, the in-memory store, and the lifecycle service

pub mod api;
pub mod models;
pub mod service;
pub mod store;

pub use api::TicketsState;
pub use service::TicketService;
pub use store::TicketStore;
