//! TicketDesk - Role-based ticketing backend
//! Mission: Users submit tickets, moderators and admins review them

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticketdesk_backend::{
    api::create_router,
    auth::{AuthGate, AuthState, JwtHandler, UserStore},
    config::{Cli, Config},
    tickets::{TicketService, TicketStore, TicketsState},
};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let config = Config::from_cli(Cli::parse())?;

    info!("🎫 TicketDesk backend starting");
    info!(
        "🔧 Token transport: {}, registration role: {}, token TTL: {}h",
        config.token_transport.as_str(),
        config.default_registration_role.as_str(),
        config.token_ttl_hours
    );

    let user_store = Arc::new(UserStore::new(&config.db_path)?);
    if config.seed_demo_users {
        user_store.seed_demo_users()?;
    }
    info!("🔐 Credential store initialized at: {}", config.db_path);

    let jwt = Arc::new(JwtHandler::new(
        config.jwt_secret.clone(),
        config.token_ttl_hours,
    ));

    let auth_state = AuthState::new(
        user_store,
        jwt.clone(),
        config.token_transport,
        config.default_registration_role,
    );
    let gate = AuthGate {
        jwt,
        transport: config.token_transport,
    };
    let tickets = TicketsState {
        service: Arc::new(TicketService::new(Arc::new(TicketStore::new()))),
    };

    let app = create_router(auth_state, tickets, gate);

    let listener = TcpListener::bind(&config.addr).await?;
    info!("🎯 API server listening on {}", config.addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter overrides
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticketdesk_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
