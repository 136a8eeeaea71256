//! Entry point for the `trove-gateway` HTTP server.

use std::sync::Arc;

use tracing::info;
use trove_gateway::{routes::create_router, state::AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("TROVE_LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_owned());

    let state = Arc::new(AppState::seeded());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "trove-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
