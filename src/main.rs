//! NeetCode 250 progress tracker backend
//!
//! - Axum JSON API: problem CRUD, completion stats, taxonomy
//! - Record store: in-memory (default) or MongoDB
//! - Static client fallback (STATIC_DIR, default ./static)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   TRACKER_CONFIG_PATH : path to TOML config (server/store sections + optional seed bank)
//!   MONGODB_URI         : enables the MongoDB store if present
//!   MONGODB_DB          : database name (default "neetcode")
//!   MONGODB_COLLECTION  : collection name (default "problems")
//!   STORE_BACKEND       : "memory" or "mongo", overrides the above
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod logic;
mod protocol;
mod routes;
mod seeds;
mod state;
mod stats;
mod store;
mod taxonomy;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = AppConfig::load();

  // A configured-but-unreachable store is fatal; there is nothing to serve without it.
  let state = AppState::from_config(&cfg.store).await?;
  seeds::seed_if_empty(&state, &cfg.problems).await;

  let app = build_router(Arc::new(state), &cfg.server.static_dir);

  let addr = SocketAddr::from(([0, 0, 0, 0], cfg.server.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "tracker", %addr, static_dir = %cfg.server.static_dir, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "tracker", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "tracker", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "tracker", "Shutdown signal received");
}
