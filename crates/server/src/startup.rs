use std::{net::SocketAddr, path::Path};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;
use service::{file::employee_store::EmployeeStore, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Wire the store and router for a given configuration.
pub fn build_app(cfg: &AppConfig) -> Router {
    let employees = EmployeeStore::new(cfg.storage.employees_file.clone());
    let state = ServerState { employees };
    routes::build_router(state, &cfg.server.frontend_dir, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let data_dir = cfg.storage.employees_file.parent().unwrap_or(Path::new(""));
    runtime::ensure_env(&cfg.server.frontend_dir, data_dir).await?;

    let app = build_app(&cfg);

    let addr = bind_addr(&cfg)?;
    info!(%addr, employees_file = %cfg.storage.employees_file.display(), "starting employee directory");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("employee directory stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => {
            // without a signal handler, serve until the process is killed
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
