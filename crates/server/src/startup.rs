use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::{people::repository::JsonFilePeopleRepository, runtime};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router wired to the backing file named in `cfg`.
pub fn build_app(cfg: &AppConfig) -> Router {
    let repo = JsonFilePeopleRepository::new(cfg.storage.data_file.clone());
    routes::build_router(ServerState::new(repo), build_cors())
}

/// Completes on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only by process kill");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Serve `cfg` until `shutdown` completes.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    runtime::ensure_data_dir(&cfg.storage.data_file).await?;

    let app = build_app(&cfg);

    let bind_addr = cfg.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| StartupError::Bind { addr: bind_addr.clone(), source })?;
    let addr: SocketAddr = listener
        .local_addr()
        .map_err(|source| StartupError::Bind { addr: bind_addr, source })?;
    info!(%addr, data_file = %cfg.storage.data_file.display(), "people registry listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    info!("server stopped");
    Ok(())
}

/// Public entry: run the HTTP server on an already resolved config until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_with_config(cfg, shutdown_signal()).await?;
    Ok(())
}
