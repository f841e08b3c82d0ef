use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use service::song::{repo::seaorm::SeaOrmSongRepository, repository::SongRepository};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Composition root: pool → migrations → repository → service → router
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;

    info!(event = "migrate", "applying migrations");
    migration::Migrator::up(&db, None).await?;

    let repo: Arc<dyn SongRepository> = Arc::new(SeaOrmSongRepository::new(db));
    let state = ServerState::new(repo, cfg.api);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting song library server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(event = "stopped", "server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_parses_host_and_port() {
        let server = ServerConfig { host: "127.0.0.1".into(), port: 8080, worker_threads: None };
        assert_eq!(bind_addr(&server).unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn bind_addr_rejects_hostname() {
        let server = ServerConfig { host: "not a host".into(), port: 8080, worker_threads: None };
        assert!(bind_addr(&server).is_err());
    }
}
