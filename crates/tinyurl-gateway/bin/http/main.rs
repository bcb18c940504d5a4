mod cli;

use crate::cli::{Cli, StorageBackendArg};
use anyhow::Context;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tinyurl_core::Repository;
use tinyurl_gateway::{App, AppState};
use tinyurl_generator::Md5Deriver;
use tinyurl_shortener::ShortenerService;
use tinyurl_storage::{InMemoryRepository, SqliteRepository};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    tinyurl_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        short_code_length = config.short_code_length,
        "starting gateway server"
    );

    let deriver = Md5Deriver::builder()
        .length(config.short_code_length)
        .build();

    match config.storage {
        StorageBackendArg::Sqlite => {
            let repository = SqliteRepository::open(&config.sqlite_path)
                .await
                .with_context(|| {
                    format!(
                        "failed to initialize sqlite database at {}",
                        config.sqlite_path.display()
                    )
                })?;
            run_server(config.listen_addr, Arc::new(repository), deriver).await
        }
        StorageBackendArg::InMemory => {
            run_server(
                config.listen_addr,
                Arc::new(InMemoryRepository::new()),
                deriver,
            )
            .await
        }
    }
}

/// Serves until a shutdown signal arrives, then closes the repository.
///
/// The repository is closed on every path out of this function, including
/// a failed bind.
async fn run_server<R: Repository>(
    listen_addr: SocketAddr,
    repository: Arc<R>,
    deriver: Md5Deriver,
) -> anyhow::Result<()> {
    let service = ShortenerService::from_shared(Arc::clone(&repository), deriver);
    let router = App::router(AppState::new(Arc::new(service)));

    let served = serve(listen_addr, router).await;

    repository.close().await;
    info!("gateway stopped");
    served
}

async fn serve(listen_addr: SocketAddr, router: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(tinyurl_telemetry::shutdown_signal())
        .await
        .context("gateway server failed")
}
