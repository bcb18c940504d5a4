mod cli;

use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use jiff::SignedDuration;
use std::sync::Arc;
use std::time::Duration;
use tinyurl_frontend::{App, BackendClient, FrontendState, SessionStore, StaticCredentials};
use tracing::{debug, info};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    tinyurl_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        backend_url = %config.backend_url,
        session_ttl_secs = config.session_ttl_secs,
        "starting frontend server"
    );

    let backend = BackendClient::new(&config.backend_url).context("invalid backend url")?;
    let sessions = Arc::new(SessionStore::new(SignedDuration::from_secs(
        config.session_ttl_secs,
    )));
    let credentials = StaticCredentials::builder()
        .username(config.username)
        .password(config.password)
        .build();

    let purger = tokio::spawn(purge_sessions(Arc::clone(&sessions)));
    let state = FrontendState::new(backend, sessions, Arc::new(credentials));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "frontend listening");

    let served = axum::serve(listener, App::router(state))
        .with_graceful_shutdown(tinyurl_telemetry::shutdown_signal())
        .await
        .context("frontend server failed");

    purger.abort();
    info!("frontend stopped");
    served
}

async fn purge_sessions(sessions: Arc<SessionStore>) {
    let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
    loop {
        interval.tick().await;
        let purged = sessions.purge_expired();
        if purged > 0 {
            debug!(purged, "expired sessions removed");
        }
    }
}
