//! Web server for tempmail.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::{DatabaseConfig, ServerConfig};
use crate::db::{spawn_liveness_probe, Database};
use crate::{Result, TempMailError};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Server configuration.
    server_config: ServerConfig,
    /// Interval between database liveness pings.
    ping_interval: Duration,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &ServerConfig, db_config: &DatabaseConfig, app_state: AppState) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| TempMailError::Config(format!("invalid server address: {e}")))?;

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            server_config: config.clone(),
            ping_interval: Duration::from_secs(db_config.ping_interval_secs.max(1)),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn db(&self) -> Database {
        self.app_state.db.clone()
    }

    fn router(&self) -> Result<Router> {
        create_router(self.app_state.clone(), &self.server_config)
    }

    /// Run the web server until SIGINT or SIGTERM.
    pub async fn run(self) -> Result<()> {
        self.run_until(crate::signal::shutdown_signal()).await
    }

    /// Run the web server until `shutdown` resolves.
    ///
    /// New connections stop being accepted at once; in-flight requests get
    /// the configured grace period before the server task is aborted.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router()?;
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        let (stop_tx, stop_rx) = watch::channel(false);
        let probe = spawn_liveness_probe(self.db(), self.ping_interval, stop_rx.clone());
        tracing::info!(
            interval_secs = self.ping_interval.as_secs(),
            "Database liveness probe started"
        );

        let mut graceful_rx = stop_rx;
        let mut server = tokio::spawn(async move {
            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async move {
                let _ = graceful_rx.wait_for(|stop| *stop).await;
            })
            .await
        });

        let grace = Duration::from_secs(self.server_config.shutdown_grace_secs);
        let result = tokio::select! {
            joined = &mut server => joined,
            _ = shutdown => {
                let _ = stop_tx.send(true);
                tracing::info!(grace_secs = grace.as_secs(), "Draining in-flight requests");
                match tokio::time::timeout(grace, &mut server).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        tracing::warn!("Grace period elapsed, aborting open connections");
                        server.abort();
                        Ok(Ok(()))
                    }
                }
            }
        };

        let _ = stop_tx.send(true);
        if let Err(e) = probe.await {
            tracing::warn!(error = %e, "Liveness probe task failed");
        }

        let served = match result {
            Ok(served) => served,
            Err(e) => Err(std::io::Error::other(e)),
        };
        served?;

        tracing::info!("Web server stopped");
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.router()?;
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
