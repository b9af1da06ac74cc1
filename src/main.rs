use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use tempmail::{AppState, Config, Database, DomainAllowList, InboxRepository, WebServer};

/// Disposable inbox HTTP service.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "TEMPMAIL_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Log file path, overriding `logging.file`.
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", cli.config.display());
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    if let Some(file) = cli.log_file {
        config.logging.file = file;
    }

    // Initialize logging
    if let Err(e) = tempmail::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        tempmail::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = run(config, cli.config).await {
        error!(error = %e, "tempmail exited with an error");
        std::process::exit(1);
    }
}

async fn run(config: Config, config_path: PathBuf) -> tempmail::Result<()> {
    config.validate()?;

    info!("tempmail - disposable inbox service");
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let db = Database::connect(&config.database).await?;
    InboxRepository::new(db.pool()).verify_statements().await?;
    info!("Database ready");

    let domains = DomainAllowList::new(&config.inbox.allowed_domains);
    info!(domains = ?domains.domains(), "Allowed domains loaded");
    let (domains_tx, domains_rx) = watch::channel(Arc::new(domains));

    #[cfg(unix)]
    let reload = match tempmail::signal::spawn_config_reload(config_path, domains_tx) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Configuration reload on SIGHUP is unavailable");
            None
        }
    };
    #[cfg(not(unix))]
    {
        let _ = (config_path, domains_tx);
        warn!("Configuration reload on SIGHUP is unavailable on this platform");
    }

    let state = AppState::new(db.clone(), domains_rx);
    let result = WebServer::new(&config.server, &config.database, state)?
        .run()
        .await;

    #[cfg(unix)]
    if let Some(handle) = reload {
        handle.abort();
    }

    db.close().await;
    info!("Database closed");
    result
}
