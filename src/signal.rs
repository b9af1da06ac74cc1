//! Process signal handling.
//!
//! SIGINT and SIGTERM request a graceful shutdown. On unix, SIGHUP re-reads
//! the configuration file and publishes a fresh domain allow-list.

use std::path::Path;
#[cfg(unix)]
use std::{path::PathBuf, sync::Arc};

#[cfg(unix)]
use tokio::{sync::watch, task::JoinHandle};

use crate::config::Config;
use crate::inbox::DomainAllowList;
use crate::Result;

/// Resolve once SIGINT or (on unix) SIGTERM is received.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// Build the allow-list from the configuration file at `path`.
///
/// Environment overrides are applied and the result is validated, so a bad
/// file never replaces a good list.
pub fn reload_allow_list(path: &Path) -> Result<DomainAllowList> {
    let config = Config::load_with_env(path)?;
    config.validate()?;
    Ok(DomainAllowList::new(&config.inbox.allowed_domains))
}

/// Spawn a task that reloads the allow-list on every SIGHUP.
///
/// The task ends when every receiver of `sender` has been dropped.
#[cfg(unix)]
pub fn spawn_config_reload(
    path: PathBuf,
    sender: watch::Sender<Arc<DomainAllowList>>,
) -> Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                received = hangup.recv() => {
                    if received.is_none() {
                        break;
                    }
                }
                _ = sender.closed() => break,
            }

            tracing::info!(path = %path.display(), "Received SIGHUP, reloading configuration");
            match reload_allow_list(&path) {
                Ok(list) => {
                    tracing::info!(domains = ?list.domains(), "Allowed domains reloaded");
                    sender.send_replace(Arc::new(list));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Configuration reload failed, keeping previous domains");
                }
            }
        }
        tracing::debug!("Configuration reload task stopped");
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reload_allow_list() {
        let file = write_config(
            r#"
[inbox]
allowed_domains = ["One.test", "two.test"]
"#,
        );

        let list = reload_allow_list(file.path()).unwrap();
        assert_eq!(list.domains(), &["one.test".to_string(), "two.test".to_string()]);
    }

    #[test]
    fn test_reload_rejects_invalid() {
        let file = write_config(
            r#"
[inbox]
allowed_domains = []
"#,
        );

        assert!(reload_allow_list(file.path()).is_err());
    }

    #[test]
    fn test_reload_missing_file() {
        assert!(reload_allow_list(Path::new("/nonexistent/tempmail.toml")).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reload_task_stops_when_receivers_dropped() {
        let (tx, rx) = watch::channel(Arc::new(DomainAllowList::new(["a.test"])));
        let handle = spawn_config_reload(PathBuf::from("/nonexistent/tempmail.toml"), tx).unwrap();

        drop(rx);
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("reload task did not stop")
            .unwrap();
    }
}
