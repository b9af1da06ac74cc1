//! Periodic datastore liveness check.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::Database;

/// Spawn a task that pings the database every `interval`.
///
/// Failures are logged and never stop the task; traffic is not gated on the
/// result. The task exits once `shutdown` flips to `true` or its sender is
/// dropped.
pub fn spawn_liveness_probe(
    db: Database,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match db.ping().await {
                        Ok(()) => tracing::trace!("Database liveness check passed"),
                        Err(e) => tracing::warn!(error = %e, "Database connection is down"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Liveness probe stopped");
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_stops_on_shutdown() {
        let db = Database::open_in_memory().await.unwrap();
        let (tx, rx) = watch::channel(false);

        let handle = spawn_liveness_probe(db, Duration::from_millis(10), rx);
        tokio::time::sleep(Duration::from_millis(30)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("probe did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_probe_survives_closed_pool() {
        let db = Database::open_in_memory().await.unwrap();
        db.close().await;
        let (tx, rx) = watch::channel(false);

        let handle = spawn_liveness_probe(db, Duration::from_millis(5), rx);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!handle.is_finished());

        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("probe did not stop")
            .unwrap();
    }
}
