//! API handlers for the tempmail HTTP API.

pub mod inbox;

pub use inbox::*;

use std::sync::Arc;

use tokio::sync::watch;

use crate::db::Database;
use crate::inbox::DomainAllowList;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Current domain allow-list; replaced on configuration reload.
    domains: watch::Receiver<Arc<DomainAllowList>>,
}

impl AppState {
    /// Create a new application state following a reloadable allow-list.
    pub fn new(db: Database, domains: watch::Receiver<Arc<DomainAllowList>>) -> Self {
        Self { db, domains }
    }

    /// Create a new application state with a fixed allow-list.
    pub fn with_domains(db: Database, domains: DomainAllowList) -> Self {
        let (_tx, rx) = watch::channel(Arc::new(domains));
        Self::new(db, rx)
    }

    /// Snapshot of the current allow-list.
    pub fn allowed_domains(&self) -> Arc<DomainAllowList> {
        self.domains.borrow().clone()
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allowed_domains_follow_reload() {
        let db = Database::open_in_memory().await.unwrap();
        let (tx, rx) = watch::channel(Arc::new(DomainAllowList::new(["old.test"])));
        let state = AppState::new(db, rx);
        assert_eq!(state.allowed_domains().domains(), &["old.test".to_string()]);

        tx.send_replace(Arc::new(DomainAllowList::new(["new.test"])));
        assert_eq!(state.allowed_domains().domains(), &["new.test".to_string()]);
    }

    #[tokio::test]
    async fn test_fixed_domains_survive_sender_drop() {
        let db = Database::open_in_memory().await.unwrap();
        let state = AppState::with_domains(db, DomainAllowList::new(["mail.test"]));
        assert_eq!(state.allowed_domains().len(), 1);
    }
}
