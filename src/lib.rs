//! tempmail - disposable inbox HTTP service
//!
//! Mints addresses under an allow-listed set of domains and serves the
//! messages delivered to them over a small JSON API.

pub mod config;
pub mod db;
pub mod error;
pub mod inbox;
pub mod logging;
pub mod signal;
pub mod web;

pub use config::Config;
pub use db::Database;
pub use error::{Result, TempMailError};
pub use inbox::{
    CreateInbox, DomainAllowList, Email, EmailSummary, InboxRepository, InboxService, NewEmail,
};
pub use web::{AppState, WebServer};
