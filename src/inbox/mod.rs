//! Inbox module for tempmail.
//!
//! This module provides disposable inbox functionality:
//! - Address minting under an allow-listed set of domains
//! - Listing and fetching the messages delivered to an inbox
//! - Deleting an inbox with the messages it exclusively owns

mod address;
mod queries;
mod repository;
mod service;
mod types;

pub use address::{
    build_address, generate_local_part, validate_local_part, AddressError, DomainAllowList,
    MAX_LOCAL_PART_LENGTH,
};
pub use queries::STATEMENTS;
pub use repository::InboxRepository;
pub use service::{CreateInbox, InboxService};
pub use types::{Email, EmailSummary, NewEmail};
