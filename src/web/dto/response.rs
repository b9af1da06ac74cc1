//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::inbox::{Email, EmailSummary};

/// Bare success acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
}

impl SuccessResponse {
    /// Create a success response.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Created inbox.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateInboxResponse {
    /// Always `true`.
    pub success: bool,
    /// The new address.
    pub email_address: String,
}

impl CreateInboxResponse {
    /// Create a response for a new address.
    pub fn new(email_address: String) -> Self {
        Self {
            success: true,
            email_address,
        }
    }
}

/// Message summary in an inbox listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailSummaryResponse {
    /// Message ID.
    pub message_id: String,
    /// Senders joined with ", ".
    pub from: String,
    /// Arrival date.
    pub date: String,
}

impl From<EmailSummary> for EmailSummaryResponse {
    fn from(summary: EmailSummary) -> Self {
        Self {
            message_id: summary.message_id,
            from: summary.from,
            date: summary.date,
        }
    }
}

/// Inbox listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct InboxListResponse {
    /// Always `true`.
    pub success: bool,
    /// Messages in the inbox.
    pub emails: Vec<EmailSummaryResponse>,
}

impl InboxListResponse {
    /// Create a listing from summaries.
    pub fn new(summaries: Vec<EmailSummary>) -> Self {
        Self {
            success: true,
            emails: summaries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Full message.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailResponse {
    /// Message ID.
    pub message_id: String,
    /// Message body.
    pub body: String,
    /// Sender addresses.
    pub from: Vec<String>,
    /// Recipient addresses.
    pub to: Vec<String>,
}

impl From<Email> for EmailResponse {
    fn from(email: Email) -> Self {
        Self {
            message_id: email.message_id,
            body: email.body,
            from: email.from,
            to: email.to,
        }
    }
}
