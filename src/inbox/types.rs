//! Inbox and message types for tempmail.

use chrono::Utc;

/// Column type used for the `from`/`to` address lists.
///
/// SQLite has no array type, so lists are stored as JSON text.
#[cfg(feature = "sqlite")]
pub(crate) type AddressColumn = sqlx::types::Json<Vec<String>>;

/// Column type used for the `from`/`to` address lists.
#[cfg(feature = "postgres")]
pub(crate) type AddressColumn = Vec<String>;

#[cfg(feature = "sqlite")]
pub(crate) fn into_addresses(column: AddressColumn) -> Vec<String> {
    column.0
}

#[cfg(feature = "postgres")]
pub(crate) fn into_addresses(column: AddressColumn) -> Vec<String> {
    column
}

#[cfg(feature = "sqlite")]
pub(crate) fn to_address_column(addresses: &[String]) -> AddressColumn {
    sqlx::types::Json(addresses.to_vec())
}

#[cfg(feature = "postgres")]
pub(crate) fn to_address_column(addresses: &[String]) -> AddressColumn {
    addresses.to_vec()
}

/// A full message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Message ID.
    pub message_id: String,
    /// Message body.
    pub body: String,
    /// Sender addresses.
    pub from: Vec<String>,
    /// Recipient addresses.
    pub to: Vec<String>,
}

/// A message as shown in an inbox listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSummary {
    /// Message ID.
    pub message_id: String,
    /// Sender addresses joined with `", "`.
    pub from: String,
    /// Arrival date as stored.
    pub date: String,
}

/// A message to be stored and linked to its inboxes.
#[derive(Debug, Clone)]
pub struct NewEmail {
    /// Message ID.
    pub message_id: String,
    /// Message body.
    pub body: String,
    /// Sender addresses.
    pub from: Vec<String>,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Arrival date (RFC 3339).
    pub date: String,
}

impl NewEmail {
    /// Create a new message dated now.
    pub fn new(
        message_id: impl Into<String>,
        from: Vec<String>,
        to: Vec<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            body: body.into(),
            from,
            to,
            date: Utc::now().to_rfc3339(),
        }
    }

    /// Override the arrival date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// Row shape of a full message.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EmailRow {
    pub message_id: String,
    pub body: String,
    pub from: AddressColumn,
    pub to: AddressColumn,
}

impl From<EmailRow> for Email {
    fn from(row: EmailRow) -> Self {
        Self {
            message_id: row.message_id,
            body: row.body,
            from: into_addresses(row.from),
            to: into_addresses(row.to),
        }
    }
}

/// Row shape of an inbox listing entry.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EmailSummaryRow {
    pub message_id: String,
    pub from: AddressColumn,
    pub date: String,
}

impl From<EmailSummaryRow> for EmailSummary {
    fn from(row: EmailSummaryRow) -> Self {
        Self {
            message_id: row.message_id,
            from: into_addresses(row.from).join(", "),
            date: row.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_email_has_rfc3339_date() {
        let email = NewEmail::new(
            "<1@mx.test>",
            vec!["a@mx.test".to_string()],
            vec!["b@mail.test".to_string()],
            "hi",
        );
        assert!(chrono::DateTime::parse_from_rfc3339(&email.date).is_ok());
        assert_eq!(email.body, "hi");
    }

    #[test]
    fn test_with_date() {
        let email = NewEmail::new("id", vec![], vec![], "").with_date("2024-01-01T00:00:00Z");
        assert_eq!(email.date, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_summary_joins_senders() {
        let row = EmailSummaryRow {
            message_id: "id".to_string(),
            from: to_address_column(&["a@x.test".to_string(), "b@x.test".to_string()]),
            date: "2024-01-01".to_string(),
        };
        let summary = EmailSummary::from(row);
        assert_eq!(summary.from, "a@x.test, b@x.test");
    }
}
