//! Inbox repository for tempmail.
//!
//! This module owns every SQL statement the service runs against the
//! `users`, `inboxes` and `emails` tables.

use sqlx::Executor;

use super::queries;
use super::types::{to_address_column, Email, EmailRow, EmailSummary, EmailSummaryRow, NewEmail};
use crate::db::DbPool;
use crate::{Result, TempMailError};

/// Repository for inbox and message operations.
pub struct InboxRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> InboxRepository<'a> {
    /// Create a new InboxRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Prepare every statement once against the live schema.
    ///
    /// Fails with the logical name of the first statement the datastore
    /// rejects.
    pub async fn verify_statements(&self) -> Result<()> {
        for (name, sql) in queries::STATEMENTS {
            self.pool.prepare(*sql).await.map_err(|e| {
                TempMailError::Database(format!("failed to prepare {name}: {e}"))
            })?;
            tracing::debug!(statement = name, "Prepared statement");
        }
        Ok(())
    }

    /// Insert a new inbox owner.
    ///
    /// Uniqueness is enforced by the datastore; a duplicate fails with a
    /// database error.
    pub async fn create_user(&self, address: &str) -> Result<()> {
        sqlx::query(queries::CREATE_USER)
            .bind(address)
            .execute(self.pool)
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;
        Ok(())
    }

    /// Whether an inbox owner exists.
    pub async fn user_exists(&self, address: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(queries::USER_EXISTS)
            .bind(address)
            .fetch_one(self.pool)
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;
        Ok(exists)
    }

    /// List summaries of the messages linked to an inbox and to no other.
    pub async fn list_summaries(&self, address: &str) -> Result<Vec<EmailSummary>> {
        let rows: Vec<EmailSummaryRow> = sqlx::query_as(queries::LIST_SUMMARIES_BY_USER)
            .bind(address)
            .fetch_all(self.pool)
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(EmailSummary::from).collect())
    }

    /// Get a message by id.
    pub async fn get_email(&self, message_id: &str) -> Result<Option<Email>> {
        let row: Option<EmailRow> = sqlx::query_as(queries::GET_EMAIL_BY_ID)
            .bind(message_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;

        Ok(row.map(Email::from))
    }

    /// Delete an inbox and the messages it exclusively owns.
    ///
    /// Runs in one transaction: owned ids are collected before the owner row
    /// is removed (the removal cascades to its links), then the owned
    /// messages are deleted. Returns `None` and changes nothing if the
    /// address does not exist, otherwise the number of messages deleted.
    pub async fn delete_inbox(&self, address: &str) -> Result<Option<u64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;

        let owned: Vec<String> = sqlx::query_scalar(queries::OWNED_MESSAGE_IDS_BY_USER)
            .bind(address)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;

        let deleted_user = sqlx::query(queries::DELETE_USER)
            .bind(address)
            .execute(&mut *tx)
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;

        if deleted_user.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| TempMailError::Database(e.to_string()))?;
            return Ok(None);
        }

        let mut deleted_emails = 0;
        for message_id in &owned {
            let result = sqlx::query(queries::DELETE_EMAIL_BY_ID)
                .bind(message_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| TempMailError::Database(e.to_string()))?;
            deleted_emails += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;

        Ok(Some(deleted_emails))
    }

    /// Store a message and link it to each recipient inbox.
    ///
    /// Every recipient must already exist.
    pub async fn store_email(&self, email: &NewEmail, recipients: &[&str]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;

        sqlx::query(queries::INSERT_EMAIL)
            .bind(&email.message_id)
            .bind(&email.body)
            .bind(to_address_column(&email.from))
            .bind(to_address_column(&email.to))
            .bind(&email.date)
            .execute(&mut *tx)
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;

        for recipient in recipients {
            sqlx::query(queries::LINK_EMAIL_TO_USER)
                .bind(&email.message_id)
                .bind(*recipient)
                .execute(&mut *tx)
                .await
                .map_err(|e| TempMailError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| TempMailError::Database(e.to_string()))?;
        Ok(())
    }
}
