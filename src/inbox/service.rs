//! Inbox service for tempmail.
//!
//! This module provides the operations behind the HTTP routes: input
//! validation and address minting on top of [`InboxRepository`].

use tracing::{debug, info};

use crate::db::Database;
use crate::{Result, TempMailError};

use super::address::{build_address, generate_local_part, validate_local_part, DomainAllowList};
use super::repository::InboxRepository;
use super::types::{Email, EmailSummary};

/// Request to create an inbox.
#[derive(Debug, Clone, Default)]
pub struct CreateInbox {
    /// Requested local part. Absent or blank means generate one.
    pub username: Option<String>,
    /// Requested domain. Absent or blank means pick one at random.
    pub domain: Option<String>,
}

impl CreateInbox {
    /// Create a request for a random address.
    pub fn random() -> Self {
        Self::default()
    }

    /// Set the requested local part.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the requested domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Service for inbox operations.
pub struct InboxService<'a> {
    db: &'a Database,
    domains: &'a DomainAllowList,
}

impl<'a> InboxService<'a> {
    /// Create a new InboxService over a database and a domain allow-list.
    pub fn new(db: &'a Database, domains: &'a DomainAllowList) -> Self {
        Self { db, domains }
    }

    fn repo(&self) -> InboxRepository<'a> {
        InboxRepository::new(self.db.pool())
    }

    /// Create an inbox and return its address.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The username is not a valid local part
    /// - The domain is not in the allow-list, or the list is empty
    /// - The address already exists or the insert fails
    pub async fn create_inbox(&self, request: &CreateInbox) -> Result<String> {
        let domain = match present(request.domain.as_deref()) {
            Some(requested) => self
                .domains
                .resolve(requested)
                .map_err(|_| TempMailError::DomainNotAllowed(requested.to_string()))?,
            None => self
                .domains
                .choose()
                .ok_or_else(|| TempMailError::Config("no allowed domains".to_string()))?,
        };

        let local = match present(request.username.as_deref()) {
            Some(username) => {
                validate_local_part(username)
                    .map_err(|e| TempMailError::Validation(e.to_string()))?;
                username.to_string()
            }
            None => generate_local_part(),
        };

        let address = build_address(&local, domain);
        self.repo().create_user(&address).await?;

        info!(address = %address, "Inbox created");
        Ok(address)
    }

    /// List summaries of the messages in an inbox.
    ///
    /// An unknown address has an empty inbox.
    pub async fn list_inbox(&self, address: &str) -> Result<Vec<EmailSummary>> {
        let summaries = self.repo().list_summaries(address).await?;
        debug!(address = %address, count = summaries.len(), "Inbox listed");
        Ok(summaries)
    }

    /// Get a message by id.
    pub async fn get_email(&self, message_id: &str) -> Result<Email> {
        self.repo()
            .get_email(message_id)
            .await?
            .ok_or_else(|| TempMailError::NotFound("email".to_string()))
    }

    /// Delete an inbox and the messages only it holds.
    ///
    /// Returns the number of messages deleted.
    pub async fn delete_inbox(&self, address: &str) -> Result<u64> {
        let address = address.trim();
        if address.is_empty() {
            return Err(TempMailError::Validation(
                "email_address is required".to_string(),
            ));
        }

        let deleted = self
            .repo()
            .delete_inbox(address)
            .await?
            .ok_or_else(|| TempMailError::NotFound("email address".to_string()))?;

        info!(address = %address, deleted_emails = deleted, "Inbox deleted");
        Ok(deleted)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::inbox::types::NewEmail;

    async fn setup() -> (Database, DomainAllowList) {
        let db = Database::open_in_memory().await.unwrap();
        let domains = DomainAllowList::new(["mail.test", "drop.test"]);
        (db, domains)
    }

    #[tokio::test]
    async fn test_create_inbox_with_username_and_domain() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        let address = service
            .create_inbox(&CreateInbox::random().with_username("alice").with_domain("mail.test"))
            .await
            .unwrap();
        assert_eq!(address, "alice@mail.test");
        assert!(InboxRepository::new(db.pool())
            .user_exists("alice@mail.test")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_create_inbox_domain_case_insensitive() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        let address = service
            .create_inbox(&CreateInbox::random().with_username("bob").with_domain("MAIL.Test"))
            .await
            .unwrap();
        assert_eq!(address, "bob@mail.test");
    }

    #[tokio::test]
    async fn test_create_inbox_random() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        let first = service.create_inbox(&CreateInbox::random()).await.unwrap();
        let second = service.create_inbox(&CreateInbox::random()).await.unwrap();
        assert_ne!(first, second);

        let (local, domain) = first.split_once('@').unwrap();
        assert!(uuid::Uuid::parse_str(local).is_ok());
        assert!(domains.resolve(domain).is_ok());
    }

    #[tokio::test]
    async fn test_create_inbox_blank_fields_are_absent() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        let address = service
            .create_inbox(&CreateInbox::random().with_username("  ").with_domain(""))
            .await
            .unwrap();
        let (local, _) = address.split_once('@').unwrap();
        assert!(uuid::Uuid::parse_str(local).is_ok());
    }

    #[tokio::test]
    async fn test_create_inbox_disallowed_domain() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        let result = service
            .create_inbox(&CreateInbox::random().with_username("eve").with_domain("evil.test"))
            .await;
        assert!(matches!(result, Err(TempMailError::DomainNotAllowed(d)) if d == "evil.test"));
        assert!(!InboxRepository::new(db.pool())
            .user_exists("eve@evil.test")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_create_inbox_invalid_username() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        let result = service
            .create_inbox(&CreateInbox::random().with_username("a b"))
            .await;
        assert!(matches!(result, Err(TempMailError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_inbox_duplicate() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);
        let request = CreateInbox::random().with_username("dup").with_domain("mail.test");

        service.create_inbox(&request).await.unwrap();
        let result = service.create_inbox(&request).await;
        assert!(matches!(result, Err(TempMailError::Database(_))));
    }

    #[tokio::test]
    async fn test_create_inbox_empty_allow_list() {
        let db = Database::open_in_memory().await.unwrap();
        let domains = DomainAllowList::new(Vec::<String>::new());
        let service = InboxService::new(&db, &domains);

        let result = service.create_inbox(&CreateInbox::random()).await;
        assert!(matches!(result, Err(TempMailError::Config(_))));
    }

    #[tokio::test]
    async fn test_get_email_not_found() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        let result = service.get_email("<missing@mx.test>").await;
        assert!(matches!(result, Err(TempMailError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);
        let address = service
            .create_inbox(&CreateInbox::random().with_username("carol").with_domain("mail.test"))
            .await
            .unwrap();

        let email = NewEmail::new(
            "<1@mx.test>",
            vec!["sender@mx.test".to_string()],
            vec![address.clone()],
            "hello",
        );
        InboxRepository::new(db.pool())
            .store_email(&email, &[address.as_str()])
            .await
            .unwrap();

        let listed = service.list_inbox(&address).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(service.get_email("<1@mx.test>").await.unwrap().body, "hello");

        assert_eq!(service.delete_inbox(&address).await.unwrap(), 1);
        assert!(service.list_inbox(&address).await.unwrap().is_empty());
        assert!(matches!(
            service.get_email("<1@mx.test>").await,
            Err(TempMailError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_inbox_blank() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        let result = service.delete_inbox("   ").await;
        assert!(matches!(result, Err(TempMailError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_inbox_not_found_is_repeatable() {
        let (db, domains) = setup().await;
        let service = InboxService::new(&db, &domains);

        for _ in 0..2 {
            let result = service.delete_inbox("ghost@mail.test").await;
            assert!(matches!(result, Err(TempMailError::NotFound(_))));
        }
    }
}
