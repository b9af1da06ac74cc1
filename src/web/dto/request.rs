//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};
use crate::inbox::CreateInbox;

/// Inbox creation request. Both fields are optional.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateInboxRequest {
    /// Local part; generated when absent or blank.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub username: Option<String>,
    /// Domain; chosen from the allow-list when absent or blank.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub domain: Option<String>,
}

impl From<CreateInboxRequest> for CreateInbox {
    fn from(req: CreateInboxRequest) -> Self {
        CreateInbox {
            username: req.username,
            domain: req.domain,
        }
    }
}

/// Inbox deletion request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteInboxRequest {
    /// Address to delete.
    #[serde(default)]
    #[validate(custom(function = "not_empty_trimmed"))]
    pub email_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_all_optional() {
        let req: CreateInboxRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_none());
        assert!(req.domain.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_into_command() {
        let req: CreateInboxRequest =
            serde_json::from_str(r#"{"username":"alice","domain":"mail.test"}"#).unwrap();
        let cmd = CreateInbox::from(req);
        assert_eq!(cmd.username.as_deref(), Some("alice"));
        assert_eq!(cmd.domain.as_deref(), Some("mail.test"));
    }

    #[test]
    fn test_create_request_rejects_control_chars() {
        let req = CreateInboxRequest {
            username: Some("al\u{0}ice".to_string()),
            domain: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_delete_request_missing_address() {
        let req: DeleteInboxRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_delete_request_blank_address() {
        let req: DeleteInboxRequest =
            serde_json::from_str(r#"{"email_address":"  "}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_delete_request_valid() {
        let req: DeleteInboxRequest =
            serde_json::from_str(r#"{"email_address":"alice@mail.test"}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
