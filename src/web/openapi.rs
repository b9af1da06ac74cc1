//! OpenAPI document for the tempmail HTTP API.

use utoipa::OpenApi;

use super::dto::{
    CreateInboxRequest, CreateInboxResponse, DeleteInboxRequest, EmailResponse,
    EmailSummaryResponse, InboxListResponse, SuccessResponse,
};
use super::error::ErrorBody;
use super::handlers::inbox;

/// OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(title = "tempmail", description = "Disposable inbox API"),
    paths(
        inbox::list_inbox,
        inbox::get_email,
        inbox::create_inbox,
        inbox::delete_inbox,
    ),
    components(schemas(
        CreateInboxRequest,
        DeleteInboxRequest,
        CreateInboxResponse,
        EmailResponse,
        EmailSummaryResponse,
        InboxListResponse,
        SuccessResponse,
        ErrorBody,
    )),
    tags((name = "inbox", description = "Inbox and message operations"))
)]
pub struct ApiDoc;
