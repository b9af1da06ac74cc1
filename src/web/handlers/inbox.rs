//! Inbox handlers for the tempmail HTTP API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::inbox::InboxService;
use crate::web::dto::{
    CreateInboxRequest, CreateInboxResponse, DeleteInboxRequest, EmailResponse,
    InboxListResponse, SuccessResponse, ValidatedJson,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::handlers::AppState;

/// GET /inbox/:address - List the messages in an inbox.
#[utoipa::path(
    get,
    path = "/inbox/{address}",
    tag = "inbox",
    params(
        ("address" = String, Path, description = "Inbox address")
    ),
    responses(
        (status = 200, description = "Messages in the inbox", body = InboxListResponse),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    )
)]
pub async fn list_inbox(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<InboxListResponse>, ApiError> {
    let domains = state.allowed_domains();
    let summaries = InboxService::new(&state.db, &domains)
        .list_inbox(&address)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to retrieve emails."))?;

    Ok(Json(InboxListResponse::new(summaries)))
}

/// GET /email/:message_id - Get a message.
#[utoipa::path(
    get,
    path = "/email/{message_id}",
    tag = "inbox",
    params(
        ("message_id" = String, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "The message", body = EmailResponse),
        (status = 404, description = "Message not found", body = ErrorBody),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    )
)]
pub async fn get_email(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
) -> Result<Json<EmailResponse>, ApiError> {
    let domains = state.allowed_domains();
    let email = InboxService::new(&state.db, &domains)
        .get_email(&message_id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to retrieve email."))?;

    Ok(Json(email.into()))
}

/// POST /email - Create an inbox.
#[utoipa::path(
    post,
    path = "/email",
    tag = "inbox",
    request_body = CreateInboxRequest,
    responses(
        (status = 201, description = "Inbox created", body = CreateInboxResponse),
        (status = 400, description = "Invalid username, domain or body", body = ErrorBody),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    )
)]
pub async fn create_inbox(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateInboxRequest>,
) -> Result<(StatusCode, Json<CreateInboxResponse>), ApiError> {
    let domains = state.allowed_domains();
    let address = InboxService::new(&state.db, &domains)
        .create_inbox(&req.into())
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to create new email address."))?;

    Ok((StatusCode::CREATED, Json(CreateInboxResponse::new(address))))
}

/// DELETE /email - Delete an inbox and the messages only it holds.
#[utoipa::path(
    delete,
    path = "/email",
    tag = "inbox",
    request_body = DeleteInboxRequest,
    responses(
        (status = 200, description = "Inbox deleted", body = SuccessResponse),
        (status = 400, description = "Missing address or invalid body", body = ErrorBody),
        (status = 404, description = "Address not found", body = ErrorBody),
        (status = 500, description = "Datastore failure", body = ErrorBody)
    )
)]
pub async fn delete_inbox(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<DeleteInboxRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let domains = state.allowed_domains();
    InboxService::new(&state.db, &domains)
        .delete_inbox(&req.email_address)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete email user."))?;

    Ok(Json(SuccessResponse::ok()))
}
