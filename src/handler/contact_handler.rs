use axum::{extract::rejection::JsonRejection, response::IntoResponse, Json};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::contact_dto::{ContactRequest, CONTACT_FIELD_ORDER};
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::validation::join_messages;

pub const CONTACT_RECEIVED_MESSAGE: &str = "Thank you for your message! We will get back to you within 24 hours.";

/// Accepts a contact message. Nothing is stored; the submission is logged.
pub async fn contact_handler(
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(request) = payload.map_err(|e| {
        warn!("[contact_handler] Unreadable body: {}", e);
        HandlerError::new(HandlerErrorKind::BadRequest, "Invalid request body", e.body_text())
    })?;

    request
        .validate()
        .map_err(|errors| HandlerError::validation(join_messages(&errors, CONTACT_FIELD_ORDER)))?;

    info!(name = %request.name, email = %request.email, "Contact form submission received");
    Ok(Json(ApiResponse::ok(CONTACT_RECEIVED_MESSAGE)))
}
