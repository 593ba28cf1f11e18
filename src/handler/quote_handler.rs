use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{error, info, warn};
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::quote_dto::{CreateQuoteRequest, ListQuotesQuery, QuoteDto, QUOTE_FIELD_ORDER};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::validation::{join_messages, parse_delivery_date};

pub const QUOTE_CREATED_MESSAGE: &str = "Quote submitted successfully! We will contact you within 24 hours.";

pub async fn create_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    payload: Result<Json<CreateQuoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(request) = payload.map_err(|e| {
        warn!("[create_quote_handler] Unreadable body: {}", e);
        HandlerError::new(HandlerErrorKind::BadRequest, "Invalid request body", e.body_text())
    })?;

    if let Err(errors) = request.validate() {
        let details = join_messages(&errors, QUOTE_FIELD_ORDER);
        info!("[create_quote_handler] Validation failed: {}", details);
        return Err(HandlerError::validation(details));
    }

    let delivery_date = parse_delivery_date(&request.delivery_date).ok_or_else(|| {
        info!("[create_quote_handler] Unparseable delivery date: {}", request.delivery_date);
        HandlerError::new(
            HandlerErrorKind::BadRequest,
            "Invalid delivery date",
            "The delivery date provided is not valid",
        )
    })?;

    let quote = service
        .register_quote(QuoteDto::from_request(request, delivery_date))
        .await
        .map_err(|e| {
            error!("[create_quote_handler] Failed to register quote: {}", e);
            HandlerError::from(e)
        })?;

    let quote_id = quote.id.map(|id| id.to_hex()).unwrap_or_default();
    info!("[create_quote_handler] Quote {} created", quote_id);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(QUOTE_CREATED_MESSAGE).with_quote_id(quote_id))))
}

pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Query(query): Query<ListQuotesQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let listing = service
        .list_quotes(query.status(), query.offset(), query.limit())
        .await
        .map_err(|e| {
            error!("[list_quotes_handler] Failed to list quotes: {}", e);
            HandlerError::from(e)
        })?;
    Ok(Json(listing))
}
