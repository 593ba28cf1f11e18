use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::util::availability::AvailabilityChecker;
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::recommendation::{recommend_size, DebrisAmount, ProjectKind};
use crate::util::validation::ZIP5_REGEX;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub project: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub zip: Option<String>,
}

fn bad_request(details: String) -> HandlerError {
    HandlerError::new(HandlerErrorKind::BadRequest, "Invalid request", details)
}

pub async fn recommendation_handler(
    Query(query): Query<RecommendationQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let project = query
        .project
        .as_deref()
        .ok_or_else(|| bad_request("project is required".to_string()))?
        .parse::<ProjectKind>()
        .map_err(bad_request)?;
    let amount = query
        .amount
        .as_deref()
        .ok_or_else(|| bad_request("amount is required".to_string()))?
        .parse::<DebrisAmount>()
        .map_err(bad_request)?;

    let recommendation = recommend_size(project, amount);
    debug!(?project, ?amount, size = recommendation.size, "Size recommended");
    Ok(Json(recommendation))
}

pub async fn availability_handler(
    State(checker): State<Arc<dyn AvailabilityChecker>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let zip = query
        .zip
        .as_deref()
        .map(str::trim)
        .filter(|z| ZIP5_REGEX.is_match(z))
        .ok_or_else(|| bad_request("A valid 5-digit ZIP code is required".to_string()))?;

    Ok(Json(checker.check(zip).await))
}
