use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::validation::{validate_address, validate_name, validate_zip_code, PHONE_REGEX};

/// Form order of the fields, used when joining validation messages.
pub const QUOTE_FIELD_ORDER: &[&str] = &[
    "zip_code",
    "dumpster_size",
    "project_type",
    "service_type",
    "rental_duration",
    "name",
    "email",
    "phone",
    "delivery_date",
    "address",
    "message",
];

/// Raw intake body. Every field defaults to empty so a missing field
/// fails validation instead of deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    #[validate(custom(function = "validate_zip_code"))]
    pub zip_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,

    #[validate(length(min = 1, message = "Please select a dumpster size"))]
    pub dumpster_size: String,

    #[validate(length(min = 1, message = "Please select a project type"))]
    pub project_type: String,

    #[validate(length(min = 1, message = "Please select a service type"))]
    pub service_type: String,

    #[validate(length(min = 1, message = "Please select rental duration"))]
    pub rental_duration: String,

    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Please enter a valid phone number"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Please select a delivery date"))]
    pub delivery_date: String,

    #[validate(custom(function = "validate_address"))]
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Message must be less than 1000 characters"))]
    pub message: Option<String>,
}

/// Validated submission handed to the quote service.
#[derive(Debug, Clone)]
pub struct QuoteDto {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub zip_code: String,
    pub city_id: Option<String>,
    pub dumpster_size: String,
    pub project_type: String,
    pub service_type: String,
    pub rental_duration: String,
    pub delivery_date: NaiveDate,
    pub message: Option<String>,
}

impl QuoteDto {
    /// Carries the validated values over as submitted, so the stored
    /// record still satisfies the rules it was checked against.
    pub fn from_request(req: CreateQuoteRequest, delivery_date: NaiveDate) -> Self {
        QuoteDto {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            zip_code: req.zip_code,
            city_id: req.city_id.filter(|id| !id.trim().is_empty()),
            dumpster_size: req.dumpster_size,
            project_type: req.project_type,
            service_type: req.service_type,
            rental_duration: req.rental_duration,
            delivery_date,
            message: req.message.filter(|m| !m.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuotesQuery {
    pub status: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListQuotesQuery {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;

    /// Non-numeric values fall back to the defaults.
    pub fn limit(&self) -> u64 {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<u64>().ok())
            .filter(|l| *l > 0)
            .map(|l| l.min(Self::MAX_LIMIT))
            .unwrap_or(Self::DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        self.offset
            .as_deref()
            .and_then(|o| o.trim().parse::<u64>().ok())
            .unwrap_or(0)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRef {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRef {
    pub name: String,
    pub slug: String,
    pub abbreviation: String,
}

/// A quote row as shown in the listing, joined with its city and state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub zip_code: String,
    pub dumpster_size: String,
    pub project_type: String,
    pub service_type: String,
    pub rental_duration: String,
    pub delivery_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub city: Option<CityRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteListResponse {
    pub quotes: Vec<QuoteView>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}
