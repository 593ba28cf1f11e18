use std::borrow::Cow;

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

pub static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\+]?[(]?[0-9]{3}[)]?[-\s\.]?[0-9]{3}[-\s\.]?[0-9]{4,6}$").expect("phone pattern compiles")
});

pub static ZIP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip pattern compiles"));

/// Bare five digit ZIP, used by the availability lookup.
pub static ZIP5_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}$").expect("zip5 pattern compiles"));

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_zip_code(zip: &str) -> Result<(), ValidationError> {
    if zip.is_empty() {
        return Err(failure("required", "Zip code is required"));
    }
    if !ZIP_REGEX.is_match(zip) {
        return Err(failure("zip", "Please enter a valid US zip code"));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len < 2 {
        return Err(failure("length", "Name must be at least 2 characters"));
    }
    if len > 100 {
        return Err(failure("length", "Name must be less than 100 characters"));
    }
    Ok(())
}

pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    let len = address.chars().count();
    if len < 5 {
        return Err(failure("length", "Please enter a delivery address"));
    }
    if len > 200 {
        return Err(failure("length", "Address must be less than 200 characters"));
    }
    Ok(())
}

pub fn validate_contact_message(message: &str) -> Result<(), ValidationError> {
    let len = message.chars().count();
    if len < 10 {
        return Err(failure("length", "Message must be at least 10 characters"));
    }
    if len > 1000 {
        return Err(failure("length", "Message must be less than 1000 characters"));
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or `MM/DD/YYYY`.
pub fn parse_delivery_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok())
}

/// Flattens validator output into one line, ordered by `field_order`
/// and then by field name for anything not listed.
pub fn join_messages(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();
    let mut remaining: Vec<String> = field_errors
        .keys()
        .map(|k| k.to_string())
        .filter(|k| !field_order.contains(&k.as_str()))
        .collect();
    remaining.sort();

    let ordered = field_order
        .iter()
        .map(|f| f.to_string())
        .chain(remaining);

    let mut messages = Vec::new();
    for field in ordered {
        if let Some(list) = field_errors.get(field.as_str()) {
            for err in list.iter() {
                let text = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                messages.push(text);
            }
        }
    }
    messages.join(", ")
}
