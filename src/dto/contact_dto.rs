use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::validation::{validate_contact_message, validate_name, PHONE_REGEX};

pub const CONTACT_FIELD_ORDER: &[&str] = &["name", "email", "phone", "message"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Please enter a valid phone number"))]
    pub phone: String,

    #[validate(custom(function = "validate_contact_message"))]
    pub message: String,
}
