use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::quote_dto::CreateQuoteRequest;
use crate::form::client::QuoteSubmitter;
use crate::util::validation::{parse_delivery_date, validate_address, validate_name, validate_zip_code, PHONE_REGEX};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Quote submitted successfully! We will contact you soon.";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to submit quote. Please try again.";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred while submitting your quote. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Location,
    ProjectDetails,
    ContactInfo,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Location, WizardStep::ProjectDetails, WizardStep::ContactInfo];

    pub fn number(self) -> u8 {
        match self {
            WizardStep::Location => 1,
            WizardStep::ProjectDetails => 2,
            WizardStep::ContactInfo => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WizardStep::Location => "Location",
            WizardStep::ProjectDetails => "Project Details",
            WizardStep::ContactInfo => "Contact Info",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::Location => "Where do you need the dumpster?",
            WizardStep::ProjectDetails => "Tell us about your project",
            WizardStep::ContactInfo => "How can we reach you?",
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Location => Some(WizardStep::ProjectDetails),
            WizardStep::ProjectDetails => Some(WizardStep::ContactInfo),
            WizardStep::ContactInfo => None,
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Location => None,
            WizardStep::ProjectDetails => Some(WizardStep::Location),
            WizardStep::ContactInfo => Some(WizardStep::ProjectDetails),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LocationStep {
    #[validate(custom(function = "validate_zip_code"))]
    pub zip_code: String,
    pub city_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProjectDetailsStep {
    #[validate(length(min = 1, message = "Please select a dumpster size"))]
    pub dumpster_size: String,
    #[validate(length(min = 1, message = "Please select a project type"))]
    pub project_type: String,
    #[validate(length(min = 1, message = "Please select a service type"))]
    pub service_type: String,
    #[validate(length(min = 1, message = "Please select rental duration"))]
    pub rental_duration: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactInfoStep {
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
    #[validate(length(max = 1000, message = "Message must be less than 1000 characters"))]
    pub message: Option<String>,
}

impl ContactInfoStep {
    /// Field rules plus the calendar check: the date must parse and must
    /// not be before `today`.
    pub fn validate_on(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if !self.delivery_date.trim().is_empty() && !errors.field_errors().contains_key("delivery_date") {
            let problem = match parse_delivery_date(&self.delivery_date) {
                None => Some("Please select a valid delivery date"),
                Some(date) if date < today => Some("Delivery date cannot be in the past"),
                Some(_) => None,
            };
            if let Some(message) = problem {
                let mut err = ValidationError::new("delivery_date");
                err.message = Some(Cow::Borrowed(message));
                errors.add("delivery_date", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Inline banner shown under the form after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Submission is only possible from the last step")]
    NotOnFinalStep,

    #[error("The current step has invalid fields")]
    InvalidStep,
}

/// Three-step quote form. Each step validates only its own fields.
#[derive(Debug, Clone)]
pub struct QuoteWizard {
    step: WizardStep,
    pub location: LocationStep,
    pub project: ProjectDetailsStep,
    pub contact: ContactInfoStep,
    field_errors: BTreeMap<String, String>,
    status: Option<SubmitStatus>,
}

impl Default for QuoteWizard {
    fn default() -> Self {
        QuoteWizard::new()
    }
}

impl QuoteWizard {
    pub fn new() -> Self {
        QuoteWizard {
            step: WizardStep::Location,
            location: LocationStep::default(),
            project: ProjectDetailsStep::default(),
            contact: ContactInfoStep::default(),
            field_errors: BTreeMap::new(),
            status: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// First message per invalid field of the last validated step.
    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn status(&self) -> Option<&SubmitStatus> {
        self.status.as_ref()
    }

    fn validate_current(&mut self, today: NaiveDate) -> bool {
        let result = match self.step {
            WizardStep::Location => self.location.validate(),
            WizardStep::ProjectDetails => self.project.validate(),
            WizardStep::ContactInfo => self.contact.validate_on(today),
        };
        self.field_errors.clear();
        match result {
            Ok(()) => true,
            Err(errors) => {
                for (field, list) in errors.field_errors() {
                    if let Some(message) = list.iter().find_map(|e| e.message.as_ref()) {
                        self.field_errors.insert(field.to_string(), message.to_string());
                    }
                }
                false
            }
        }
    }

    /// Advances when the current step is valid. Returns whether it moved.
    pub fn next(&mut self, today: NaiveDate) -> bool {
        if !self.validate_current(today) {
            return false;
        }
        match self.step.next() {
            Some(step) => {
                self.step = step;
                self.status = None;
                true
            }
            None => false,
        }
    }

    pub fn previous(&mut self) {
        if let Some(step) = self.step.previous() {
            self.step = step;
            self.status = None;
            self.field_errors.clear();
        }
    }

    pub fn to_request(&self) -> CreateQuoteRequest {
        CreateQuoteRequest {
            zip_code: self.location.zip_code.clone(),
            city_id: self.location.city_id.clone(),
            dumpster_size: self.project.dumpster_size.clone(),
            project_type: self.project.project_type.clone(),
            service_type: self.project.service_type.clone(),
            rental_duration: self.project.rental_duration.clone(),
            name: self.contact.name.clone(),
            email: self.contact.email.clone(),
            phone: self.contact.phone.clone(),
            delivery_date: self.contact.delivery_date.clone(),
            address: self.contact.address.clone(),
            message: self.contact.message.clone(),
        }
    }

    /// Validates the last step, sends the quote once and records the
    /// outcome as the status banner.
    pub async fn submit(
        &mut self,
        submitter: &dyn QuoteSubmitter,
        today: NaiveDate,
    ) -> Result<&SubmitStatus, WizardError> {
        if self.step != WizardStep::ContactInfo {
            return Err(WizardError::NotOnFinalStep);
        }
        if !self.validate_current(today) {
            return Err(WizardError::InvalidStep);
        }
        self.status = None;

        let status = match submitter.submit(&self.to_request()).await {
            Ok(reply) if reply.is_success() => {
                info!(quote_id = ?reply.body.quote_id, "Quote submitted");
                let message = Some(reply.body.message)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
                SubmitStatus::Success(message)
            }
            Ok(reply) => {
                warn!(status = reply.status, "Quote submission rejected");
                let detail = reply
                    .body
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
                SubmitStatus::Error(detail)
            }
            Err(e) => {
                warn!("Quote submission failed: {}", e);
                SubmitStatus::Error(TRANSPORT_FAILURE_MESSAGE.to_string())
            }
        };
        Ok(self.status.insert(status))
    }
}
