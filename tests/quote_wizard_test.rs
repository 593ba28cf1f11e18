mod common;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use common::*;
use dumpster_site::dto::api_response::ApiResponse;
use dumpster_site::dto::quote_dto::CreateQuoteRequest;
use dumpster_site::form::client::{HttpQuoteSubmitter, QuoteSubmitter, SubmitError, SubmitReply};
use dumpster_site::form::wizard::{
    QuoteWizard, SubmitStatus, WizardError, WizardStep, DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE,
    TRANSPORT_FAILURE_MESSAGE,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
}

/// Replays a canned answer and remembers what was sent.
struct StubSubmitter {
    reply: Result<SubmitReply, String>,
    sent: Mutex<Vec<CreateQuoteRequest>>,
}

impl StubSubmitter {
    fn answering(status: u16, body: ApiResponse) -> Self {
        StubSubmitter { reply: Ok(SubmitReply { status, body }), sent: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
        StubSubmitter { reply: Err("connection refused".to_string()), sent: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl QuoteSubmitter for StubSubmitter {
    async fn submit(&self, request: &CreateQuoteRequest) -> Result<SubmitReply, SubmitError> {
        self.sent.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(SubmitError::Transport)
    }
}

fn filled_wizard() -> QuoteWizard {
    let mut wizard = QuoteWizard::new();
    wizard.location.zip_code = "90001".to_string();
    assert!(wizard.next(today()));

    wizard.project.dumpster_size = "20".to_string();
    wizard.project.project_type = "home-renovation".to_string();
    wizard.project.service_type = "residential".to_string();
    wizard.project.rental_duration = "7".to_string();
    assert!(wizard.next(today()));

    wizard.contact.name = "Jane Doe".to_string();
    wizard.contact.email = "jane@x.com".to_string();
    wizard.contact.phone = "555-123-4567".to_string();
    wizard.contact.delivery_date = "2030-06-20".to_string();
    wizard.contact.address = "1 Main St".to_string();
    wizard
}

#[test]
fn test_invalid_zip_does_not_advance() {
    let mut wizard = QuoteWizard::new();
    wizard.location.zip_code = "9000".to_string();

    assert!(!wizard.next(today()));
    assert_eq!(wizard.step(), WizardStep::Location);
    assert_eq!(wizard.field_errors().get("zip_code").map(String::as_str), Some("Please enter a valid US zip code"));

    wizard.location.zip_code = "90001-1234".to_string();
    assert!(wizard.next(today()));
    assert_eq!(wizard.step(), WizardStep::ProjectDetails);
    assert!(wizard.field_errors().is_empty());
}

#[test]
fn test_project_step_validates_only_its_fields() {
    let mut wizard = QuoteWizard::new();
    wizard.location.zip_code = "90001".to_string();
    wizard.next(today());

    wizard.project.dumpster_size = "20".to_string();
    assert!(!wizard.next(today()));
    let errors = wizard.field_errors();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors["rental_duration"], "Please select rental duration");
    assert!(!errors.contains_key("name"));
}

#[test]
fn test_past_and_invalid_dates_are_refused() {
    let mut wizard = filled_wizard();

    wizard.contact.delivery_date = "2030-06-14".to_string();
    assert!(!wizard.next(today()));
    assert_eq!(wizard.field_errors()["delivery_date"], "Delivery date cannot be in the past");

    wizard.contact.delivery_date = "someday".to_string();
    assert!(!wizard.next(today()));
    assert_eq!(wizard.field_errors()["delivery_date"], "Please select a valid delivery date");

    // Today itself is allowed
    wizard.contact.delivery_date = "2030-06-15".to_string();
    assert!(!wizard.next(today()));
    assert!(wizard.field_errors().is_empty());
}

#[test]
fn test_previous_never_goes_before_first_step() {
    let mut wizard = QuoteWizard::new();
    wizard.previous();
    assert_eq!(wizard.step(), WizardStep::Location);

    let mut wizard = filled_wizard();
    assert_eq!(wizard.step(), WizardStep::ContactInfo);
    wizard.previous();
    wizard.previous();
    wizard.previous();
    assert_eq!(wizard.step(), WizardStep::Location);
    // Entered values survive navigation
    assert_eq!(wizard.location.zip_code, "90001");
}

#[tokio::test]
async fn test_submit_only_from_last_step() {
    let mut wizard = QuoteWizard::new();
    let submitter = StubSubmitter::answering(201, ApiResponse::ok("ok"));

    let err = wizard.submit(&submitter, today()).await.unwrap_err();
    assert_eq!(err, WizardError::NotOnFinalStep);
    assert!(submitter.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_revalidates_contact_step() {
    let mut wizard = filled_wizard();
    wizard.contact.email = "nope".to_string();
    let submitter = StubSubmitter::answering(201, ApiResponse::ok("ok"));

    let err = wizard.submit(&submitter, today()).await.unwrap_err();
    assert_eq!(err, WizardError::InvalidStep);
    assert_eq!(wizard.field_errors()["email"], "Please enter a valid email address");
    assert!(submitter.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_successful_submit_shows_server_message() {
    let mut wizard = filled_wizard();
    let submitter = StubSubmitter::answering(
        201,
        ApiResponse::ok("Quote submitted successfully! We will contact you within 24 hours.")
            .with_quote_id("64b7f0c2a1b2c3d4e5f60718".to_string()),
    );

    let status = wizard.submit(&submitter, today()).await.unwrap().clone();
    assert_eq!(
        status,
        SubmitStatus::Success("Quote submitted successfully! We will contact you within 24 hours.".to_string())
    );

    let sent = submitter.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].zip_code, "90001");
    assert_eq!(sent[0].dumpster_size, "20");
    assert_eq!(sent[0].email, "jane@x.com");
}

#[tokio::test]
async fn test_rejected_submit_shows_error_detail() {
    let mut wizard = filled_wizard();
    let submitter = StubSubmitter::answering(
        429,
        ApiResponse::failure("Too many requests", Some("Rate limit exceeded".to_string())),
    );

    let status = wizard.submit(&submitter, today()).await.unwrap().clone();
    assert_eq!(status, SubmitStatus::Error("Rate limit exceeded".to_string()));

    // Navigating away clears the banner
    wizard.previous();
    assert!(wizard.status().is_none());
}

#[tokio::test]
async fn test_empty_server_text_falls_back_to_defaults() {
    let mut wizard = filled_wizard();
    let submitter = StubSubmitter::answering(201, ApiResponse::ok(""));
    let status = wizard.submit(&submitter, today()).await.unwrap().clone();
    assert_eq!(status, SubmitStatus::Success(DEFAULT_SUCCESS_MESSAGE.to_string()));

    let submitter = StubSubmitter::answering(500, ApiResponse::failure("Server error", Some(String::new())));
    let status = wizard.submit(&submitter, today()).await.unwrap().clone();
    assert_eq!(status, SubmitStatus::Error(DEFAULT_FAILURE_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_transport_failure_uses_generic_message() {
    let mut wizard = filled_wizard();
    let submitter = StubSubmitter::failing();

    let status = wizard.submit(&submitter, today()).await.unwrap().clone();
    assert_eq!(status, SubmitStatus::Error(TRANSPORT_FAILURE_MESSAGE.to_string()));
    assert_eq!(submitter.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_wizard_submits_to_running_server() {
    let app = setup_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let submitter = HttpQuoteSubmitter::new(&format!("http://{}/", addr));
    assert_eq!(submitter.endpoint(), format!("http://{}/api/quote", addr));

    let mut wizard = filled_wizard();
    let status = wizard.submit(&submitter, today()).await.unwrap().clone();
    assert!(matches!(status, SubmitStatus::Success(_)));

    let stored = app.quotes.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Jane Doe");
    assert_eq!(stored[0].delivery_date, NaiveDate::from_ymd_opt(2030, 6, 20).unwrap());
}
