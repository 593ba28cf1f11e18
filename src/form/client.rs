use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::dto::api_response::ApiResponse;
use crate::dto::quote_dto::CreateQuoteRequest;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unreadable response: {0}")]
    Decode(String),
}

/// HTTP status plus the decoded envelope.
#[derive(Debug, Clone)]
pub struct SubmitReply {
    pub status: u16,
    pub body: ApiResponse,
}

impl SubmitReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.body.success
    }
}

/// Sends a completed quote to the intake endpoint.
#[async_trait]
pub trait QuoteSubmitter: Send + Sync {
    async fn submit(&self, request: &CreateQuoteRequest) -> Result<SubmitReply, SubmitError>;
}

pub struct HttpQuoteSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuoteSubmitter {
    /// `base_url` is the site root, e.g. `https://example.com`.
    pub fn new(base_url: &str) -> Self {
        HttpQuoteSubmitter {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/quote", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteSubmitter for HttpQuoteSubmitter {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn submit(&self, request: &CreateQuoteRequest) -> Result<SubmitReply, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .json::<ApiResponse>()
            .await
            .map_err(|e| SubmitError::Decode(e.to_string()))?;
        debug!(status, success = body.success, "Quote submission answered");
        Ok(SubmitReply { status, body })
    }
}
