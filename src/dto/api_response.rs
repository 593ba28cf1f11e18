use serde::{Deserialize, Serialize};

/// Envelope returned by the form endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok<M: Into<String>>(message: M) -> Self {
        ApiResponse { success: true, message: message.into(), quote_id: None, error: None }
    }

    pub fn failure<M: Into<String>>(message: M, error: Option<String>) -> Self {
        ApiResponse { success: false, message: message.into(), quote_id: None, error }
    }

    pub fn with_quote_id(mut self, quote_id: String) -> Self {
        self.quote_id = Some(quote_id);
        self
    }
}
