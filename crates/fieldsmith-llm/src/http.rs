//! HTTP Generation Provider
//!
//! Talks to a generation service over a single JSON endpoint.
//!
//! # Protocol
//!
//! - Request: `POST {endpoint}` with body `{"prompt": "..."}`
//! - Optional `Authorization: Bearer <key>`
//! - Success: status 2xx with body `{"text": "..."}`
//!
//! One attempt per call. Retrying is left to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use fieldsmith_llm::HttpProvider;
//!
//! let provider = HttpProvider::new("http://localhost:8080/generate")
//!     .unwrap()
//!     .with_api_key("secret");
//! ```

use crate::LlmError;
use fieldsmith_domain::traits::GenerationProvider;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for generation requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Generation service reachable over HTTP
#[derive(Debug, Clone)]
pub struct HttpProvider {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    text: String,
}

impl HttpProvider {
    /// Create a provider with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with an explicit request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: None,
            client,
        })
    }

    /// Send `Authorization: Bearer <key>` with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one prompt and return the generated text
    ///
    /// # Errors
    ///
    /// - `Communication` when the service cannot be reached
    /// - `Service` for a non-success status
    /// - `InvalidResponse` when a 2xx body lacks a string `text`
    pub async fn send_prompt(&self, prompt: &str) -> Result<String, LlmError> {
        debug!("Sending {} byte prompt to {}", prompt.len(), self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest { prompt });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = service_message(&body).unwrap_or_else(|| {
                format!("generation service returned HTTP {}", status.as_u16())
            });
            warn!("Generation service responded {}: {}", status, message);
            return Err(LlmError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        debug!("Received {} bytes of generated text", parsed.text.len());
        Ok(parsed.text)
    }
}

impl GenerationProvider for HttpProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send {
        self.send_prompt(prompt)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Pull a human-readable message out of an error body
///
/// Checks `error` (string), `error.message`, then `message`.
fn service_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(error) = value.get("error") {
        if let Some(text) = error.as_str() {
            return Some(text.to_string());
        }
        if let Some(text) = error.get("message").and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_string_error() {
        assert_eq!(
            service_message(r#"{"error": "quota exceeded"}"#).as_deref(),
            Some("quota exceeded")
        );
    }

    #[test]
    fn test_service_message_nested_error() {
        assert_eq!(
            service_message(r#"{"error": {"message": "bad key", "code": 401}}"#).as_deref(),
            Some("bad key")
        );
    }

    #[test]
    fn test_service_message_top_level() {
        assert_eq!(
            service_message(r#"{"message": "overloaded"}"#).as_deref(),
            Some("overloaded")
        );
    }

    #[test]
    fn test_service_message_absent() {
        assert_eq!(service_message("<html>502</html>"), None);
        assert_eq!(service_message(r#"{"error": 42}"#), None);
        assert_eq!(service_message(r#"{"detail": "nope"}"#), None);
    }

    #[test]
    fn test_api_key_builder() {
        let provider = HttpProvider::new("http://localhost:8080/generate")
            .unwrap()
            .with_api_key("secret");
        assert_eq!(provider.api_key.as_deref(), Some("secret"));
        assert_eq!(provider.endpoint(), "http://localhost:8080/generate");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let provider = HttpProvider::new("http://localhost:99999/generate").unwrap();
        let result = provider.send_prompt("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
