//! Fieldsmith Generation Provider Layer
//!
//! Implementations of the `GenerationProvider` trait from `fieldsmith-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `HttpProvider`: JSON-over-HTTP generation service
//!
//! # Examples
//!
//! ```
//! use fieldsmith_llm::MockProvider;
//! use fieldsmith_domain::traits::GenerationProvider;
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"fields": []}"#);
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, r#"{"fields": []}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod http;

use fieldsmith_domain::traits::GenerationProvider;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use http::HttpProvider;

/// Errors that can occur during generation calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Success status but an unreadable body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Non-success status from the service
    #[error("Generation service error (HTTP {status}): {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Service-supplied message, or a generic one
        message: String,
    },

    /// Generic error
    #[error("Generation error: {0}")]
    Other(String),
}

/// Mock generation provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use fieldsmith_llm::MockProvider;
/// use fieldsmith_domain::traits::GenerationProvider;
///
/// # async fn example() {
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate("prompt1").await.unwrap(), "response1");
/// assert_eq!(provider.call_count(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Result<String, String>,
    responses: Arc<Mutex<HashMap<String, Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Ok(response.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every call with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default_response: Err(message.into()),
            ..Self::new("")
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Configure an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, message: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Err(message.into()));
    }

    /// Number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Most recent prompt received
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.prompts).last().cloned()
    }

    /// Reset the recorded prompts
    pub fn reset(&self) {
        lock(&self.prompts).clear();
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        lock(&self.prompts).push(prompt.to_string());

        let configured = lock(&self.responses).get(prompt).cloned();
        configured
            .unwrap_or_else(|| self.default_response.clone())
            .map_err(|message| LlmError::Service {
                status: 500,
                message,
            })
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"fields": []}"#)
    }
}

impl GenerationProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send {
        let result = self.respond(prompt);
        async move { result }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::new("fallback");
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello").await.unwrap(), "world");
        assert_eq!(provider.generate("foo").await.unwrap(), "bar");
        assert_eq!(provider.generate("unknown").await.unwrap(), "fallback");
    }

    #[tokio::test]
    async fn test_mock_provider_records_prompts() {
        let provider = MockProvider::default();
        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").await.unwrap();
        provider.generate("prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_prompt().as_deref(), Some("prompt2"));

        provider.reset();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt", "quota exhausted");

        let result = provider.generate("bad prompt").await;
        match result {
            Err(LlmError::Service { message, .. }) => assert_eq!(message, "quota exhausted"),
            other => panic!("Expected Service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = MockProvider::failing("down");
        assert!(provider.generate("anything").await.is_err());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
