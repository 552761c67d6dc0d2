//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// Trait for text-generation services
///
/// Implemented by the infrastructure layer (fieldsmith-llm). A call sends a
/// single prompt and resolves to the raw completion text. Implementations do
/// not retry; a failed call is terminal for that invocation.
pub trait GenerationProvider {
    /// Error type for generation calls
    type Error;

    /// Generate a completion for the prompt
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Short name used in logs
    fn name(&self) -> &str {
        "generation-service"
    }
}
