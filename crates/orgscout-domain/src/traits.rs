//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::ExtractedRecord;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (orgscout-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a plain text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate a completion constrained to a JSON object
    ///
    /// `instructions` is sent as the system message, `prompt` as the user
    /// message.
    fn generate_json(&self, instructions: &str, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for turning free text into an organization record
///
/// Implemented by the application layer (orgscout-extractor)
pub trait RecordExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract an organization record from unstructured text
    fn extract_record(&self, text: &str) -> Result<ExtractedRecord, Self::Error>;
}
