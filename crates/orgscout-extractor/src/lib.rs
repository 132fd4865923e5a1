//! orgscout Extractor
//!
//! Converts free-text email content into a structured organization record.
//!
//! # Overview
//!
//! Extraction has two paths. The primary path asks an LLM for the fields as a
//! JSON object. When that call fails, times out or answers with something
//! unusable, the pattern path takes over: ordered regular expressions and
//! keyword buckets that always produce a record.
//!
//! # Architecture
//!
//! ```text
//! Email → OrganizationExtractor → LLM → parser ──────→ ExtractedRecord
//!                                  └─ on failure → PatternExtractor ─┘
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use orgscout_extractor::{ExtractorConfig, OrganizationExtractor};
//! use orgscout_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"name": "Acme Corp"}"#);
//! let extractor = OrganizationExtractor::new(llm, ExtractorConfig::default());
//!
//! let result = extractor.extract("Hello from Acme Corp!").await?;
//!
//! println!("{} (via {})", result.record.name, result.source.as_str());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod pattern;
mod prompt;
mod types;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::OrganizationExtractor;
pub use parser::parse_llm_response;
pub use pattern::PatternExtractor;
pub use prompt::{PromptBuilder, SYSTEM_INSTRUCTIONS};
pub use types::{Extraction, ExtractionResponse, ExtractionSource};
