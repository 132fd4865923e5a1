//! orgscout Domain Layer
//!
//! This crate contains the domain model for orgscout. It has ZERO external
//! dependencies and defines the value objects and trait interfaces that the
//! other crates depend upon.
//!
//! ## Key Concepts
//!
//! - **ExtractedRecord**: Structured organization data pulled from an email
//! - **Industry**: One of five fixed buckets, each with a canned activities text
//! - **LlmProvider**: Boundary to a remote language model
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types only
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod industry;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use industry::Industry;
pub use record::{ExtractedRecord, PLACEHOLDER_NAME};
