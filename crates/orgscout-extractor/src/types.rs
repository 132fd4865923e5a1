//! Result and response types for extraction

use orgscout_domain::ExtractedRecord;
use serde::{Deserialize, Serialize};

/// Which path produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    /// The remote LLM answered with a usable JSON object
    Remote,
    /// The pattern extractor ran, as fallback or offline
    Pattern,
}

impl ExtractionSource {
    /// Get the source name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionSource::Remote => "remote",
            ExtractionSource::Pattern => "pattern",
        }
    }
}

/// Result of an extraction operation
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The extracted record
    pub record: ExtractedRecord,

    /// Path that produced the record
    pub source: ExtractionSource,

    /// The email text the record was extracted from
    pub email_content: String,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl Extraction {
    /// Build the API response body for this extraction
    pub fn to_response(&self) -> ExtractionResponse {
        ExtractionResponse::new(&self.record, &self.email_content)
    }
}

/// Response body returned to API callers
///
/// The record fields come first and the original email is appended as
/// `emailContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    /// Organization name
    pub name: String,
    /// Location
    pub location: String,
    /// Owners, comma separated
    pub owners: String,
    /// Activities description
    pub activities: String,
    /// Age in years
    pub age: u32,
    /// Website URL
    pub website: String,
    /// Industry label
    pub industry: String,
    /// The original email text
    pub email_content: String,
}

impl ExtractionResponse {
    /// Combine a record with the email it came from
    pub fn new(record: &ExtractedRecord, email_content: &str) -> Self {
        Self {
            name: record.name.clone(),
            location: record.location.clone(),
            owners: record.owners.clone(),
            activities: record.activities.clone(),
            age: record.age,
            website: record.website.clone(),
            industry: record.industry.clone(),
            email_content: email_content.to_string(),
        }
    }

    /// The record part of the response
    pub fn record(&self) -> ExtractedRecord {
        ExtractedRecord {
            name: self.name.clone(),
            location: self.location.clone(),
            owners: self.owners.clone(),
            activities: self.activities.clone(),
            age: self.age,
            website: self.website.clone(),
            industry: self.industry.clone(),
        }
    }
}
