//! Record module - the structured result of an email extraction

use crate::Industry;

/// Placeholder used when no organization name could be identified
pub const PLACEHOLDER_NAME: &str = "Organization Name";

/// Structured organization data extracted from free text
///
/// A record is a plain value: it is built fresh for each extraction and
/// handed back to the caller, which owns any persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// Organization name
    pub name: String,

    /// Location (city, state or country)
    pub location: String,

    /// Owners or leadership, comma separated
    pub owners: String,

    /// Short description of what the organization does
    pub activities: String,

    /// Age of the organization in years
    pub age: u32,

    /// Website URL
    pub website: String,

    /// Industry label
    pub industry: String,
}

impl ExtractedRecord {
    /// Create a record with an explicit industry bucket and its activities
    ///
    /// # Examples
    ///
    /// ```
    /// use orgscout_domain::{ExtractedRecord, Industry};
    ///
    /// let record = ExtractedRecord::for_industry(Industry::Consulting);
    /// assert_eq!(record.industry, "Consulting");
    /// assert_eq!(record.activities, "Consulting services, advisory");
    /// assert_eq!(record.name, "Organization Name");
    /// ```
    pub fn for_industry(industry: Industry) -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            location: String::new(),
            owners: String::new(),
            activities: industry.activities().to_string(),
            age: 0,
            website: String::new(),
            industry: industry.as_str().to_string(),
        }
    }

    /// Whether the name is still the placeholder
    pub fn has_placeholder_name(&self) -> bool {
        self.name == PLACEHOLDER_NAME
    }

    /// Owners split into individual entries
    pub fn owner_list(&self) -> Vec<&str> {
        self.owners
            .split(", ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// The industry bucket, if the label is one of the known ones
    pub fn industry_bucket(&self) -> Option<Industry> {
        Industry::parse(&self.industry)
    }
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self::for_industry(Industry::default())
    }
}
