//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Year that founding years are measured against; `None` means the
    /// current calendar year at startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,

    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single remote extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Fall back to pattern extraction when the remote call fails
    pub fallback_on_error: bool,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if let Some(year) = self.reference_year {
            if year <= 1900 {
                return Err(format!("reference_year {} must be after 1900", year));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            reference_year: None,
            max_text_length: 50_000,
            extraction_timeout_secs: 60,
            fallback_on_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.fallback_on_error);
        assert_eq!(config.extraction_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_max_text_length() {
        let mut config = ExtractorConfig::default();
        config.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_reference_year() {
        let mut config = ExtractorConfig::default();
        config.reference_year = Some(1800);
        assert!(config.validate().is_err());

        config.reference_year = Some(2025);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig {
            reference_year: Some(2025),
            ..ExtractorConfig::default()
        };
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("fallback_on_error = false").unwrap();
        assert!(!parsed.fallback_on_error);
        assert_eq!(parsed.reference_year, None);
        assert_eq!(parsed.max_text_length, 50_000);
    }
}
