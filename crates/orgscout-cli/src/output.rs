//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use orgscout_extractor::Extraction;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction result.
    pub fn format_extraction(&self, extraction: &Extraction) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_extraction_json(extraction),
            OutputFormat::Table => self.format_extraction_table(extraction),
            OutputFormat::Quiet => Ok(extraction.record.name.clone()),
        }
    }

    /// Format an extraction as the JSON response body.
    fn format_extraction_json(&self, extraction: &Extraction) -> Result<String> {
        Ok(serde_json::to_string_pretty(&extraction.to_response())?)
    }

    /// Format an extraction as a field/value table.
    fn format_extraction_table(&self, extraction: &Extraction) -> Result<String> {
        let record = &extraction.record;
        let age = record.age.to_string();

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Name", record.name.as_str()]);
        builder.push_record(["Location", record.location.as_str()]);
        builder.push_record(["Owners", record.owners.as_str()]);
        builder.push_record(["Activities", record.activities.as_str()]);
        builder.push_record(["Age", age.as_str()]);
        builder.push_record(["Website", record.website.as_str()]);
        builder.push_record(["Industry", record.industry.as_str()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let footer = format!(
            "Source: {} ({} ms)",
            extraction.source.as_str(),
            extraction.processing_time_ms
        );

        Ok(format!("{}\n{}", table, self.colorize(&footer, "cyan")))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
