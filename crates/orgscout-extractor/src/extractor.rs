//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::pattern::PatternExtractor;
use crate::prompt::PromptBuilder;
use crate::types::{Extraction, ExtractionSource};
use orgscout_domain::traits::LlmProvider;
use orgscout_domain::ExtractedRecord;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns email text into organization records
///
/// Asks the injected LLM provider first and falls back to the
/// [`PatternExtractor`] when that call fails, times out or answers with
/// something that is not a JSON object. Without a provider it goes straight
/// to the pattern path.
pub struct OrganizationExtractor<L>
where
    L: LlmProvider,
{
    llm_provider: Option<Arc<L>>,
    pattern: PatternExtractor,
    config: ExtractorConfig,
    model_name: String,
}

impl<L> OrganizationExtractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor backed by an LLM provider
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self::with_provider(Some(Arc::new(llm_provider)), config)
    }

    /// Create an Extractor that only uses pattern extraction
    pub fn offline(config: ExtractorConfig) -> Self {
        Self::with_provider(None, config)
    }

    fn with_provider(llm_provider: Option<Arc<L>>, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            pattern: PatternExtractor::from_config(&config),
            config,
            model_name: "llm".to_string(),
        }
    }

    /// Create a new Extractor with a specific model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Replace the pattern extractor, e.g. to pin the reference year
    pub fn with_pattern_extractor(mut self, pattern: PatternExtractor) -> Self {
        self.pattern = pattern;
        self
    }

    /// Whether no remote provider is configured
    pub fn is_offline(&self) -> bool {
        self.llm_provider.is_none()
    }

    /// The fallback extractor
    pub fn pattern_extractor(&self) -> PatternExtractor {
        self.pattern
    }

    /// Extract an organization record from email text
    ///
    /// # Errors
    ///
    /// Returns error if the input is empty or too long. Remote failures only
    /// surface when `fallback_on_error` is disabled.
    pub async fn extract(&self, email: &str) -> Result<Extraction, ExtractorError> {
        self.validate(email)?;
        let start_time = Instant::now();

        info!(
            "Starting extraction, text length {} chars",
            email.chars().count()
        );

        let (record, source) = match &self.llm_provider {
            None => {
                debug!("No LLM provider configured, using pattern extraction");
                (self.pattern.extract(email), ExtractionSource::Pattern)
            }
            Some(llm) => match self.extract_remote(llm, email).await {
                Ok(record) => (record, ExtractionSource::Remote),
                Err(e) if self.config.fallback_on_error => {
                    warn!("Remote extraction failed ({}), using pattern-based fallback", e);
                    (self.pattern.extract(email), ExtractionSource::Pattern)
                }
                Err(e) => return Err(e),
            },
        };

        let processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Extraction complete via {} in {} ms: {}",
            source.as_str(),
            processing_time_ms,
            record.name
        );

        Ok(Extraction {
            record,
            source,
            email_content: email.to_string(),
            processing_time_ms,
        })
    }

    /// Extract with the pattern extractor only, ignoring any provider
    ///
    /// # Errors
    ///
    /// Returns error if the input is empty or too long.
    pub fn extract_offline(&self, email: &str) -> Result<Extraction, ExtractorError> {
        self.validate(email)?;
        let start_time = Instant::now();

        let record = self.pattern.extract(email);
        debug!("Offline extraction: {}", record.name);

        Ok(Extraction {
            record,
            source: ExtractionSource::Pattern,
            email_content: email.to_string(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    fn validate(&self, email: &str) -> Result<(), ExtractorError> {
        if email.trim().is_empty() {
            return Err(ExtractorError::EmptyInput);
        }

        let length = email.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }
        Ok(())
    }

    async fn extract_remote(
        &self,
        llm: &Arc<L>,
        email: &str,
    ) -> Result<ExtractedRecord, ExtractorError> {
        let builder = PromptBuilder::new(email);
        let prompt = builder.build();

        debug!("Prompt length: {} chars", prompt.len());

        // Call LLM with timeout
        let llm_response = timeout(
            self.config.extraction_timeout(),
            self.call_llm(Arc::clone(llm), builder.instructions(), prompt),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)??;

        debug!(
            "LLM response length from {}: {} chars",
            self.model_name,
            llm_response.len()
        );

        parse_llm_response(&llm_response)
    }

    /// Call the LLM provider
    async fn call_llm(
        &self,
        llm: Arc<L>,
        instructions: &'static str,
        prompt: String,
    ) -> Result<String, ExtractorError> {
        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            llm.generate_json(instructions, &prompt)
                .map_err(|e| ExtractorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))?
    }
}
