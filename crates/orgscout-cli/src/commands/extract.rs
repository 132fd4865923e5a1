//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use orgscout_extractor::{Extraction, ExtractorConfig, OrganizationExtractor};
use orgscout_llm::config::API_KEY_ENV;
use orgscout_llm::OpenAiProvider;
use std::io::Read;
use tracing::{debug, warn};

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let email = read_input(&args)?;
    let extractor_config = extractor_config(&args, config)?;
    let extractor = build_extractor(&args, config, extractor_config)?;

    let extraction = extractor.extract(&email).await?;
    if let Some(notice) = missing_name_notice(&extraction, formatter) {
        eprintln!("{}", notice);
    }
    println!("{}", formatter.format_extraction(&extraction)?);

    Ok(())
}

/// Warning for records that still carry the placeholder name.
fn missing_name_notice(extraction: &Extraction, formatter: &Formatter) -> Option<String> {
    extraction
        .record
        .has_placeholder_name()
        .then(|| formatter.warning("No organization name found in the email"))
}

/// Read the email from exactly one of the positional text, `--file` or `--stdin`.
fn read_input(args: &ExtractArgs) -> Result<String> {
    let sources =
        usize::from(args.text.is_some()) + usize::from(args.file.is_some()) + usize::from(args.stdin);
    if sources != 1 {
        return Err(CliError::InvalidInput(
            "Provide exactly one of TEXT, --file or --stdin".to_string(),
        ));
    }

    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        debug!("Reading email from {}", path);
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Apply command-line overrides on top of the `[extractor]` section.
fn extractor_config(args: &ExtractArgs, config: &Config) -> Result<ExtractorConfig> {
    let mut extractor_config = config.extractor.clone();

    if let Some(year) = args.reference_year {
        extractor_config.reference_year = Some(year);
    }
    if args.no_fallback {
        extractor_config.fallback_on_error = false;
    }

    extractor_config.validate().map_err(CliError::InvalidInput)?;
    Ok(extractor_config)
}

fn build_extractor(
    args: &ExtractArgs,
    config: &Config,
    extractor_config: ExtractorConfig,
) -> Result<OrganizationExtractor<OpenAiProvider>> {
    if args.offline {
        debug!("Offline mode requested");
        return Ok(OrganizationExtractor::offline(extractor_config));
    }

    let Some(api_key) = config.llm.resolve_api_key() else {
        warn!(
            "No API key configured (set llm.api_key or {}), using pattern extraction",
            API_KEY_ENV
        );
        return Ok(OrganizationExtractor::offline(extractor_config));
    };

    let provider = OpenAiProvider::from_config(&config.llm, api_key)?;
    let model = provider.model().to_string();
    Ok(OrganizationExtractor::new(provider, extractor_config).with_model_name(model))
}
