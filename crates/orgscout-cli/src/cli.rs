//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// orgscout - Extract organization records from email text.
#[derive(Debug, Parser)]
#[command(name = "orgscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (name only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract an organization record from an email
    Extract(ExtractArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Email text (use --file or --stdin for longer input)
    pub text: Option<String>,

    /// Read the email from a file
    #[arg(long)]
    pub file: Option<String>,

    /// Read the email from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Skip the LLM and use pattern extraction only
    #[arg(long)]
    pub offline: bool,

    /// Fail instead of falling back when the LLM call fails
    #[arg(long, conflicts_with = "offline")]
    pub no_fallback: bool,

    /// Year that founding years are measured against
    #[arg(long)]
    pub reference_year: Option<i32>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (API key redacted)
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "orgscout",
            "extract",
            "Hello from Acme Corp",
            "--offline",
            "--reference-year",
            "2025",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.text.as_deref(), Some("Hello from Acme Corp"));
                assert!(args.offline);
                assert_eq!(args.reference_year, Some(2025));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["orgscout", "extract", "--stdin", "-f", "json", "-v"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_offline_conflicts_with_no_fallback() {
        let result = Cli::try_parse_from(["orgscout", "extract", "x", "--offline", "--no-fallback"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["orgscout", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }
}
