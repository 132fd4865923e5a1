//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config, path, formatter),
        ConfigAction::Init { force } => init_config(path, force, formatter),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Print the effective configuration with secrets masked.
fn show_config(config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    if !path.exists() {
        println!(
            "{}",
            formatter.info(&format!("{} not found, showing defaults", path.display()))
        );
    }
    print!("{}", config.redacted().to_toml()?);
    Ok(())
}

/// Write a default configuration file.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if write_default(path, force)? {
        println!(
            "{}",
            formatter.success(&format!("Wrote default configuration to {}", path.display()))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            ))
        );
    }
    Ok(())
}

/// Returns false when an existing file was left alone.
fn write_default(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    Config::default().save_to(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".orgscout").join("config.toml");

        assert!(write_default(&path, false).unwrap());
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.llm.model, "gpt-4o");
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm]\nmodel = \"custom\"\n").unwrap();

        assert!(!write_default(&path, false).unwrap());
        assert_eq!(Config::load_from(&path).unwrap().llm.model, "custom");

        assert!(write_default(&path, true).unwrap());
        assert_eq!(Config::load_from(&path).unwrap().llm.model, "gpt-4o");
    }
}
