//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute a configuration action.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path_override: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.redacted().to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", Config::resolve_path(path_override)?.display());
        }
        ConfigAction::Init { force } => {
            let path = Config::resolve_path(path_override)?;
            init_config(&path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote {}", path.display()))
            );
            println!(
                "{}",
                formatter.info("Set GITHUB_TOKEN, GHE_BIGQUERY_PROJECT and GHE_BIGQUERY_TOKEN to supply credentials")
            );
        }
    }

    Ok(())
}

/// Write a default configuration file.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}
