//! Policy command implementation.

use crate::cli::{PolicyAction, PolicyArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the policy command.
pub fn execute_policy(
    args: PolicyArgs,
    config: &Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        PolicyAction::Show => {
            println!("{}", render_policy(config, formatter)?);
        }
        PolicyAction::Init { force } => {
            if config_path.exists() && !force {
                return Err(CliError::InvalidInput(format!(
                    "{} already exists. Use --force to overwrite",
                    config_path.display()
                )));
            }
            Config::default().save_to(config_path)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default policy to {}", config_path.display()))
            );
        }
    }

    Ok(())
}

/// Render the effective policy in the requested format.
fn render_policy(config: &Config, formatter: &Formatter) -> Result<String> {
    match formatter.format() {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&config.policy)?),
        OutputFormat::Table | OutputFormat::Quiet => toml::to_string_pretty(&config.policy)
            .map_err(|e| CliError::Config(format!("Failed to serialize policy: {}", e))),
    }
}
