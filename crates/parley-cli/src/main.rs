//! Parley CLI - Settlement valuation and offer review from the command line.

use clap::Parser;
use parley_cli::commands;
use parley_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing (log to stderr, keep stdout for results)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> parley_cli::Result<()> {
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Evaluate(args) => commands::execute_evaluate(args, &config, &formatter)?,
        Command::Offers(args) => commands::execute_offers(args, &formatter)?,
        Command::Policy(args) => {
            commands::execute_policy(args, &config, &config_path, &formatter)?
        }
    }

    Ok(())
}
