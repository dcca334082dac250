//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Parley CLI - Value a litigation claim and review settlement offers.
#[derive(Debug, Parser)]
#[command(name = "parley")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PARLEY_CONFIG")]
    pub config: Option<String>,

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
    /// Quiet format (recommendation or IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Value a case and recommend a response to the pending offer
    Evaluate(EvaluateArgs),

    /// Show the offer history of a case
    Offers(OffersArgs),

    /// Inspect or initialize the engine policy
    Policy(PolicyArgs),
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Case file (JSON)
    pub case: String,

    /// Offer to evaluate (overrides the case file)
    #[arg(short, long)]
    pub offer: Option<f64>,

    /// Overall win probability in percent (overrides the case file)
    #[arg(short, long)]
    pub win_probability: Option<f64>,

    /// Months to trial (overrides the case file)
    #[arg(short, long)]
    pub months: Option<f64>,

    /// Annual discount rate in percent (overrides the case file)
    #[arg(short, long)]
    pub discount_rate: Option<f64>,
}

/// Arguments for the offers command.
#[derive(Debug, Parser)]
pub struct OffersArgs {
    /// Case file (JSON)
    pub case: String,

    /// Only show offers still open at this time (unix millis)
    #[arg(long)]
    pub open_at: Option<u64>,
}

/// Arguments for policy management.
#[derive(Debug, Parser)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub action: PolicyAction,
}

/// Policy actions.
#[derive(Debug, Subcommand)]
pub enum PolicyAction {
    /// Print the effective policy
    Show,

    /// Write a config file containing the default policy
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
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
