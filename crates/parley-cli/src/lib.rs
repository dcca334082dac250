//! Parley CLI library.
//!
//! This library provides the core functionality for the Parley command-line interface,
//! including case-file loading, configuration management, command execution, and
//! output formatting.

pub mod case;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use case::CaseFile;
pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
