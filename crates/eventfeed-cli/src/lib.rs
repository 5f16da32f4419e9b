//! CLI, configuration and feed rendering
//!
//! This crate provides the `eventfeed` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
