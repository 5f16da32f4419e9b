//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use eventfeed_core::{OutputFormat, Status, TracingOutputFormat};

/// eventfeed - What's on, what's next, what's over
#[derive(Debug, Parser)]
#[command(name = "eventfeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "EVENTFEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Format of log messages on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, env = "EVENTFEED_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Classify against this instant instead of the clock (RFC 3339)
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<DateTime<Utc>>,

    // --- Display options ---
    /// Maximum title length (truncated with ellipsis)
    #[arg(long)]
    pub max_title_length: Option<usize>,

    // --- Filter flags ---
    /// Maximum number of events to display
    #[arg(long)]
    pub limit: Option<usize>,

    /// Skip events that are over
    #[arg(long)]
    pub hide_past: bool,

    /// Only show events with this status (can be repeated)
    #[arg(long = "status", value_parser = parse_status, action = clap::ArgAction::Append)]
    pub statuses: Vec<Status>,

    /// Feed document to read; stdin when omitted or `-`
    pub feed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }
}

/// Log message formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line, human-readable
    Pretty,
    /// JSON lines
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => Self::Compact,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Json => Self::Json,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn parse_status(s: &str) -> Result<Status, String> {
    Status::ALL
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| {
            let names: Vec<_> = Status::ALL.iter().map(Status::as_str).collect();
            format!("unknown status '{s}', expected one of: {}", names.join(", "))
        })
}
