//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventfeed/config.toml` by default. Every section is optional;
//! command-line flags win over the file.
//!
//! ```toml
//! debug = false
//!
//! [display]
//! max_title_length = 40
//! range_separator = " ～ "
//! empty_text = "目前沒有活動"
//!
//! [filters]
//! limit = 10
//! hide_past = true
//! statuses = ["ongoing", "upcoming"]
//! ```

use std::path::{Path, PathBuf};

use eventfeed_core::format::{DEFAULT_EMPTY_TEXT, DEFAULT_RANGE_SEPARATOR};
use eventfeed_core::{CanonicalEvent, FormatOptions, Status};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{CliError, CliResult};

/// Shortest title length that still leaves room for the ellipsis.
const MIN_TITLE_LENGTH: usize = 4;

/// Configuration for the eventfeed CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Debug mode.
    pub debug: bool,

    /// Display settings.
    pub display: DisplaySettings,

    /// Filter settings.
    pub filters: FilterSettings,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum title length (truncated with ellipsis).
    pub max_title_length: Option<usize>,

    /// Placed between start and end dates.
    pub range_separator: String,

    /// Text to show when there are no events.
    pub empty_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_title_length: None,
            range_separator: DEFAULT_RANGE_SEPARATOR.to_string(),
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
        }
    }
}

impl DisplaySettings {
    /// Converts to formatter options.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_title_length: self.max_title_length,
            range_separator: self.range_separator.clone(),
            empty_text: self.empty_text.clone(),
        }
    }
}

/// Filter settings for event selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Maximum number of events to display.
    pub limit: Option<usize>,

    /// Skip events that are over.
    pub hide_past: bool,

    /// Only keep events with these statuses; empty keeps all.
    pub statuses: Vec<Status>,
}

impl FilterSettings {
    /// Returns true if the event passes the status filters.
    pub fn keeps(&self, event: &CanonicalEvent) -> bool {
        let status = event.status();
        if self.hide_past && status == Status::Past {
            return false;
        }
        self.statuses.is_empty() || self.statuses.contains(&status)
    }

    /// Filters an ordered feed, keeping its order, then applies the limit.
    pub fn apply(&self, events: Vec<CanonicalEvent>) -> Vec<CanonicalEvent> {
        let kept = events.into_iter().filter(|e| self.keeps(e));
        match self.limit {
            Some(limit) => kept.take(limit).collect(),
            None => kept.collect(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventfeed")
    }

    /// Overlays command-line flags on top of the file settings.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        self.debug |= cli.debug;
        if cli.max_title_length.is_some() {
            self.display.max_title_length = cli.max_title_length;
        }
        if cli.limit.is_some() {
            self.filters.limit = cli.limit;
        }
        self.filters.hide_past |= cli.hide_past;
        if !cli.statuses.is_empty() {
            self.filters.statuses = cli.statuses.clone();
        }
        self
    }

    /// Checks the settings for values that can never produce useful output.
    pub fn validate(&self) -> CliResult<()> {
        if let Some(max) = self.display.max_title_length {
            if max < MIN_TITLE_LENGTH {
                return Err(CliError::Config(format!(
                    "display.max_title_length must be at least {MIN_TITLE_LENGTH}, got {max}"
                )));
            }
        }

        if self.filters.limit == Some(0) {
            return Err(CliError::Config(
                "filters.limit must be at least 1".to_string(),
            ));
        }

        if self.filters.hide_past
            && !self.filters.statuses.is_empty()
            && self.filters.statuses.iter().all(|s| *s == Status::Past)
        {
            return Err(CliError::Config(
                "filters.hide_past removes every status listed in filters.statuses".to_string(),
            ));
        }

        Ok(())
    }
}
