//! Feed rendering: the default command.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use eventfeed_core::{FeedFormatter, OutputFormat};
use eventfeed_ingest::{FeedDocument, FeedError};

use crate::config::CliConfig;
use crate::error::CliResult;

/// Where the feed document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl FeedSource {
    /// Maps the positional argument to a source; `-` and no argument mean stdin.
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p != Path::new("-") => Self::File(p.to_path_buf()),
            _ => Self::Stdin,
        }
    }

    /// Name used in error messages and logs.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Reads and parses the feed document.
    pub fn load(&self) -> CliResult<FeedDocument> {
        let result = match self {
            Self::Stdin => FeedDocument::from_reader(io::stdin().lock()),
            Self::File(path) => File::open(path)
                .map_err(FeedError::from)
                .and_then(|file| FeedDocument::from_reader(BufReader::new(file))),
        };
        let document = result.map_err(|e| e.with_origin(self.label()))?;
        tracing::debug!(source = %self.label(), records = document.len(), "loaded feed");
        Ok(document)
    }
}

/// Everything needed to render one feed.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Where to read the feed from.
    pub source: FeedSource,
    /// Reference instant for classification and "now" literals.
    pub now: DateTime<Utc>,
    /// Output format.
    pub format: OutputFormat,
    /// Effective configuration (file merged with flags).
    pub config: CliConfig,
}

/// Loads, classifies, filters and prints a feed.
pub fn run(request: &RenderRequest, out: &mut impl Write) -> CliResult<()> {
    let document = request.source.load()?;
    render_document(&document, request, out)
}

/// Renders an already loaded document.
pub fn render_document(
    document: &FeedDocument,
    request: &RenderRequest,
    out: &mut impl Write,
) -> CliResult<()> {
    let events = document.build(request.now);
    let total = events.len();
    let events = request.config.filters.apply(events);
    tracing::debug!(total, shown = events.len(), now = %request.now, "feed built");

    let formatter = FeedFormatter::new(request.config.display.format_options());
    match request.format {
        OutputFormat::Tty => {
            for line in formatter.format_tty(&events) {
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            let output = formatter.format_json(&events, request.now);
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
