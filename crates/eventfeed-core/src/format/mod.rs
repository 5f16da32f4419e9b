//! Presentation mapping for classified events.
//!
//! This module turns [`CanonicalEvent`]s into display-ready records:
//! - **TTY**: one human-readable line per event
//! - **JSON**: [`JsonOutput`] with one [`EventView`] per event
//!
//! Dates are shown in the feed's fixed display offset (UTC+8) using the
//! `zh-Hant` conventions of the event pages: `2026/02/15 週日 22:00`.
//!
//! Markup escaping is left to the renderer; [`html_escape`] is provided for
//! renderers that build HTML.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use eventfeed_core::{CanonicalEvent, DateField, FeedFormatter};
//!
//! let now = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
//! let event = CanonicalEvent::new(
//!     "Open mic",
//!     DateField::parse("2026-02-15 22:00(UTC+8)", now),
//!     DateField::absent(),
//!     now,
//! );
//! let lines = FeedFormatter::with_defaults().format_tty(&[event]);
//! assert_eq!(lines, ["[即將到來] Open mic | 2026/02/15 週日 22:00"]);
//! ```

use std::borrow::Cow;

use chrono::{DateTime, Datelike, FixedOffset, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::date::ASSUMED_OFFSET_SECONDS;
use crate::event::{CanonicalEvent, DateField, Status};

/// Separator placed between the start and end of a date range.
pub const DEFAULT_RANGE_SEPARATOR: &str = " ～ ";

/// Text shown when a feed has no events.
pub const DEFAULT_EMPTY_TEXT: &str = "目前沒有活動";

/// The output format for feed display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for titles (truncated with ellipsis).
    pub max_title_length: Option<usize>,
    /// Placed between start and end dates.
    pub range_separator: String,
    /// Shown instead of an empty list.
    pub empty_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_title_length: None,
            range_separator: DEFAULT_RANGE_SEPARATOR.to_string(),
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
        }
    }
}

/// A display-ready view of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventView {
    /// Title, possibly truncated.
    pub title: String,
    /// Lifecycle status.
    pub status: Status,
    /// Badge text for the status.
    pub status_label: String,
    /// CSS class for the event card.
    pub css_class: String,
    /// Start and end joined for display; empty when neither is known.
    pub date: String,
    /// Location, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Category tag, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Free-text description (may be empty).
    pub description: String,
    /// Link for more details, when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Parsed start, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    /// Parsed end, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
}

impl EventView {
    /// Builds a view of the event with the given options.
    pub fn from_event(event: &CanonicalEvent, options: &FormatOptions) -> Self {
        let title = match options.max_title_length {
            Some(max) => ellipsis(event.title(), max).into_owned(),
            None => event.title().to_string(),
        };

        Self {
            title,
            status: event.status(),
            status_label: event.status().label().to_string(),
            css_class: event.status().css_class(),
            date: display_date(event, &options.range_separator),
            location: non_empty(event.location()),
            tag: non_empty(event.tag()),
            description: event.description().to_string(),
            link: non_empty(event.link()),
            start_at: event.start_at(),
            end_at: event.end_at(),
        }
    }
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Events in display order.
    pub events: Vec<EventView>,
    /// Number of events returned.
    pub count: usize,
    /// The reference instant the statuses were computed against.
    pub generated_at: DateTime<Utc>,
}

/// Output formatter for classified events.
#[derive(Debug, Clone)]
pub struct FeedFormatter {
    options: FormatOptions,
}

impl FeedFormatter {
    /// Creates a new FeedFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new FeedFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Builds the display views for the events, keeping their order.
    pub fn views(&self, events: &[CanonicalEvent]) -> Vec<EventView> {
        events
            .iter()
            .map(|e| EventView::from_event(e, &self.options))
            .collect()
    }

    /// Formats events for TTY output.
    ///
    /// Each line reads `[badge] title | date | location | #tag`, skipping
    /// empty parts. An empty feed yields the configured empty text.
    pub fn format_tty(&self, events: &[CanonicalEvent]) -> Vec<String> {
        if events.is_empty() {
            return vec![self.options.empty_text.clone()];
        }

        self.views(events).iter().map(format_tty_line).collect()
    }

    /// Formats events as JSON output.
    pub fn format_json(
        &self,
        events: &[CanonicalEvent],
        generated_at: DateTime<Utc>,
    ) -> JsonOutput {
        let views = self.views(events);
        JsonOutput {
            count: views.len(),
            events: views,
            generated_at,
        }
    }
}

fn format_tty_line(view: &EventView) -> String {
    let mut parts = vec![format!("[{}] {}", view.status_label, view.title)];
    if !view.date.is_empty() {
        parts.push(view.date.clone());
    }
    if let Some(ref location) = view.location {
        parts.push(location.clone());
    }
    if let Some(ref tag) = view.tag {
        parts.push(format!("#{tag}"));
    }
    parts.join(" | ")
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// The fixed offset dates are displayed in.
pub fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(ASSUMED_OFFSET_SECONDS).expect("UTC+8 is a valid offset")
}

/// Formats an instant as `YYYY/MM/DD 週X HH:MM` in the display offset.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&display_offset());
    format!(
        "{} {} {}",
        local.format("%Y/%m/%d"),
        weekday_label(local.weekday()),
        local.format("%H:%M")
    )
}

/// Short Traditional Chinese weekday name.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "週一",
        Weekday::Tue => "週二",
        Weekday::Wed => "週三",
        Weekday::Thu => "週四",
        Weekday::Fri => "週五",
        Weekday::Sat => "週六",
        Weekday::Sun => "週日",
    }
}

/// Text for one side of a date range.
///
/// Parsed dates are formatted, "now" literals included; unparseable tokens
/// are shown as written.
pub fn display_date_field(field: &DateField) -> String {
    match field.at() {
        Some(at) => format_instant(at),
        None => field.raw().trim().to_string(),
    }
}

/// The event's start and end joined by `separator`, empty sides dropped.
pub fn display_date(event: &CanonicalEvent, separator: &str) -> String {
    [display_date_field(event.start()), display_date_field(event.end())]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    let char_count = s.chars().count();

    if char_count <= max_len {
        return Cow::Borrowed(s);
    }

    // No room for the marker: hard cut.
    if max_len <= 3 {
        return Cow::Owned(s.chars().take(max_len).collect());
    }

    let truncated: String = s.chars().take(max_len - 3).collect();
    Cow::Owned(format!("{}...", truncated))
}

/// Escapes text for HTML display.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

#[cfg(test)]
mod golden_tests;
