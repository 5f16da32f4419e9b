//! Event types for the feed.
//!
//! This module provides the canonical event model:
//! - [`Status`]: Lifecycle of an event relative to a reference instant
//! - [`DateField`]: A raw date token paired with its parsed instant
//! - [`CanonicalEvent`]: A normalized, classified feed entry

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::parse_event_date;
use crate::status::classify;

/// Lifecycle status of an event relative to a reference instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Neither start nor end could be determined.
    #[default]
    Unknown,
    /// The event has not started yet.
    Upcoming,
    /// The event is running.
    Ongoing,
    /// The event is over.
    Past,
}

impl Status {
    /// Every status, in display priority order.
    pub const ALL: [Status; 4] = [Self::Ongoing, Self::Upcoming, Self::Past, Self::Unknown];

    /// Display priority; lower sorts first.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Ongoing => 0,
            Self::Upcoming => 1,
            Self::Past => 2,
            Self::Unknown => 3,
        }
    }

    /// Returns the lowercase identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Past => "past",
        }
    }

    /// Returns the badge text shown to readers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ongoing => "進行中",
            Self::Upcoming => "即將到來",
            Self::Past => "既往活動",
            Self::Unknown => "預告",
        }
    }

    /// Returns the CSS class renderers attach to an event card.
    pub fn css_class(&self) -> String {
        format!("status-{}", self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A date as written in the feed, plus the instant it parsed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateField {
    raw: String,
    at: Option<DateTime<Utc>>,
}

impl DateField {
    /// Parses `raw` against the reference instant.
    pub fn parse(raw: impl Into<String>, reference: DateTime<Utc>) -> Self {
        let raw = raw.into();
        let at = parse_event_date(&raw, reference);
        Self { raw, at }
    }

    /// A field that was absent from the input.
    pub fn absent() -> Self {
        Self::default()
    }

    /// The token exactly as written; empty when absent.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed instant, if the token was present and understood.
    pub fn at(&self) -> Option<DateTime<Utc>> {
        self.at
    }

    /// Returns true if a token was present but did not parse.
    pub fn is_unparsed(&self) -> bool {
        self.at.is_none() && !self.raw.trim().is_empty()
    }
}

/// A normalized, classified feed entry.
///
/// Built once per pipeline run and never mutated afterwards: fields are only
/// readable, and the status is fixed at construction from the start, end and
/// reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalEvent {
    title: String,
    description: String,
    location: String,
    tag: String,
    link: String,
    start: DateField,
    end: DateField,
    status: Status,
}

impl CanonicalEvent {
    /// Creates an event and classifies it against `now`.
    pub fn new(
        title: impl Into<String>,
        start: DateField,
        end: DateField,
        now: DateTime<Utc>,
    ) -> Self {
        let status = classify(start.at(), end.at(), now);
        Self {
            title: title.into(),
            description: String::new(),
            location: String::new(),
            tag: String::new(),
            link: String::new(),
            start,
            end,
            status,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to set the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Builder method to set the link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn start(&self) -> &DateField {
        &self.start
    }

    pub fn end(&self) -> &DateField {
        &self.end
    }

    /// The start token as written in the feed.
    pub fn start_raw(&self) -> &str {
        self.start.raw()
    }

    /// The end token as written in the feed.
    pub fn end_raw(&self) -> &str {
        self.end.raw()
    }

    pub fn start_at(&self) -> Option<DateTime<Utc>> {
        self.start.at()
    }

    pub fn end_at(&self) -> Option<DateTime<Utc>> {
        self.end.at()
    }

    /// The status computed when this event was built.
    pub fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    mod status {
        use super::*;

        #[test]
        fn priorities_follow_display_order() {
            let priorities: Vec<_> = Status::ALL.iter().map(Status::priority).collect();
            assert_eq!(priorities, [0, 1, 2, 3]);
        }

        #[test]
        fn labels_and_classes() {
            assert_eq!(Status::Ongoing.label(), "進行中");
            assert_eq!(Status::Upcoming.label(), "即將到來");
            assert_eq!(Status::Past.label(), "既往活動");
            assert_eq!(Status::Unknown.label(), "預告");
            assert_eq!(Status::Past.css_class(), "status-past");
            assert_eq!(Status::Upcoming.to_string(), "upcoming");
        }

        #[test]
        fn serde_uses_lowercase_names() {
            let json = serde_json::to_string(&Status::Ongoing).unwrap();
            assert_eq!(json, "\"ongoing\"");
            let parsed: Status = serde_json::from_str("\"past\"").unwrap();
            assert_eq!(parsed, Status::Past);
        }
    }

    mod date_field {
        use super::*;

        #[test]
        fn keeps_raw_token_when_unparseable() {
            let field = DateField::parse("next full moon", utc(2026, 1, 1, 0, 0, 0));
            assert_eq!(field.raw(), "next full moon");
            assert_eq!(field.at(), None);
            assert!(field.is_unparsed());
        }

        #[test]
        fn absent_field_is_empty() {
            let field = DateField::absent();
            assert_eq!(field.raw(), "");
            assert_eq!(field.at(), None);
            assert!(!field.is_unparsed());
        }

        #[test]
        fn parses_with_reference() {
            let now = utc(2026, 1, 1, 0, 0, 0);
            let field = DateField::parse("即日", now);
            assert_eq!(field.at(), Some(now));
        }
    }

    mod canonical_event {
        use super::*;

        #[test]
        fn new_classifies_against_now() {
            let now = utc(2026, 2, 1, 0, 0, 0);
            let event = CanonicalEvent::new(
                "Open mic",
                DateField::parse("2026-02-15 22:00(UTC+8)", now),
                DateField::absent(),
                now,
            );
            assert_eq!(event.status(), Status::Upcoming);
            assert_eq!(event.start_at(), Some(utc(2026, 2, 15, 14, 0, 0)));
            assert_eq!(event.end_raw(), "");
        }

        #[test]
        fn builders_fill_text_fields() {
            let now = utc(2026, 2, 1, 0, 0, 0);
            let event = CanonicalEvent::new("Gig", DateField::absent(), DateField::absent(), now)
                .with_description("Live set")
                .with_location("Taipei")
                .with_tag("music")
                .with_link("https://example.com/gig");
            assert_eq!(event.description(), "Live set");
            assert_eq!(event.location(), "Taipei");
            assert_eq!(event.tag(), "music");
            assert_eq!(event.link(), "https://example.com/gig");
            assert_eq!(event.status(), Status::Unknown);
        }

        #[test]
        fn status_is_fixed_at_construction() {
            let built_at = utc(2026, 2, 1, 0, 0, 0);
            let later = utc(2026, 2, 11, 0, 0, 0);
            let start = DateField::parse("2026-02-10T10:00+08:00", built_at);
            let end = DateField::parse("2026-02-12T18:00+08:00", built_at);

            let early = CanonicalEvent::new("Fair", start.clone(), end.clone(), built_at);
            let rebuilt = CanonicalEvent::new("Fair", start, end, later);

            assert_eq!(early.status(), Status::Upcoming);
            assert_eq!(rebuilt.status(), Status::Ongoing);
        }
    }
}
