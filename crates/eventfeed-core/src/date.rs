//! Date token parsing for hand-authored event feeds.
//!
//! Feed authors write dates in a handful of ad-hoc notations:
//! - `2026-02-15T22:00+08:00` (standard RFC 3339, seconds optional)
//! - `2026-02-15 22:00(UTC+8)` (space separator, annotated offset)
//! - `2026/02/15 22:00` (slashes, no offset at all)
//! - `即日起` ("starting now")
//!
//! [`parse_event_date`] turns such a token into an instant, or `None` when the
//! token is empty or cannot be understood. It never fails loudly: the caller
//! keeps the raw token around for display.
//!
//! Before the final parse the token goes through [`DATE_RULES`], an ordered
//! list of textual rewrites. A date-time that still lacks an offset after the
//! rewrites is pinned to [`ASSUMED_OFFSET`]. That is a project convention, not
//! a timezone lookup: the reader's local offset is never consulted.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use eventfeed_core::date::parse_event_date;
//!
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//! let annotated = parse_event_date("2026-02-15 22:00(UTC+8)", now);
//! let explicit = parse_event_date("2026-02-15T22:00+08:00", now);
//! assert_eq!(annotated, explicit);
//! assert_eq!(parse_event_date("即日起", now), Some(now));
//! assert_eq!(parse_event_date("next tuesday", now), None);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::{Captures, Regex};

/// Offset of the `UTC+8` annotation, in textual form.
pub const UTC_PLUS_8: &str = "+08:00";

/// Offset given to combined date-times that carry none.
pub const ASSUMED_OFFSET: &str = UTC_PLUS_8;

/// [`ASSUMED_OFFSET`] in seconds east of UTC.
pub const ASSUMED_OFFSET_SECONDS: i32 = 8 * 3600;

/// Literals meaning "starting now". They resolve to the reference instant.
pub const NOW_LITERALS: &[&str] = &["即日起", "即日", "現在"];

/// `2026/2/5` style dates at the start of a token.
static SLASH_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})").expect("Invalid slash date regex")
});

/// Parenthesized `UTC+8` annotations: `(UTC+8)`, `(utc+08:00)`, `（UTC8）`.
static UTC8_ANNOTATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[(（]\s*UTC\s*\+?\s*0?8(?::?00)?\s*[)）]")
        .expect("Invalid UTC+8 annotation regex")
});

/// A date followed by whitespace and a time.
static SPACED_DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2})").expect("Invalid spaced datetime regex")
});

/// A combined date-time with nothing after the time part.
static OFFSETLESS_DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?$")
        .expect("Invalid offsetless datetime regex")
});

/// Formats tried after RFC 3339, for tokens with a numeric offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M:%S%z",
];

/// Formats for tokens ending with a literal `Z`.
const ZULU_FORMATS: &[&str] = &["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%SZ"];

/// A single textual rewrite applied to a date token before parsing.
#[derive(Clone, Copy)]
pub struct DateRule {
    /// Short identifier, used in trace output.
    pub name: &'static str,
    /// The rewrite itself. Returns the input unchanged when the rule does not apply.
    pub apply: fn(&str) -> Cow<'_, str>,
}

impl fmt::Debug for DateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRule").field("name", &self.name).finish()
    }
}

/// The rewrite rules, in the order they run.
pub const DATE_RULES: &[DateRule] = &[
    DateRule {
        name: "slash_date",
        apply: rewrite_slash_date,
    },
    DateRule {
        name: "utc8_annotation",
        apply: rewrite_utc8_annotation,
    },
    DateRule {
        name: "space_separator",
        apply: rewrite_space_separator,
    },
    DateRule {
        name: "assumed_offset",
        apply: append_assumed_offset,
    },
];

/// Rewrites `YYYY/M/D` into `YYYY-MM-DD`.
///
/// A slash date with no time part becomes local midnight (`T00:00`), so it
/// picks up [`ASSUMED_OFFSET`] like any other offset-less date-time.
pub fn rewrite_slash_date(token: &str) -> Cow<'_, str> {
    SLASH_DATE_REGEX.replace(token, |caps: &Captures<'_>| {
        let date = format!("{}-{:0>2}-{:0>2}", &caps[1], &caps[2], &caps[3]);
        let date_only = caps.get(0).is_some_and(|m| m.end() == token.len());
        if date_only {
            format!("{date}T00:00")
        } else {
            date
        }
    })
}

/// Replaces a parenthesized `UTC+8` annotation with [`UTC_PLUS_8`].
pub fn rewrite_utc8_annotation(token: &str) -> Cow<'_, str> {
    UTC8_ANNOTATION_REGEX.replace_all(token, UTC_PLUS_8)
}

/// Joins date and time with `T` instead of whitespace.
pub fn rewrite_space_separator(token: &str) -> Cow<'_, str> {
    SPACED_DATETIME_REGEX.replace(token, "${1}T${2}")
}

/// Appends [`ASSUMED_OFFSET`] to a combined date-time without an offset.
pub fn append_assumed_offset(token: &str) -> Cow<'_, str> {
    if OFFSETLESS_DATETIME_REGEX.is_match(token) {
        Cow::Owned(format!("{token}{ASSUMED_OFFSET}"))
    } else {
        Cow::Borrowed(token)
    }
}

/// Returns true if the token is one of the [`NOW_LITERALS`].
pub fn is_now_literal(token: &str) -> bool {
    NOW_LITERALS.contains(&token.trim())
}

/// Runs every rule in [`DATE_RULES`] over the token, in order.
pub fn rewrite_token(token: &str) -> String {
    DATE_RULES.iter().fold(token.to_string(), |acc, rule| {
        let rewritten = (rule.apply)(&acc);
        if rewritten != acc {
            tracing::trace!(rule = rule.name, from = %acc, to = %rewritten, "date rule applied");
        }
        rewritten.into_owned()
    })
}

/// Parses a feed date token into an instant.
///
/// `reference` is returned verbatim for the "now" literals, so callers must
/// pass the same instant they classify against.
///
/// Returns `None` for empty tokens and for tokens no strategy understands.
pub fn parse_event_date(token: &str, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_now_literal(trimmed) {
        return Some(reference);
    }

    let rewritten = rewrite_token(trimmed);
    let parsed = parse_standard(&rewritten);
    if parsed.is_none() {
        tracing::debug!(token = trimmed, rewritten = %rewritten, "unparseable date token");
    }
    parsed
}

/// Parses an already rewritten token as a standard date-time.
fn parse_standard(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = ZULU_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    // A bare ISO date is midnight UTC.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
