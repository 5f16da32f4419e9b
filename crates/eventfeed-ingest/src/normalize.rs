//! Raw record to CanonicalEvent conversion.
//!
//! This module handles the transformation from loosely-typed feed entries to
//! the canonical [`CanonicalEvent`] representation.
//!
//! The normalization process:
//! 1. Views the entry as a [`RawEventRecord`] (non-objects are rejected)
//! 2. Resolves each attribute through its alias list and coerces it to text
//! 3. Parses the start and end tokens against the reference instant
//! 4. Builds the event, which classifies itself against the same instant

use chrono::{DateTime, Utc};
use eventfeed_core::{CanonicalEvent, DateField};
use serde_json::Value;

use crate::raw_event::{DESCRIPTION, END, LINK, LOCATION, RawEventRecord, START, TAG, TITLE};

/// Title given to entries without one: `活動 1`, `活動 2`, ...
pub fn placeholder_title(index: usize) -> String {
    format!("活動 {}", index + 1)
}

/// Converts a feed entry to a [`CanonicalEvent`].
///
/// `index` is the entry's position in the feed and only feeds the placeholder
/// title. `reference` is used both for the "now" date literals and for the
/// status, so one call is internally consistent.
///
/// Returns `None` when the entry is not a JSON object.
pub fn normalize_event(
    raw: &Value,
    index: usize,
    reference: DateTime<Utc>,
) -> Option<CanonicalEvent> {
    let record = RawEventRecord::from_value(raw)?;
    let unknown = record.unknown_keys();
    if !unknown.is_empty() {
        tracing::debug!(index, keys = ?unknown, "ignoring unrecognized fields");
    }

    let title = record
        .text(&TITLE)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| placeholder_title(index));

    let start = DateField::parse(record.text_or_empty(&START), reference);
    let end = DateField::parse(record.text_or_empty(&END), reference);

    for (name, field) in [("start", &start), ("end", &end)] {
        if field.is_unparsed() {
            tracing::debug!(index, field = name, raw = field.raw(), "keeping unparsed date as text");
        }
    }

    let event = CanonicalEvent::new(title, start, end, reference)
        .with_description(record.text_or_empty(&DESCRIPTION))
        .with_location(record.text_or_empty(&LOCATION))
        .with_tag(record.text_or_empty(&TAG))
        .with_link(record.text_or_empty(&LINK));

    tracing::trace!(index, title = event.title(), status = %event.status(), "normalized event");
    Some(event)
}

/// Batch normalize feed entries.
///
/// Entries that are not objects are dropped; the rest keep their feed order.
pub fn normalize_events(raw_list: &[Value], reference: DateTime<Utc>) -> Vec<CanonicalEvent> {
    raw_list
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let event = normalize_event(raw, index, reference);
            if event.is_none() {
                tracing::debug!(index, kind = value_kind(raw), "dropping malformed feed entry");
            }
            event
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use eventfeed_core::Status;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        utc(2026, 2, 1, 4, 0, 0)
    }

    mod basic_normalization {
        use super::*;

        #[test]
        fn normalizes_full_record() {
            let raw = json!({
                "title": "Open Mic",
                "description": "Bring your own songs",
                "location": "Live House",
                "tag": "music",
                "link": "https://example.com/open-mic",
                "start": "2026-02-15 22:00(UTC+8)",
                "end": "2026-02-16 01:00(UTC+8)"
            });

            let event = normalize_event(&raw, 0, now()).unwrap();

            assert_eq!(event.title(), "Open Mic");
            assert_eq!(event.description(), "Bring your own songs");
            assert_eq!(event.location(), "Live House");
            assert_eq!(event.tag(), "music");
            assert_eq!(event.link(), "https://example.com/open-mic");
            assert_eq!(event.start_raw(), "2026-02-15 22:00(UTC+8)");
            assert_eq!(event.start_at(), Some(utc(2026, 2, 15, 14, 0, 0)));
            assert_eq!(event.end_at(), Some(utc(2026, 2, 15, 17, 0, 0)));
            assert_eq!(event.status(), Status::Upcoming);
        }

        #[test]
        fn accepts_alias_field_names() {
            let raw = json!({
                "name": "Zine Fair",
                "desc": "Small press",
                "place": "Warehouse",
                "startDate": "2026-01-20 10:00",
                "endDate": "2026-01-25 18:00"
            });

            let event = normalize_event(&raw, 3, now()).unwrap();

            assert_eq!(event.title(), "Zine Fair");
            assert_eq!(event.description(), "Small press");
            assert_eq!(event.location(), "Warehouse");
            assert_eq!(event.status(), Status::Past);
        }

        #[test]
        fn date_alias_is_a_start() {
            let raw = json!({"title": "Talk", "date": "2026-03-01"});
            let event = normalize_event(&raw, 0, now()).unwrap();
            assert_eq!(event.start_raw(), "2026-03-01");
            assert_eq!(event.start_at(), Some(utc(2026, 3, 1, 0, 0, 0)));
        }

        #[test]
        fn placeholder_title_uses_position() {
            let event = normalize_event(&json!({}), 4, now()).unwrap();
            assert_eq!(event.title(), "活動 5");
        }

        #[test]
        fn blank_title_gets_placeholder() {
            let event = normalize_event(&json!({"title": "   "}), 0, now()).unwrap();
            assert_eq!(event.title(), "活動 1");
        }

        #[test]
        fn unrecognized_fields_are_ignored() {
            let plain = json!({"title": "Open Mic", "start": "2026-03-01"});
            let extra = json!({"title": "Open Mic", "start": "2026-03-01", "price": 300, "rsvp": true});
            assert_eq!(
                normalize_event(&extra, 0, now()),
                normalize_event(&plain, 0, now())
            );
        }

        #[test]
        fn non_string_fields_are_coerced() {
            let raw = json!({"title": 2026, "tag": ["a", "b"], "location": false});
            let event = normalize_event(&raw, 0, now()).unwrap();
            assert_eq!(event.title(), "2026");
            assert_eq!(event.tag(), "a,b");
            assert_eq!(event.location(), "false");
        }
    }

    mod totality {
        use super::*;

        #[test]
        fn string_fields_are_never_missing() {
            for raw in [
                json!({}),
                json!({"title": null, "start": null, "end": null}),
                json!({"description": {"nested": true}, "start": 12}),
            ] {
                let event = normalize_event(&raw, 0, now()).unwrap();
                assert!(!event.title().is_empty());
                assert_eq!(event.end_raw(), "");
                assert!(event.location().is_empty());
            }
        }

        #[test]
        fn rejects_non_objects() {
            for raw in [Value::Null, json!("event"), json!(7), json!([{}]), json!(true)] {
                assert!(normalize_event(&raw, 0, now()).is_none());
            }
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn now_literal_starts_at_reference() {
            let raw = json!({"title": "Exhibition", "start": "即日起", "end": ""});
            let event = normalize_event(&raw, 0, now()).unwrap();
            assert_eq!(event.start_at(), Some(now()));
            assert_eq!(event.status(), Status::Ongoing);
        }

        #[test]
        fn unparseable_start_keeps_raw_token() {
            let raw = json!({"title": "TBA", "start": "sometime in spring"});
            let event = normalize_event(&raw, 0, now()).unwrap();
            assert_eq!(event.start_raw(), "sometime in spring");
            assert_eq!(event.start_at(), None);
            assert_eq!(event.status(), Status::Unknown);
        }

        #[test]
        fn end_only_in_the_past() {
            let raw = json!({"title": "Old", "start": "", "end": "2025-01-01T00:00+08:00"});
            let event = normalize_event(&raw, 0, now()).unwrap();
            assert_eq!(event.start_at(), None);
            assert_eq!(event.status(), Status::Past);
        }
    }

    mod batch_normalization {
        use super::*;

        #[test]
        fn drops_malformed_entries() {
            let raw = vec![
                json!({"title": "first"}),
                Value::Null,
                json!("not a record"),
                json!({"title": "second"}),
            ];
            let events = normalize_events(&raw, now());
            let titles: Vec<_> = events.iter().map(|e| e.title()).collect();
            assert_eq!(titles, ["first", "second"]);
        }

        #[test]
        fn placeholder_counts_dropped_positions() {
            let raw = vec![Value::Null, json!({})];
            let events = normalize_events(&raw, now());
            assert_eq!(events[0].title(), "活動 2");
        }
    }
}
