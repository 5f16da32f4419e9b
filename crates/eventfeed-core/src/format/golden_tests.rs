//! Golden tests for output formatting.
//!
//! These tests use insta inline snapshots to keep the display format stable.
//! Run with `cargo insta review` to update snapshots after intentional changes.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::event::{CanonicalEvent, DateField};
use crate::format::{FeedFormatter, FormatOptions};
use crate::order::order_events;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// The reference time for all golden tests: 2026-02-10 12:00 at UTC+8.
fn reference_time() -> DateTime<Utc> {
    utc(2026, 2, 10, 4, 0, 0)
}

fn event(title: &str, start: &str, end: &str) -> CanonicalEvent {
    let now = reference_time();
    CanonicalEvent::new(
        title,
        DateField::parse(start, now),
        DateField::parse(end, now),
        now,
    )
}

/// One event per status, in feed order rather than display order.
fn sample_feed() -> Vec<CanonicalEvent> {
    order_events(vec![
        event("Winter Market", "", "2025-01-01T00:00+08:00"),
        event("Open Mic", "2026-02-15 22:00(UTC+8)", "").with_location("Live House"),
        event("Secret Show", "", "").with_tag("tba"),
        event("Lantern Walk", "2026-02-01 18:00", "2026-02-20 22:00")
            .with_location("Old Street")
            .with_tag("festival"),
        event("Poetry Night", "即日起", "").with_description("Bring a poem."),
    ])
}

// =============================================================================
// TTY Output Golden Tests
// =============================================================================

#[test]
fn golden_tty_empty() {
    let output = FeedFormatter::with_defaults().format_tty(&[]);
    insta::assert_snapshot!(output.join("\n"), @"目前沒有活動");
}

#[test]
fn golden_tty_mixed_feed() {
    let output = FeedFormatter::with_defaults().format_tty(&sample_feed());
    insta::assert_snapshot!(output.join("\n"), @r"
    [進行中] Lantern Walk | 2026/02/01 週日 18:00 ～ 2026/02/20 週五 22:00 | Old Street | #festival
    [進行中] Poetry Night | 2026/02/10 週二 12:00
    [即將到來] Open Mic | 2026/02/15 週日 22:00 | Live House
    [既往活動] Winter Market | 2025/01/01 週三 00:00
    [預告] Secret Show | #tba
    ");
}

#[test]
fn golden_tty_custom_separator_and_truncation() {
    let options = FormatOptions {
        max_title_length: Some(10),
        range_separator: " → ".to_string(),
        ..Default::default()
    };
    let feed = vec![event("Lantern Walk Festival", "2026-02-01 18:00", "2026-02-20 22:00")];
    let output = FeedFormatter::new(options).format_tty(&feed);
    insta::assert_snapshot!(output.join("\n"), @"[進行中] Lantern... | 2026/02/01 週日 18:00 → 2026/02/20 週五 22:00");
}

// =============================================================================
// JSON Output Golden Tests
// =============================================================================

#[test]
fn golden_json_view() {
    let feed = sample_feed();
    let output = FeedFormatter::with_defaults().format_json(&feed, reference_time());
    assert_eq!(output.count, 5);

    let value = serde_json::to_value(&output.events[2]).unwrap();
    assert_eq!(
        value,
        json!({
            "title": "Open Mic",
            "status": "upcoming",
            "status_label": "即將到來",
            "css_class": "status-upcoming",
            "date": "2026/02/15 週日 22:00",
            "location": "Live House",
            "description": "",
            "start_at": "2026-02-15T14:00:00Z"
        })
    );
}

#[test]
fn golden_json_envelope() {
    let output = FeedFormatter::with_defaults().format_json(&sample_feed(), reference_time());
    let value = serde_json::to_value(&output).unwrap();

    assert_eq!(value["count"], 5);
    assert_eq!(value["generated_at"], "2026-02-10T04:00:00Z");
    let statuses: Vec<_> = value["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["ongoing", "ongoing", "upcoming", "past", "unknown"]);

    let poetry = &value["events"][1];
    assert_eq!(poetry["title"], "Poetry Night");
    assert_eq!(poetry["description"], "Bring a poem.");
    assert_eq!(poetry["start_at"], "2026-02-10T04:00:00Z");
    assert!(poetry.get("end_at").is_none());
}
