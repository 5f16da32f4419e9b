//! Display ordering for classified events.
//!
//! Events are grouped by [`Status::priority`] (ongoing, upcoming, past,
//! unknown), then sorted by start instant within each group. Events without a
//! start instant go last in their group. The sort is stable, so events with
//! equal keys keep their feed order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::event::{CanonicalEvent, Status};

/// Compares two events for display.
pub fn compare_events(a: &CanonicalEvent, b: &CanonicalEvent) -> Ordering {
    compare_status(a.status(), b.status()).then_with(|| compare_start(a.start_at(), b.start_at()))
}

/// Orders events for display. Stable.
pub fn order_events(mut events: Vec<CanonicalEvent>) -> Vec<CanonicalEvent> {
    events.sort_by(compare_events);
    events
}

fn compare_status(a: Status, b: Status) -> Ordering {
    a.priority().cmp(&b.priority())
}

/// Ascending, with a missing start treated as later than any instant.
fn compare_start(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
