//! Lifecycle classification.
//!
//! [`classify`] maps a start, an end and a reference instant to a [`Status`].
//! Either bound may be missing; the table below is evaluated top to bottom.
//!
//! | start | end  | condition              | status     |
//! |-------|------|------------------------|------------|
//! | none  | none |                        | `Unknown`  |
//! | some  | none | `start > now`          | `Upcoming` |
//! | some  | none | `start <= now`         | `Ongoing`  |
//! | none  | some | `now > end`            | `Past`     |
//! | none  | some | `now <= end`           | `Ongoing`  |
//! | some  | some | `now < start`          | `Upcoming` |
//! | some  | some | `now > end`            | `Past`     |
//! | some  | some | `start <= now <= end`  | `Ongoing`  |
//!
//! For fixed bounds, moving `now` forward only ever moves an event along
//! `Upcoming → Ongoing → Past`.

use chrono::{DateTime, Utc};

use crate::event::Status;

/// Classifies an event against `now`.
pub fn classify(
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Status {
    match (start_at, end_at) {
        (None, None) => Status::Unknown,
        (Some(start), None) => {
            if start > now {
                Status::Upcoming
            } else {
                Status::Ongoing
            }
        }
        (None, Some(end)) => {
            if now > end {
                Status::Past
            } else {
                Status::Ongoing
            }
        }
        (Some(start), Some(end)) => {
            if now < start {
                Status::Upcoming
            } else if now > end {
                Status::Past
            } else {
                Status::Ongoing
            }
        }
    }
}
