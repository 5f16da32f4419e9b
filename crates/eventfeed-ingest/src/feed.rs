//! Feed documents and the end-to-end pipeline.
//!
//! A feed is either `{ "events": [...] }` or a bare array of records.
//! [`FeedDocument`] turns text into the record list; [`build_feed`] turns the
//! record list into ordered, classified events.

use std::io::Read;

use chrono::{DateTime, Utc};
use eventfeed_core::{CanonicalEvent, order_events};
use serde_json::Value;

use crate::error::{FeedError, FeedResult};
use crate::normalize::normalize_events;

/// Key holding the record list in object-shaped feeds.
pub const EVENTS_KEY: &str = "events";

/// Normalizes, classifies and orders a list of raw records.
///
/// Entries that are not objects are dropped. The result depends only on
/// `raw_list` and `now`.
pub fn build_feed(raw_list: &[Value], now: DateTime<Utc>) -> Vec<CanonicalEvent> {
    let events = normalize_events(raw_list, now);
    let dropped = raw_list.len() - events.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = events.len(), "dropped malformed records");
    }
    order_events(events)
}

/// The record list of a parsed feed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    records: Vec<Value>,
}

impl FeedDocument {
    /// Extracts the record list from a JSON value.
    ///
    /// An object contributes its `events` array; a missing or non-array
    /// `events` key gives an empty list. Any root other than an object or
    /// an array is rejected.
    pub fn from_value(value: Value) -> FeedResult<Self> {
        match value {
            Value::Array(records) => Ok(Self { records }),
            Value::Object(mut map) => match map.remove(EVENTS_KEY) {
                Some(Value::Array(records)) => Ok(Self { records }),
                other => {
                    tracing::debug!(
                        found = other.is_some(),
                        "feed object has no events array, treating as empty"
                    );
                    Ok(Self::default())
                }
            },
            other => Err(FeedError::invalid_shape(format!(
                "expected an object or an array at the document root, found {}",
                root_kind(&other)
            ))),
        }
    }

    /// Parses a feed document from JSON text.
    pub fn from_json_str(input: &str) -> FeedResult<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Reads and parses a feed document.
    pub fn from_reader<R: Read>(mut reader: R) -> FeedResult<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::from_json_str(&input)
    }

    /// Returns the raw records in document order.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Returns the number of raw records, malformed ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the document holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Runs [`build_feed`] over this document's records.
    pub fn build(&self, now: DateTime<Utc>) -> Vec<CanonicalEvent> {
        build_feed(&self.records, now)
    }
}

fn root_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
