//! Raw event records from a feed.
//!
//! This module defines [`RawEventRecord`], a read-only view over one entry of
//! a feed document before normalization. Feeds are hand-written JSON, so an
//! entry may use any of several names for the same attribute, leave fields
//! out, set them to `null`, or use numbers where text was expected.
//!
//! Each attribute has a [`FieldAliases`] list naming the keys to try, in
//! priority order. The first key that is present and not `null` wins.

use serde_json::{Map, Value};

/// Candidate keys for one attribute, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    /// Canonical attribute name.
    pub field: &'static str,
    /// Keys tried in order.
    pub keys: &'static [&'static str],
}

pub const TITLE: FieldAliases = FieldAliases {
    field: "title",
    keys: &["title", "name"],
};

pub const DESCRIPTION: FieldAliases = FieldAliases {
    field: "description",
    keys: &["description", "desc"],
};

pub const LOCATION: FieldAliases = FieldAliases {
    field: "location",
    keys: &["location", "place"],
};

pub const TAG: FieldAliases = FieldAliases {
    field: "tag",
    keys: &["tag"],
};

pub const LINK: FieldAliases = FieldAliases {
    field: "link",
    keys: &["link"],
};

pub const START: FieldAliases = FieldAliases {
    field: "start",
    keys: &["start", "startDate", "date"],
};

pub const END: FieldAliases = FieldAliases {
    field: "end",
    keys: &["end", "endDate"],
};

/// Every attribute the normalizer reads.
pub const ALL_FIELDS: &[FieldAliases] = &[TITLE, DESCRIPTION, LOCATION, TAG, LINK, START, END];

/// A feed entry that is a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct RawEventRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawEventRecord<'a> {
    /// Views a JSON value as a record.
    ///
    /// Returns `None` for anything other than an object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    /// Returns the first present, non-null value among the aliases.
    pub fn lookup(&self, aliases: &FieldAliases) -> Option<&'a Value> {
        aliases
            .keys
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .find(|value| !value.is_null())
    }

    /// Returns the attribute coerced to text, or `None` when absent.
    pub fn text(&self, aliases: &FieldAliases) -> Option<String> {
        self.lookup(aliases).map(coerce_to_string)
    }

    /// Returns the attribute coerced to text, or an empty string when absent.
    pub fn text_or_empty(&self, aliases: &FieldAliases) -> String {
        self.text(aliases).unwrap_or_default()
    }

    /// Keys present in the record that no alias list knows about.
    pub fn unknown_keys(&self) -> Vec<&'a str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|key| !ALL_FIELDS.iter().any(|f| f.keys.contains(key)))
            .collect()
    }
}

/// Converts any JSON value to text without failing.
///
/// Strings are taken verbatim, numbers and booleans use their JSON text,
/// `null` becomes empty, arrays join their coerced elements with `,`, and
/// objects become compact JSON.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
