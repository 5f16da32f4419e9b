//! Core types: date parsing, events, status, ordering, formatting

pub mod date;
pub mod event;
pub mod format;
pub mod order;
pub mod status;
pub mod tracing;

pub use date::{
    ASSUMED_OFFSET, DATE_RULES, DateRule, NOW_LITERALS, is_now_literal, parse_event_date,
};
pub use event::{CanonicalEvent, DateField, Status};
pub use format::{
    EventView, FeedFormatter, FormatOptions, JsonOutput, OutputFormat, display_date, ellipsis,
    format_instant, html_escape,
};
pub use order::{compare_events, order_events};
pub use status::classify;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
