//! Feed ingestion: raw records in, ordered events out.
//!
//! This crate sits between a feed document and the core event types:
//!
//! - [`FeedDocument`] - Parses feed text into a list of raw records
//! - [`RawEventRecord`] - Alias-aware view over one raw record
//! - [`normalize_event`] - Converts a raw record to a [`CanonicalEvent`]
//! - [`build_feed`] - Normalize, classify and order in one call
//! - [`FeedError`] - Error types for document loading
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │ {"events": [..]}│    │   [ .., .. ]    │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     │ FeedDocument
//!                     ▼
//!              ┌─────────────┐
//!              │ Vec<Value>  │
//!              └──────┬──────┘
//!                     │
//!                     ▼ normalize_events()
//!              ┌──────────────────┐
//!              │  CanonicalEvent  │
//!              └──────┬───────────┘
//!                     │
//!                     ▼ order_events()
//!              ┌──────────────────┐
//!              │   ordered feed   │
//!              └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use eventfeed_ingest::FeedDocument;
//!
//! let doc = FeedDocument::from_json_str(r#"{"events": [{"title": "Open Mic", "start": "即日起"}]}"#)?;
//! let events = doc.build(Utc::now());
//! assert_eq!(events[0].title(), "Open Mic");
//! # Ok::<(), eventfeed_ingest::FeedError>(())
//! ```
//!
//! [`CanonicalEvent`]: eventfeed_core::CanonicalEvent

pub mod error;
pub mod feed;
pub mod normalize;
pub mod raw_event;

// Re-export main types at crate root
pub use error::{FeedError, FeedErrorCode, FeedResult};
pub use feed::{EVENTS_KEY, FeedDocument, build_feed};
pub use normalize::{normalize_event, normalize_events, placeholder_title};
pub use raw_event::{FieldAliases, RawEventRecord, coerce_to_string};
