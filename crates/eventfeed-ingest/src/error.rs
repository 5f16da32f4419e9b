//! Error types for loading feed documents.
//!
//! Normalizing and classifying records never fails: bad records are dropped
//! and bad dates become `None`. The only fallible step is turning raw text
//! into a list of records, which this module covers.

use std::fmt;
use thiserror::Error;

/// The category of a feed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedErrorCode {
    /// The document is not valid JSON.
    InvalidJson,
    /// The document is JSON but neither an object nor an array.
    InvalidShape,
    /// Reading the document failed.
    Io,
}

impl FeedErrorCode {
    /// Returns a machine-friendly name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::InvalidShape => "invalid_shape",
            Self::Io => "io_error",
        }
    }
}

impl fmt::Display for FeedErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while loading a feed document.
#[derive(Debug, Error)]
pub struct FeedError {
    /// The error code categorizing this error.
    code: FeedErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// Where the document came from (file path, URL), if known.
    origin: Option<String>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FeedError {
    /// Creates a new feed error with the given code and message.
    pub fn new(code: FeedErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            origin: None,
            source: None,
        }
    }

    /// Creates an invalid JSON error.
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::InvalidJson, message)
    }

    /// Creates an invalid shape error.
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::InvalidShape, message)
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::Io, message)
    }

    /// Sets where the document came from.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> FeedErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the document origin, if set.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref origin) = self.origin {
            write!(f, "[{}] ", origin)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::io(err.to_string()).with_source(err)
        } else {
            Self::invalid_json(err.to_string()).with_source(err)
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string()).with_source(err)
    }
}

/// A specialized Result type for feed loading.
pub type FeedResult<T> = Result<T, FeedError>;
