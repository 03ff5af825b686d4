//! Error types for format and story operations

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// Where a story starts: the file it came from (if known) and the 1-based trigger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryLocation {
    pub file: Option<String>,
    pub line: usize,
}

impl fmt::Display for StoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}", self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// Errors raised by the story template parser.
///
/// Everything except a missing required story id is recovered from leniently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoryParseError {
    #[error("Story ID is required but missing for story '{title}' at {location}")]
    StoryIdMissing {
        location: StoryLocation,
        title: String,
    },
}

impl StoryParseError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            StoryParseError::StoryIdMissing { .. } => "STORY_ID_MISSING",
        }
    }

    pub fn location(&self) -> &StoryLocation {
        match self {
            StoryParseError::StoryIdMissing { location, .. } => location,
        }
    }
}
