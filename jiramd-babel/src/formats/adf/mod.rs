//! ADF JSON format
//!
//! Reads and writes the Atlassian Document Format as pretty-printed JSON. Decoding is
//! lenient (see [`crate::adf::from_json`]); only input that is not JSON at all is an error.

use crate::adf::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for ADF JSON
pub struct AdfFormat;

impl Format for AdfFormat {
    fn name(&self) -> &str {
        "adf"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format (JSON)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["adf", "json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        if source.trim().is_empty() {
            return Ok(Document::empty());
        }
        let value: serde_json::Value = serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("Invalid ADF JSON: {e}")))?;
        Ok(Document::from_value(&value))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&doc.to_value())
            .map_err(|e| FormatError::SerializationError(format!("ADF encoding failed: {e}")))
    }
}
