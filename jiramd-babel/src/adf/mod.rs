//! Atlassian Document Format (ADF) model.
//!
//! ADF is the JSON rich-text tree Jira Cloud stores in issue descriptions. This module
//! defines a closed representation of the subset we convert (see `nodes.rs`), plus JSON
//! encoding and lenient decoding.

pub mod from_json;
pub mod nodes;
pub mod to_json;

pub use nodes::*;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json::to_value(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(from_json::from_value(&value))
    }
}

impl Document {
    pub fn to_value(&self) -> Value {
        to_json::to_value(self)
    }

    pub fn from_value(value: &Value) -> Self {
        from_json::from_value(value)
    }
}
