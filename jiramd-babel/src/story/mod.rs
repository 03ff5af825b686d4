//! Story records and the Story markdown template.
//!
//! A story is the per-issue record the sync tool keeps on disk. Each one lives in its own
//! markdown file written in a fixed template:
//!
//! ```text
//! ## Story: PROJ-12 Login with SSO
//!
//! ### Story ID
//! PROJ-12
//!
//! ### Status
//! In Progress
//!
//! ### Description
//! Users sign in through the company IdP.
//!
//! ### Acceptance Criteria
//!
//! - [x] Redirects to the IdP
//! - [ ] Creates the account on first login
//!
//! ### Labels
//! auth, sso
//! ```
//!
//! A compact list dialect (`- Story: <title>` followed by indented `Field: value` lines)
//! is accepted on input; output is always the heading dialect above.
//!
//!     - parser.rs: text → stories, both dialects
//!     - renderer.rs: story → canonical text
//!     - naming.rs: display names and file names
//!     - sections.rs: section keyword table shared by both dialects
//!     - validate.rs: advisory checks before upload

pub mod naming;
pub mod parser;
pub mod renderer;
pub mod sections;
pub mod validate;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use naming::{
    format_story_name, issue_name_for_story, parse_formatted_story_name, story_file_name,
    truncate_file_name, StoryName, DEFAULT_MAX_FILE_NAME_LENGTH,
};
pub use parser::{parse_markdown_to_stories, ParseOptions};
pub use renderer::{preferred_story_file_name, render_single_story_markdown};
pub use validate::{validate_stories, validate_story, Issue, ValidationReport};

/// One story.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Story {
    pub story_id: String,
    pub title: String,
    pub status: String,
    pub body: String,
    pub todos: Vec<Todo>,
    pub assignees: Vec<String>,
    pub reporter: String,
    pub labels: Vec<String>,
    pub meta: StoryMeta,
}

/// A checkbox item of the acceptance criteria.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Todo {
    pub text: String,
    pub done: bool,
}

impl Todo {
    pub fn new(text: impl Into<String>, done: bool) -> Self {
        Todo {
            text: text.into(),
            done,
        }
    }

    /// The checkbox line for this todo (`- [x] text`).
    pub fn to_markdown(&self) -> String {
        format!("- [{}] {}", if self.done { "x" } else { " " }, self.text)
    }
}

/// Free-form story metadata. Keys this crate does not know about are kept in `extra` so
/// JSON round trips are lossless.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_story_json_uses_camel_case() {
        let story = Story {
            story_id: "PROJ-1".into(),
            title: "Title".into(),
            todos: vec![Todo::new("a", true)],
            meta: StoryMeta {
                priority_label: Some("High".into()),
                ..StoryMeta::default()
            },
            ..Story::default()
        };
        let value = serde_json::to_value(&story).unwrap();
        assert_eq!(value["storyId"], "PROJ-1");
        assert_eq!(value["todos"], json!([{ "text": "a", "done": true }]));
        assert_eq!(value["meta"], json!({ "priorityLabel": "High" }));
    }

    #[test]
    fn test_unknown_meta_keys_survive() {
        let value = json!({
            "storyId": "PROJ-2",
            "title": "T",
            "meta": { "priority": "Low", "sprint": "Sprint 4", "points": 3 }
        });
        let story: Story = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(story.meta.priority.as_deref(), Some("Low"));
        assert_eq!(story.meta.extra["points"], json!(3));
        assert_eq!(serde_json::to_value(&story).unwrap()["meta"], value["meta"]);
    }
}
