//! Jira status ↔ story status.
//!
//! Stories use five canonical statuses (Backlog, Ready, In Progress, In Review, Done).
//! Jira workflows name theirs freely, so incoming names are folded onto the canonical set
//! and outgoing ones are mapped back. A custom map (Jira name → story status) taken from
//! configuration is consulted before the built-in table in both directions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Custom Jira status → story status map. Keys are compared case-insensitively.
pub type StatusMap = BTreeMap<String, String>;

const DEFAULT_STATUS_TABLE: &[(&str, &str)] = &[
    ("to do", "Backlog"),
    ("todo", "Backlog"),
    ("backlog", "Backlog"),
    ("open", "Backlog"),
    ("new", "Backlog"),
    ("ready", "Ready"),
    ("ready to start", "Ready"),
    ("ready for development", "Ready"),
    ("selected for development", "Ready"),
    ("in progress", "In Progress"),
    ("doing", "In Progress"),
    ("progress", "In Progress"),
    ("in development", "In Progress"),
    ("in review", "In Review"),
    ("review", "In Review"),
    ("code review", "In Review"),
    ("peer review", "In Review"),
    ("testing", "In Review"),
    ("qa", "In Review"),
    ("done", "Done"),
    ("completed", "Done"),
    ("complete", "Done"),
    ("finished", "Done"),
    ("closed", "Done"),
    ("resolved", "Done"),
];

const DEFAULT_JIRA_TABLE: &[(&str, &str)] = &[
    ("backlog", "To Do"),
    ("ready", "Ready to Start"),
    ("in progress", "In Progress"),
    ("in review", "In Review"),
    ("done", "Done"),
];

/// Jira's three status categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCategory {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "indeterminate")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl StatusCategory {
    /// The category key Jira uses (`todo`, `indeterminate`, `done`).
    pub fn key(&self) -> &'static str {
        match self {
            StatusCategory::Todo => "todo",
            StatusCategory::InProgress => "indeterminate",
            StatusCategory::Done => "done",
        }
    }
}

/// Fold a Jira status name onto a story status.
///
/// Unknown names are returned trimmed but otherwise unchanged; empty stays empty.
pub fn normalize_status(status: &str, custom: &StatusMap) -> String {
    let trimmed = status.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let key = trimmed.to_lowercase();

    if let Some(mapped) = custom
        .iter()
        .find(|(jira, _)| jira.trim().to_lowercase() == key)
        .map(|(_, story)| story)
    {
        return mapped.clone();
    }

    DEFAULT_STATUS_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, story)| story.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Map a story status back to a Jira status name.
pub fn map_markdown_status_to_jira(status: &str, custom: &StatusMap) -> String {
    let trimmed = status.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let key = trimmed.to_lowercase();

    if let Some(jira) = custom
        .iter()
        .find(|(_, story)| story.trim().to_lowercase() == key)
        .map(|(jira, _)| jira)
    {
        return jira.clone();
    }

    DEFAULT_JIRA_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, jira)| jira.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Category of a status, after normalization. Unknown statuses count as to-do.
pub fn status_category(status: &str) -> StatusCategory {
    match normalize_status(status, &StatusMap::new())
        .to_lowercase()
        .as_str()
    {
        "in progress" | "in review" => StatusCategory::InProgress,
        "done" => StatusCategory::Done,
        _ => StatusCategory::Todo,
    }
}
