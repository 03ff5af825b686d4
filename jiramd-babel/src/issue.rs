//! Already-fetched Jira issues → stories.
//!
//! The model covers the subset of a REST v3 issue the story template needs. Every field
//! is optional on the wire: issues from search results with a trimmed `fields` list still
//! decode, missing parts simply become defaults.

use crate::converter::adf_value_to_markdown;
use crate::status::{normalize_status, StatusMap};
use crate::story::{Story, StoryMeta, Todo};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraIssue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueFields {
    pub summary: String,
    /// ADF document, `null` when the issue has no description.
    pub description: Value,
    pub status: Option<Named>,
    pub issuetype: Option<Named>,
    pub assignee: Option<User>,
    pub reporter: Option<User>,
    pub labels: Vec<String>,
    pub subtasks: Vec<Subtask>,
    pub priority: Option<Named>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

/// Any `{ "name": … }` object (status, issue type, priority).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subtask {
    pub key: String,
    pub fields: SubtaskFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtaskFields {
    pub summary: String,
    pub status: Option<Named>,
}

impl Subtask {
    fn is_done(&self) -> bool {
        self.fields.status.as_ref().is_some_and(|status| {
            matches!(
                status.name.trim().to_lowercase().as_str(),
                "done" | "closed" | "resolved"
            )
        })
    }
}

/// Issues from a JSON payload: a single issue, an array of issues, or a search result
/// (`{"issues": [...]}`).
pub fn parse_issues(json: &str) -> Result<Vec<JiraIssue>, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    issues_from_value(value)
}

pub fn issues_from_value(value: Value) -> Result<Vec<JiraIssue>, serde_json::Error> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        Value::Object(mut object) if object.contains_key("issues") => {
            let issues = object.remove("issues").unwrap_or(Value::Null);
            if issues.is_null() {
                return Ok(Vec::new());
            }
            serde_json::from_value(issues)
        }
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

/// Map one issue onto a story.
pub fn map_issue_to_story(issue: &JiraIssue, status_map: &StatusMap) -> Story {
    let fields = &issue.fields;
    let named = |field: &Option<Named>| field.as_ref().map(|named| named.name.clone());

    let status = fields
        .status
        .as_ref()
        .map(|status| normalize_status(&status.name, status_map))
        .unwrap_or_default();

    let todos = fields
        .subtasks
        .iter()
        .map(|subtask| Todo::new(subtask.fields.summary.trim(), subtask.is_done()))
        .collect();

    let assignees = fields
        .assignee
        .iter()
        .map(|user| user.display_name.clone())
        .filter(|name| !name.is_empty())
        .collect();

    debug!(key = %issue.key, subtasks = fields.subtasks.len(), "mapping issue to story");

    Story {
        story_id: issue.key.clone(),
        title: fields.summary.clone(),
        status,
        body: adf_value_to_markdown(&fields.description),
        todos,
        assignees,
        reporter: fields
            .reporter
            .as_ref()
            .map(|user| user.display_name.clone())
            .unwrap_or_default(),
        labels: fields.labels.clone(),
        meta: StoryMeta {
            priority: named(&fields.priority),
            issue_type: named(&fields.issuetype),
            created: fields.created.clone(),
            updated: fields.updated.clone(),
            ..StoryMeta::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue_json() -> Value {
        json!({
            "key": "PROJ-12",
            "fields": {
                "summary": "Login with SSO",
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        { "type": "paragraph", "content": [
                            { "type": "text", "text": "Use the " },
                            { "type": "text", "text": "company", "marks": [{ "type": "strong" }] },
                            { "type": "text", "text": " IdP." }
                        ]}
                    ]
                },
                "status": { "name": "Code Review" },
                "issuetype": { "name": "Story" },
                "assignee": { "displayName": "Ada" },
                "reporter": { "displayName": "Eve" },
                "labels": ["auth"],
                "priority": { "name": "High" },
                "subtasks": [
                    { "key": "PROJ-13", "fields": { "summary": "Redirect", "status": { "name": "Closed" } } },
                    { "key": "PROJ-14", "fields": { "summary": "Provision", "status": { "name": "Open" } } }
                ],
                "created": "2024-01-02T10:00:00.000+0000",
                "customfield_10010": 5
            }
        })
    }

    #[test]
    fn test_map_issue() {
        let issue: JiraIssue = serde_json::from_value(issue_json()).unwrap();
        let story = map_issue_to_story(&issue, &StatusMap::new());

        assert_eq!(story.story_id, "PROJ-12");
        assert_eq!(story.title, "Login with SSO");
        assert_eq!(story.status, "In Review");
        assert_eq!(story.body, "Use the **company** IdP.");
        assert_eq!(
            story.todos,
            vec![Todo::new("Redirect", true), Todo::new("Provision", false)]
        );
        assert_eq!(story.assignees, vec!["Ada"]);
        assert_eq!(story.reporter, "Eve");
        assert_eq!(story.labels, vec!["auth"]);
        assert_eq!(story.meta.priority.as_deref(), Some("High"));
        assert_eq!(story.meta.issue_type.as_deref(), Some("Story"));
        assert_eq!(story.meta.created.as_deref(), Some("2024-01-02T10:00:00.000+0000"));
        assert_eq!(story.meta.updated, None);
    }

    #[test]
    fn test_custom_status_map() {
        let issue: JiraIssue = serde_json::from_value(issue_json()).unwrap();
        let map = StatusMap::from([("Code Review".to_string(), "Done".to_string())]);
        assert_eq!(map_issue_to_story(&issue, &map).status, "Done");
    }

    #[test]
    fn test_sparse_issue() {
        let issue: JiraIssue =
            serde_json::from_value(json!({ "key": "PROJ-1", "fields": { "description": null } }))
                .unwrap();
        let story = map_issue_to_story(&issue, &StatusMap::new());
        assert_eq!(story.story_id, "PROJ-1");
        assert!(story.body.is_empty());
        assert!(story.status.is_empty());
        assert!(story.assignees.is_empty());
        assert!(story.todos.is_empty());
    }

    #[test]
    fn test_parse_issue_payload_shapes() {
        let single = issue_json().to_string();
        assert_eq!(parse_issues(&single).unwrap().len(), 1);

        let array = json!([issue_json(), { "key": "PROJ-2" }]).to_string();
        let issues = parse_issues(&array).unwrap();
        assert_eq!(issues[1].key, "PROJ-2");

        let search = json!({ "startAt": 0, "total": 1, "issues": [issue_json()] }).to_string();
        assert_eq!(parse_issues(&search).unwrap()[0].key, "PROJ-12");

        assert!(parse_issues("not json").is_err());
    }
}
