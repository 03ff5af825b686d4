//! Advisory checks against Jira's field limits, run before stories are uploaded.

use super::Story;
use serde::Serialize;
use std::fmt;

const MAX_TITLE_LEN: usize = 255;
const MAX_BODY_LEN: usize = 32767;
const MAX_LABEL_LEN: usize = 255;
const MAX_LABELS: usize = 20;
const KNOWN_PRIORITIES: &[&str] = &["Highest", "High", "Medium", "Low", "Lowest"];
const KNOWN_STATUSES: &[&str] = &["Backlog", "Ready", "To Do", "In Progress", "In Review", "Done"];

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub field: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'static str>,
}

impl Issue {
    fn new(field: &'static str, message: String, suggestion: &'static str) -> Self {
        Issue {
            field,
            message,
            suggestion: Some(suggestion),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

/// Errors block an upload; warnings don't.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.errors.is_empty() {
            writeln!(f, "Errors:")?;
            for issue in &self.errors {
                writeln!(f, "  {issue}")?;
            }
        }
        if !self.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for issue in &self.warnings {
                writeln!(f, "  {issue}")?;
            }
        }
        if self.errors.is_empty() && self.warnings.is_empty() {
            writeln!(f, "Validation passed")?;
        }
        Ok(())
    }
}

/// Check one story. `file_path` only decorates messages.
pub fn validate_story(story: &Story, file_path: Option<&str>) -> ValidationReport {
    let mut report = ValidationReport::default();
    let title_len = story.title.chars().count();

    if story.title.trim().is_empty() {
        let location = file_path.map(|path| format!(" in {path}")).unwrap_or_default();
        report.errors.push(Issue::new(
            "title",
            format!("Story has no title{location}"),
            "Add a title using the \"Story: Your Title Here\" format",
        ));
    }
    if title_len > MAX_TITLE_LEN {
        report.errors.push(Issue::new(
            "title",
            format!("Story title exceeds {MAX_TITLE_LEN} characters ({title_len})"),
            "Shorten the title or move details to the description",
        ));
    }

    let body_len = story.body.chars().count();
    if story.body.trim().is_empty() {
        report.warnings.push(Issue::new(
            "description",
            format!("Story \"{}\" has no description", story.title),
            "Add a description to provide context for the story",
        ));
    }
    if body_len > MAX_BODY_LEN {
        report.errors.push(Issue::new(
            "description",
            format!("Description exceeds Jira's maximum length ({body_len} characters)"),
            "Reduce the description or split the story",
        ));
    }

    if story.labels.len() > MAX_LABELS {
        report.warnings.push(Issue::new(
            "labels",
            format!("Story \"{}\" has {} labels", story.title, story.labels.len()),
            "Jira typically supports up to 20 labels per issue",
        ));
    }
    for label in &story.labels {
        if label.chars().count() > MAX_LABEL_LEN {
            let head: String = label.chars().take(50).collect();
            report.errors.push(Issue::new(
                "labels",
                format!("Label exceeds {MAX_LABEL_LEN} characters: \"{head}...\""),
                "Shorten the label",
            ));
        }
        if label.contains(' ') {
            report.warnings.push(Issue::new(
                "labels",
                format!("Label contains spaces: \"{label}\""),
                "Jira labels use hyphens or underscores instead of spaces",
            ));
        }
    }

    if story.assignees.len() > 1 {
        report.warnings.push(Issue::new(
            "assignees",
            format!(
                "Story \"{}\" has {} assignees",
                story.title,
                story.assignees.len()
            ),
            "Jira issues have a single assignee; only the first is used",
        ));
    }

    if let Some(priority) = story.meta.priority.as_deref() {
        if !KNOWN_PRIORITIES.contains(&priority) {
            report.warnings.push(Issue::new(
                "priority",
                format!("Unknown priority value: \"{priority}\""),
                "Use one of: Highest, High, Medium, Low, Lowest",
            ));
        }
    }

    if !story.status.is_empty() && !KNOWN_STATUSES.contains(&story.status.as_str()) {
        report.warnings.push(Issue::new(
            "status",
            format!("Unknown status: \"{}\"", story.status),
            "Use one of: Backlog, Ready, To Do, In Progress, In Review, Done",
        ));
    }

    report
}

/// Check several stories into one report.
pub fn validate_stories(stories: &[Story], file_path: Option<&str>) -> ValidationReport {
    stories
        .iter()
        .fold(ValidationReport::default(), |mut report, story| {
            report.merge(validate_story(story, file_path));
            report
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_story() -> Story {
        Story {
            title: "Fine".into(),
            body: "Has a body".into(),
            status: "Done".into(),
            labels: vec!["ok".into()],
            ..Story::default()
        }
    }

    #[test]
    fn test_clean_story() {
        let report = validate_story(&good_story(), None);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert_eq!(report.to_string(), "Validation passed\n");
    }

    #[test]
    fn test_errors() {
        let story = Story {
            title: "t".repeat(256),
            body: "b".repeat(32768),
            labels: vec!["l".repeat(256)],
            ..good_story()
        };
        let report = validate_story(&story, None);
        let fields: Vec<_> = report.errors.iter().map(|issue| issue.field).collect();
        assert_eq!(fields, vec!["title", "description", "labels"]);
    }

    #[test]
    fn test_title_boundary() {
        let story = Story {
            title: "t".repeat(255),
            ..good_story()
        };
        assert!(validate_story(&story, None).is_valid());
    }

    #[test]
    fn test_missing_title_mentions_file() {
        let story = Story {
            title: "  ".into(),
            ..good_story()
        };
        let report = validate_story(&story, Some("stories/a.md"));
        assert_eq!(report.errors[0].message, "Story has no title in stories/a.md");
    }

    #[test]
    fn test_warnings() {
        let mut story = Story {
            body: String::new(),
            labels: (0..21).map(|i| format!("l{i}")).collect(),
            assignees: vec!["a".into(), "b".into()],
            status: "Blocked".into(),
            ..good_story()
        };
        story.labels.push("has space".into());
        story.meta.priority = Some("P0".into());
        let report = validate_story(&story, None);
        assert!(report.is_valid());
        let fields: Vec<_> = report.warnings.iter().map(|issue| issue.field).collect();
        assert_eq!(
            fields,
            vec!["description", "labels", "labels", "assignees", "priority", "status"]
        );
    }

    #[test]
    fn test_validate_many() {
        let bad = Story {
            title: String::new(),
            ..good_story()
        };
        let report = validate_stories(&[good_story(), bad], None);
        assert_eq!(report.errors.len(), 1);
    }
}
