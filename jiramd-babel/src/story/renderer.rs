//! Story → canonical story markdown (heading dialect).

use super::naming::{format_story_name, story_file_name, truncate_file_name};
use super::parser::parse_todo_line;
use super::Story;
use once_cell::sync::Lazy;
use regex::Regex;

static ACCEPTANCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\*\*Acceptance Criteria:\*\*|Acceptance_Criteria:)")
        .expect("valid acceptance marker regex")
});

/// Render one story.
///
/// Sections come out in a fixed order. When the body carries an acceptance block
/// (`**Acceptance Criteria:**`), its text and the todos share one
/// `### Acceptance Criteria` section; checkbox lines of that text that are already todos
/// are not repeated.
pub fn render_single_story_markdown(story: &Story) -> String {
    let mut lines: Vec<String> = Vec::new();
    let id = story.story_id.trim();
    let title = story.title.trim();

    let display_name = format_story_name(id, title);
    if display_name.is_empty() {
        lines.push("## Story:".to_string());
    } else {
        lines.push(format!("## Story: {display_name}"));
    }
    lines.push(String::new());

    if !id.is_empty() {
        push_section(&mut lines, "Story ID", id);
    }

    let status = if story.status.trim().is_empty() {
        "Backlog"
    } else {
        story.status.as_str()
    };
    push_section(&mut lines, "Status", status);

    let todo_lines: Vec<String> = story.todos.iter().map(|todo| todo.to_markdown()).collect();

    match ACCEPTANCE_SPLIT_RE.find(&story.body) {
        Some(marker) => {
            let description = story.body[..marker.start()].trim();
            let acceptance = story.body[marker.end()..]
                .lines()
                .filter(|line| {
                    parse_todo_line(line).map_or(true, |todo| !story.todos.contains(&todo))
                })
                .collect::<Vec<_>>()
                .join("\n");
            let acceptance = acceptance.trim();

            push_section(&mut lines, "Description", description);

            if !acceptance.is_empty() || !todo_lines.is_empty() {
                lines.push("### Acceptance Criteria".to_string());
                lines.push(String::new());
                if !acceptance.is_empty() {
                    lines.push(acceptance.to_string());
                    if !todo_lines.is_empty() {
                        lines.push(String::new());
                    }
                }
                lines.extend(todo_lines);
                lines.push(String::new());
            }
        }
        None => {
            push_section(&mut lines, "Description", &story.body);
            if !todo_lines.is_empty() {
                lines.push("### Acceptance Criteria".to_string());
                lines.push(String::new());
                lines.extend(todo_lines);
                lines.push(String::new());
            }
        }
    }

    let priority_label = story
        .meta
        .priority_label
        .as_deref()
        .map(str::trim)
        .unwrap_or("");
    let priority = story.meta.priority.as_deref().map(str::trim).unwrap_or("");
    let shown_priority = if priority_label.is_empty() {
        priority
    } else {
        priority_label
    };
    if !shown_priority.is_empty() {
        push_section(&mut lines, "Priority", shown_priority);
    }

    let labels: Vec<&str> = story
        .labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .filter(|label| priority_label.is_empty() || *label != priority_label)
        .collect();
    if !labels.is_empty() {
        push_section(&mut lines, "Labels", &labels.join(", "));
    }

    let assignees: Vec<&str> = story
        .assignees
        .iter()
        .map(|assignee| assignee.trim())
        .filter(|assignee| !assignee.is_empty())
        .collect();
    if !assignees.is_empty() {
        push_section(&mut lines, "Assignees", &assignees.join(", "));
    }

    let reporter = story.reporter.trim();
    if !reporter.is_empty() {
        push_section(&mut lines, "Reporter", reporter);
    }

    let rendered = lines.join("\n");
    format!("{}\n", rendered.trim_end_matches('\n'))
}

fn push_section(lines: &mut Vec<String>, heading: &str, content: &str) {
    lines.push(format!("### {heading}"));
    lines.push(content.to_string());
    lines.push(String::new());
}

/// File name a story is written to, capped at `max_len` characters.
pub fn preferred_story_file_name(story: &Story, max_len: usize) -> String {
    truncate_file_name(&story_file_name(story), max_len)
}
