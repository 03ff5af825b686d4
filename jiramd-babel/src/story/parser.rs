//! Story markdown → stories.
//!
//! Two dialects, which may be mixed in one file:
//!
//! ```text
//! ## Story: PROJ-1 Title          - Story: PROJ-2 Other title
//!                                   Status: Ready
//! ### Status                        Labels: [api, backend]
//! In Progress                       Description: First line
//!                                   continues here
//! ### Acceptance Criteria           Acceptance Criteria:
//! - [ ] first                           - [x] done already
//! ```
//!
//! A story runs until the next trigger of either dialect, the next level-2 heading, or the
//! end of input. The only hard error is a missing story id when one is required; anything
//! else malformed falls back to empty fields.

use super::naming::parse_formatted_story_name;
use super::sections::{classify_section, Section};
use super::{Story, StoryMeta, Todo};
use crate::error::{StoryLocation, StoryParseError};
use crate::status::{normalize_status, StatusMap};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

static HEADING_TRIGGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^##\s+Story:\s*(.*?)\s*$").expect("valid story heading regex"));
static LIST_TRIGGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^-\s+Story:\s*(.*?)\s*$").expect("valid story item regex"));
static LEVEL_TWO_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+").expect("valid heading regex"));
static SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^###\s+(.+?)\s*$").expect("valid section regex"));
static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {2}([A-Za-z][A-Za-z _-]*?)\s*:\s*(.*)$").expect("valid field regex")
});
static TODO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^-\s*\[([x\s])\]\s*(.+)$").expect("valid todo regex"));

/// Marker that opens the acceptance block appended to a parsed story's body.
pub const ACCEPTANCE_MARKER: &str = "**Acceptance Criteria:**";

/// Parser settings.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Custom Jira → story status names, applied before the built-in table.
    pub status_map: StatusMap,
    /// Reported in errors only.
    pub file_path: Option<String>,
    /// Fail on a story without an id instead of leaving the id empty.
    pub require_story_id: bool,
}

/// Parse every story in `text`.
pub fn parse_markdown_to_stories(
    text: &str,
    options: &ParseOptions,
) -> Result<Vec<Story>, StoryParseError> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut stories = Vec::new();
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        let (draft, end) = if let Some(caps) = HEADING_TRIGGER_RE.captures(line) {
            let end = story_end(&lines, index + 1);
            (parse_heading_story(&caps[1], &lines[index + 1..end]), end)
        } else if let Some(caps) = LIST_TRIGGER_RE.captures(line) {
            let end = story_end(&lines, index + 1);
            (parse_list_story(&caps[1], &lines[index + 1..end]), end)
        } else {
            index += 1;
            continue;
        };

        let story = draft.into_story(index + 1, options)?;
        trace!(story_id = %story.story_id, title = %story.title, line = index + 1, "parsed story");
        stories.push(story);
        index = end;
    }

    Ok(stories)
}

fn story_end(lines: &[&str], from: usize) -> usize {
    (from..lines.len())
        .find(|&i| LEVEL_TWO_HEADING_RE.is_match(lines[i]) || LIST_TRIGGER_RE.is_match(lines[i]))
        .unwrap_or(lines.len())
}

fn parse_heading_story(trigger: &str, lines: &[&str]) -> Draft {
    let mut draft = Draft::from_trigger(trigger, true);
    let mut section: Option<Section> = None;

    for line in lines {
        if let Some(caps) = SECTION_RE.captures(line) {
            section = classify_section(&caps[1]);
            if section.is_none() {
                debug!(heading = &caps[1], "ignoring unknown story section");
            }
            continue;
        }
        match section {
            Some(Section::Acceptance) => match parse_todo_line(line) {
                Some(todo) => draft.todos.push(todo),
                None => draft.acceptance_text.push(line.to_string()),
            },
            Some(section) => draft.set_field(section, line),
            None => {}
        }
    }

    draft
}

fn parse_list_story(trigger: &str, lines: &[&str]) -> Draft {
    let mut draft = Draft::from_trigger(trigger, false);
    let mut current: Option<Section> = None;

    for line in lines {
        if line.trim().is_empty() {
            if current == Some(Section::Description) {
                draft.description.push(String::new());
            }
            continue;
        }

        if let Some(caps) = FIELD_RE.captures(line) {
            if let Some(section) = classify_section(&caps[1]) {
                current = Some(section);
                let value = caps[2].trim();
                match section {
                    Section::Acceptance => {
                        if !value.is_empty() {
                            draft.list_acceptance_line(value);
                        }
                    }
                    Section::Description => {
                        if !value.is_empty() {
                            draft.description.push(value.to_string());
                        }
                    }
                    Section::Labels | Section::Assignees => {
                        draft.set_field(section, strip_brackets(value))
                    }
                    _ => draft.set_field(section, value),
                }
                continue;
            }
        }

        let indent = line.len() - line.trim_start_matches(' ').len();
        if current == Some(Section::Acceptance) && indent >= 4 {
            draft.list_acceptance_line(line.trim());
        } else if let Some(rest) = line.strip_prefix("  ") {
            draft.description.push(rest.to_string());
        } else {
            debug!(line, "ignoring unindented line inside list story");
        }
    }

    draft
}

/// A `- [ ] text` / `- [x] text` line.
pub fn parse_todo_line(line: &str) -> Option<Todo> {
    let caps = TODO_RE.captures(line.trim_end())?;
    Some(Todo {
        text: caps[2].trim().to_string(),
        done: caps[1].eq_ignore_ascii_case("x"),
    })
}

fn strip_brackets(value: &str) -> &str {
    value
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(value)
}

fn split_csv(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
}

/// Fields collected for one story before it is finished.
#[derive(Debug, Default)]
struct Draft {
    heading_dialect: bool,
    story_id: String,
    title: String,
    status: String,
    description: Vec<String>,
    acceptance_text: Vec<String>,
    todos: Vec<Todo>,
    assignees: Vec<String>,
    reporter: String,
    labels: Vec<String>,
    priority: Option<String>,
    priority_label: Option<String>,
}

impl Draft {
    fn from_trigger(trigger: &str, heading_dialect: bool) -> Self {
        let name = parse_formatted_story_name(trigger);
        Draft {
            heading_dialect,
            story_id: name.story_id,
            title: name.title,
            ..Draft::default()
        }
    }

    /// Apply one line of a single-valued or comma-separated field.
    fn set_field(&mut self, section: Section, line: &str) {
        let value = line.trim();
        match section {
            Section::StoryId => {
                if !value.is_empty() && self.story_id.is_empty() {
                    self.story_id = value.to_string();
                }
            }
            Section::Status => {
                if !value.is_empty() {
                    self.status = value.to_string();
                }
            }
            Section::Description => self.description.push(line.to_string()),
            Section::Acceptance => self.list_acceptance_line(value),
            Section::Assignees => self.assignees.extend(split_csv(value)),
            Section::Labels => self.labels.extend(split_csv(value)),
            Section::Reporter => {
                if !value.is_empty() {
                    self.reporter = value.to_string();
                }
            }
            Section::Priority => {
                if !value.is_empty() {
                    self.priority_label = Some(value.to_string());
                    self.priority.get_or_insert_with(|| value.to_string());
                }
            }
        }
    }

    fn list_acceptance_line(&mut self, text: &str) {
        match parse_todo_line(text) {
            Some(todo) => self.todos.push(todo),
            None => self.description.push(text.to_string()),
        }
    }

    fn into_story(self, line: usize, options: &ParseOptions) -> Result<Story, StoryParseError> {
        if self.story_id.is_empty() {
            if options.require_story_id {
                return Err(StoryParseError::StoryIdMissing {
                    location: StoryLocation {
                        file: options.file_path.clone(),
                        line,
                    },
                    title: self.title,
                });
            }
            debug!(title = %self.title, line, "story has no id");
        }

        let description = self.description.join("\n").trim().to_string();
        let acceptance = self.acceptance_text.join("\n").trim().to_string();
        let body = if self.heading_dialect && (!self.todos.is_empty() || !acceptance.is_empty()) {
            let mut block = vec![ACCEPTANCE_MARKER.to_string()];
            if !acceptance.is_empty() {
                block.push(acceptance);
            }
            block.extend(self.todos.iter().map(Todo::to_markdown));
            let block = block.join("\n");
            if description.is_empty() {
                block
            } else {
                format!("{description}\n\n{block}")
            }
        } else {
            description
        };

        Ok(Story {
            story_id: self.story_id,
            title: self.title,
            status: normalize_status(&self.status, &options.status_map),
            body,
            todos: self.todos,
            assignees: self.assignees,
            reporter: self.reporter,
            labels: self.labels,
            meta: StoryMeta {
                priority: self.priority,
                priority_label: self.priority_label,
                ..StoryMeta::default()
            },
        })
    }
}
