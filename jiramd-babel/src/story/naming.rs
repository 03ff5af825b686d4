//! Story display names and file names.

use super::Story;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default cap on a story file's base name, extension excluded.
pub const DEFAULT_MAX_FILE_NAME_LENGTH: usize = 200;

static ISSUE_KEY_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]+-\d+)(?:\s+(.+))?$").expect("valid issue key regex"));
static STORY_KEY_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(STORY-\S+)(?:\s+(.+))?$").expect("valid story key regex"));
static ID_PREFIX_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^ID:\s*(\S+)(?:\s+(.+))?$").expect("valid id prefix regex"));
static ISSUE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+-\d+$").expect("valid issue key regex"));
static DISALLOWED_FILE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]+"#).expect("valid file char regex"));
static NON_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// A story id and title split out of a display name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryName {
    pub story_id: String,
    pub title: String,
}

/// `"<id> <title>"`, or whichever part is non-empty.
pub fn format_story_name(story_id: &str, title: &str) -> String {
    match (story_id.trim(), title.trim()) {
        ("", title) => title.to_string(),
        (id, "") => id.to_string(),
        (id, title) => format!("{id} {title}"),
    }
}

/// Inverse of [`format_story_name`].
///
/// An issue key (`PROJ-12`), a `STORY-…` id or an `ID: …` prefix is split off the front;
/// anything else is all title.
pub fn parse_formatted_story_name(value: &str) -> StoryName {
    let raw = value.trim();
    for re in [&*ISSUE_KEY_TITLE_RE, &*STORY_KEY_TITLE_RE, &*ID_PREFIX_TITLE_RE] {
        if let Some(caps) = re.captures(raw) {
            return StoryName {
                story_id: caps[1].trim().to_string(),
                title: caps
                    .get(2)
                    .map(|title| title.as_str().trim().to_string())
                    .unwrap_or_default(),
            };
        }
    }
    StoryName {
        story_id: String::new(),
        title: raw.to_string(),
    }
}

/// The Jira summary for a story.
pub fn issue_name_for_story(story: &Story) -> String {
    format_story_name(&story.story_id, &story.title)
}

/// File name for a story: `<KEY>-<slug>.md`, `<KEY>.md` or `<slug>.md`.
pub fn story_file_name(story: &Story) -> String {
    let title = if story.title.trim().is_empty() {
        "untitled"
    } else {
        story.title.as_str()
    };
    let base = format_story_name(&story.story_id, title);
    let sanitized = DISALLOWED_FILE_CHARS_RE
        .replace_all(&base, "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let sanitized = if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized
    };

    let mut parts = sanitized.split(' ');
    if let (Some(first), Some(_)) = (parts.next(), parts.clone().next()) {
        if ISSUE_KEY_RE.is_match(first) {
            let rest = parts.collect::<Vec<_>>().join(" ");
            return format!("{first}-{}.md", slugify(&rest));
        }
    }
    if ISSUE_KEY_RE.is_match(&sanitized) {
        return format!("{sanitized}.md");
    }
    format!("{}.md", slugify(&sanitized))
}

/// Lowercase, runs outside `[a-z0-9]` become one dash, no dashes at the ends.
fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let slug = NON_SLUG_RE.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

/// Cap a file name at `max` characters, keeping its extension and at least one
/// character of the base name.
pub fn truncate_file_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let (base, extension) = match name.rfind('.') {
        Some(index) => name.split_at(index),
        None => (name, ""),
    };
    let keep = max.saturating_sub(extension.chars().count()).max(1);
    let mut truncated: String = base.chars().take(keep).collect();
    truncated.push_str(extension);
    truncated
}
