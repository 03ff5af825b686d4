//! Section keywords shared by the heading and list dialects.

/// A field of the story template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    StoryId,
    Status,
    Description,
    Acceptance,
    Assignees,
    Reporter,
    Labels,
    Priority,
}

/// Substring → section; the first matching entry wins, so order matters
/// ("Story ID" must not fall through to anything else).
const SECTION_KEYWORDS: &[(&str, Section)] = &[
    ("story id", Section::StoryId),
    ("status", Section::Status),
    ("description", Section::Description),
    ("acceptance", Section::Acceptance),
    ("criteria", Section::Acceptance),
    ("todos", Section::Acceptance),
    ("assignee", Section::Assignees),
    ("reporter", Section::Reporter),
    ("label", Section::Labels),
    ("priority", Section::Priority),
];

/// Lowercase, `_`/`-` as spaces, single spaces, no trailing colon.
pub fn normalize_section_name(name: &str) -> String {
    name.trim()
        .trim_end_matches(':')
        .to_lowercase()
        .replace(&['_', '-'][..], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify a `### Heading` text or a `Field:` name.
pub fn classify_section(name: &str) -> Option<Section> {
    let normalized = normalize_section_name(name);
    SECTION_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, section)| *section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_headings() {
        assert_eq!(classify_section("Story ID"), Some(Section::StoryId));
        assert_eq!(classify_section("Acceptance Criteria"), Some(Section::Acceptance));
        assert_eq!(classify_section("Todos"), Some(Section::Acceptance));
        assert_eq!(classify_section("Assignees"), Some(Section::Assignees));
        assert_eq!(classify_section("Labels"), Some(Section::Labels));
        assert_eq!(classify_section("Notes"), None);
    }

    #[test]
    fn test_field_spellings() {
        assert_eq!(classify_section("story_id:"), Some(Section::StoryId));
        assert_eq!(classify_section("Acceptance-Criteria"), Some(Section::Acceptance));
        assert_eq!(classify_section("  STATUS "), Some(Section::Status));
    }
}
