//! Story template parsing.

use jiramd_babel::status::StatusMap;
use jiramd_babel::story::{parse_markdown_to_stories, ParseOptions, Todo};
use jiramd_babel::StoryParseError;

fn parse(text: &str) -> Vec<jiramd_babel::Story> {
    parse_markdown_to_stories(text, &ParseOptions::default()).unwrap()
}

#[test]
fn test_minimal_story() {
    let stories = parse("## Story: PROJ-1 Title\n\n### Status\nDone");
    assert_eq!(stories.len(), 1);
    let story = &stories[0];
    assert_eq!(story.story_id, "PROJ-1");
    assert_eq!(story.title, "Title");
    assert_eq!(story.status, "Done");
    assert!(story.body.is_empty());
    assert!(story.todos.is_empty());
}

#[test]
fn test_full_heading_story() {
    let text = "\
# Sprint 12

## Story: Export CSV

### Story ID
PROJ-40

### Status
code review

### Description
Users export the table.

Keep column order.

### Acceptance Criteria
- [x] Header row
- [ ] Escapes quotes

### Priority
High

### Labels
export, csv

### Assignees
Ada, Grace

### Reporter
Eve
";
    let stories = parse(text);
    assert_eq!(stories.len(), 1);
    let story = &stories[0];
    assert_eq!(story.story_id, "PROJ-40");
    assert_eq!(story.title, "Export CSV");
    assert_eq!(story.status, "In Review");
    assert_eq!(
        story.body,
        "Users export the table.\n\nKeep column order.\n\n**Acceptance Criteria:**\n- [x] Header row\n- [ ] Escapes quotes"
    );
    assert_eq!(
        story.todos,
        vec![Todo::new("Header row", true), Todo::new("Escapes quotes", false)]
    );
    assert_eq!(story.labels, vec!["export", "csv"]);
    assert_eq!(story.assignees, vec!["Ada", "Grace"]);
    assert_eq!(story.reporter, "Eve");
    assert_eq!(story.meta.priority.as_deref(), Some("High"));
    assert_eq!(story.meta.priority_label.as_deref(), Some("High"));
}

#[test]
fn test_several_stories_and_crlf() {
    let text = "## Story: PROJ-1 One\r\n### Status\r\nBacklog\r\n## Story: PROJ-2 Two\r\n";
    let stories = parse(text);
    assert_eq!(stories.len(), 2);
    assert_eq!(stories[0].status, "Backlog");
    assert_eq!(stories[1].story_id, "PROJ-2");
    assert_eq!(stories[1].title, "Two");
}

#[test]
fn test_list_dialect() {
    let text = "\
- Story: STORY-9 Import contacts
  Status: doing
  Labels: [crm, import]
  Description: Read a vCard file
  and merge duplicates
  Acceptance Criteria:
      - [ ] Parses vCard 3
      - [x] Merges by email
";
    let stories = parse(text);
    assert_eq!(stories.len(), 1);
    let story = &stories[0];
    assert_eq!(story.story_id, "STORY-9");
    assert_eq!(story.title, "Import contacts");
    assert_eq!(story.status, "In Progress");
    assert_eq!(story.labels, vec!["crm", "import"]);
    assert_eq!(story.body, "Read a vCard file\nand merge duplicates");
    assert_eq!(
        story.todos,
        vec![Todo::new("Parses vCard 3", false), Todo::new("Merges by email", true)]
    );
}

#[test]
fn test_custom_status_map() {
    let options = ParseOptions {
        status_map: StatusMap::from([("Parked".to_string(), "Backlog".to_string())]),
        ..ParseOptions::default()
    };
    let stories =
        parse_markdown_to_stories("## Story: PROJ-3 Later\n### Status\nparked", &options).unwrap();
    assert_eq!(stories[0].status, "Backlog");
}

#[test]
fn test_missing_id_is_an_error_only_when_required() {
    let text = "notes\n\n## Story: Untracked";
    assert_eq!(parse(text)[0].story_id, "");

    let options = ParseOptions {
        file_path: Some("stories/untracked.md".into()),
        require_story_id: true,
        ..ParseOptions::default()
    };
    let err = parse_markdown_to_stories(text, &options).unwrap_err();
    assert_eq!(err.code(), "STORY_ID_MISSING");
    let StoryParseError::StoryIdMissing { location, title } = &err;
    assert_eq!(title, "Untracked");
    assert_eq!(location.file.as_deref(), Some("stories/untracked.md"));
    assert_eq!(location.line, 3);
    assert_eq!(
        err.to_string(),
        "Story ID is required but missing for story 'Untracked' at stories/untracked.md:3"
    );
}

#[test]
fn test_text_without_stories() {
    assert!(parse("# Just a document\n\nNothing here.").is_empty());
    assert!(parse("").is_empty());
}
