//! Story rendering and file naming.

use insta::assert_snapshot;
use jiramd_babel::story::{
    preferred_story_file_name, render_single_story_markdown, story_file_name, StoryMeta, Todo,
    DEFAULT_MAX_FILE_NAME_LENGTH,
};
use jiramd_babel::Story;

#[test]
fn test_render_body_with_acceptance_block() {
    let story = Story {
        story_id: "PROJ-40".into(),
        title: "Export CSV".into(),
        status: "In Review".into(),
        body: "Users export the table.\n\n**Acceptance Criteria:**\nQuotes are escaped per RFC 4180\n- [x] Header row".into(),
        todos: vec![Todo::new("Header row", true), Todo::new("Escapes quotes", false)],
        labels: vec!["export".into(), " ".into(), "High".into()],
        assignees: vec!["Ada".into()],
        meta: StoryMeta {
            priority: Some("2".into()),
            priority_label: Some("High".into()),
            ..StoryMeta::default()
        },
        ..Story::default()
    };
    assert_snapshot!(render_single_story_markdown(&story), @r###"
    ## Story: PROJ-40 Export CSV

    ### Story ID
    PROJ-40

    ### Status
    In Review

    ### Description
    Users export the table.

    ### Acceptance Criteria

    Quotes are escaped per RFC 4180

    - [x] Header row
    - [ ] Escapes quotes

    ### Priority
    High

    ### Labels
    export

    ### Assignees
    Ada
    "###);
}

#[test]
fn test_story_without_id() {
    let story = Story {
        title: "Loose idea".into(),
        ..Story::default()
    };
    assert_eq!(
        render_single_story_markdown(&story),
        "## Story: Loose idea\n\n### Status\nBacklog\n\n### Description\n"
    );
}

#[test]
fn test_story_file_names() {
    let story = Story {
        story_id: "PROJ-123".into(),
        title: "Test: Story / With Special".into(),
        ..Story::default()
    };
    assert_eq!(story_file_name(&story), "PROJ-123-test-story-with-special.md");
    assert_eq!(
        preferred_story_file_name(&story, DEFAULT_MAX_FILE_NAME_LENGTH),
        "PROJ-123-test-story-with-special.md"
    );

    let untitled = Story::default();
    assert_eq!(story_file_name(&untitled), "untitled.md");
}
