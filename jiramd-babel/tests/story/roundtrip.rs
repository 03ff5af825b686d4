//! render(parse(render(story))) == render(story)

use jiramd_babel::story::{
    parse_markdown_to_stories, render_single_story_markdown, ParseOptions, StoryMeta, Todo,
};
use jiramd_babel::Story;

fn rerender(story: &Story) -> (String, String) {
    let first = render_single_story_markdown(story);
    let parsed = parse_markdown_to_stories(&first, &ParseOptions::default()).unwrap();
    assert_eq!(parsed.len(), 1, "{first}");
    (first, render_single_story_markdown(&parsed[0]))
}

fn stories() -> Vec<Story> {
    vec![
        Story {
            title: "Bare".into(),
            status: "Backlog".into(),
            ..Story::default()
        },
        Story {
            story_id: "PROJ-1".into(),
            title: "Everything".into(),
            status: "Done".into(),
            body: "line one\nline two\n\nsecond paragraph".into(),
            todos: vec![Todo::new("a", true), Todo::new("b", false)],
            assignees: vec!["Ada".into(), "Grace".into()],
            reporter: "Eve".into(),
            labels: vec!["x".into(), "y".into()],
            meta: StoryMeta {
                priority: Some("Medium".into()),
                priority_label: Some("Medium".into()),
                ..StoryMeta::default()
            },
        },
        Story {
            story_id: "PROJ-2".into(),
            title: "Free acceptance text".into(),
            status: "In Progress".into(),
            body: "Intro\n\n**Acceptance Criteria:**\nMust stay fast\n- [ ] measured".into(),
            todos: vec![Todo::new("measured", false)],
            ..Story::default()
        },
        Story {
            title: "Todos only".into(),
            status: "Ready".into(),
            todos: vec![Todo::new("one", false)],
            ..Story::default()
        },
    ]
}

#[test]
fn test_render_parse_render_is_stable() {
    for story in stories() {
        let (first, second) = rerender(&story);
        assert_eq!(first, second, "story {:?}", story.title);
    }
}

#[test]
fn test_parse_recovers_fields() {
    let story = &stories()[1];
    let first = render_single_story_markdown(story);
    let parsed = &parse_markdown_to_stories(&first, &ParseOptions::default()).unwrap()[0];
    assert_eq!(parsed.story_id, story.story_id);
    assert_eq!(parsed.title, story.title);
    assert_eq!(parsed.status, story.status);
    assert_eq!(parsed.todos, story.todos);
    assert_eq!(parsed.assignees, story.assignees);
    assert_eq!(parsed.labels, story.labels);
    assert_eq!(parsed.reporter, story.reporter);
    assert!(!parsed.body.contains("### "));
}
