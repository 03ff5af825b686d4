//! Round-trip stability: for ADF built from the supported node and mark subset,
//! `adf_to_markdown` is a fixed point of ADF → Markdown → ADF → Markdown.

use jiramd_babel::adf::{
    Block, Document, Inline, List, ListItem, Mark, TaskItem, TaskList, TaskState, TextRun,
};
use jiramd_babel::{adf_to_markdown, jira_to_markdown, markdown_to_adf, markdown_to_jira};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn mark_set() -> impl Strategy<Value = Vec<Mark>> {
    prop_oneof![
        Just(vec![]),
        Just(vec![Mark::Strong]),
        Just(vec![Mark::Em]),
        Just(vec![Mark::Code]),
        Just(vec![Mark::Strike]),
    ]
}

/// Words with optional marks. A marked word may touch a plain neighbour with no space
/// between them; two marked words are always separated by a space.
fn inline_line() -> impl Strategy<Value = Vec<Inline>> {
    prop::collection::vec((word(), mark_set(), any::<bool>()), 1..5).prop_map(|words| {
        let mut inlines: Vec<Inline> = Vec::new();
        let mut previous_marked = false;
        for (index, (text, marks, spaced)) in words.into_iter().enumerate() {
            let marked = !marks.is_empty();
            if index > 0 && (spaced || (marked && previous_marked)) {
                inlines.push(Inline::plain(" "));
            }
            inlines.push(Inline::Text(TextRun::new(text, marks)));
            previous_marked = marked;
        }
        inlines
    })
}

fn list_items() -> impl Strategy<Value = Vec<ListItem>> {
    prop::collection::vec(inline_line(), 1..4)
        .prop_map(|lines| lines.into_iter().map(ListItem::from_inlines).collect())
}

fn list_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        list_items().prop_map(|items| Block::BulletList(List { items })),
        list_items().prop_map(|items| Block::OrderedList(List { items })),
        prop::collection::vec((prop::collection::vec(word(), 1..4), any::<bool>()), 1..4).prop_map(
            |items| Block::TaskList(TaskList {
                items: items
                    .into_iter()
                    .map(|(words, done)| TaskItem {
                        state: if done { TaskState::Done } else { TaskState::Todo },
                        content: vec![Inline::plain(words.join(" "))],
                    })
                    .collect(),
            })
        ),
    ]
}

/// A heading or list, always followed by a paragraph so two lists never touch.
fn section() -> impl Strategy<Value = Vec<Block>> {
    let lead = prop_oneof![
        (1u8..=6, inline_line()).prop_map(|(level, line)| Block::heading(level, line)),
        list_block(),
    ];
    (lead, inline_line()).prop_map(|(lead, paragraph)| vec![lead, Block::paragraph(paragraph)])
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(section(), 0..4)
        .prop_map(|sections| Document::new(sections.into_iter().flatten().collect()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn adf_to_markdown_is_stable(doc in document()) {
        let first = adf_to_markdown(&doc);
        let second = adf_to_markdown(&markdown_to_adf(&first));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn wiki_markdown_wiki_is_stable(doc in document()) {
        let markdown = adf_to_markdown(&doc);
        let wiki = markdown_to_jira(&markdown);
        prop_assert_eq!(markdown_to_jira(&jira_to_markdown(&wiki)), wiki);
    }
}

#[test]
fn test_task_list_round_trip() {
    let markdown = "- [ ] Task 1\n- [x] Task 2";
    assert_eq!(adf_to_markdown(&markdown_to_adf(markdown)), markdown);
}

#[test]
fn test_marks_touching_words_round_trip() {
    let doc = Document::new(vec![Block::paragraph(vec![
        Inline::plain("foo"),
        Inline::marked("bar", vec![Mark::Em]),
        Inline::plain("baz "),
        Inline::marked("qux", vec![Mark::Strike]),
        Inline::plain("end"),
    ])]);
    let first = adf_to_markdown(&doc);
    assert_eq!(first, "foo*bar*baz ~~qux~~end");
    assert_eq!(adf_to_markdown(&markdown_to_adf(&first)), first);
}

#[test]
fn test_mixed_document_round_trip() {
    let markdown = "## Steps\n\n1. clone\n2. **build**\n3. run `make`\n\nDone with ~~nothing~~ *everything*";
    assert_eq!(adf_to_markdown(&markdown_to_adf(markdown)), markdown);
}
