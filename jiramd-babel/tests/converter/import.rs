//! Import tests (Markdown → ADF)

use jiramd_babel::adf::{Block, Inline, List, ListItem, Mark, MarkKind, TaskState};
use jiramd_babel::markdown_to_adf;
use serde_json::json;

fn first_block(md: &str) -> Block {
    markdown_to_adf(md)
        .content
        .into_iter()
        .next()
        .expect("one block")
}

#[test]
fn test_empty_markdown_is_empty_doc() {
    assert_eq!(
        markdown_to_adf("").to_value(),
        json!({ "type": "doc", "version": 1, "content": [] })
    );
}

#[test]
fn test_task_list() {
    let doc = markdown_to_adf("- [ ] Task 1\n- [x] Task 2");
    assert_eq!(doc.content.len(), 1);
    match &doc.content[0] {
        Block::TaskList(list) => {
            let states: Vec<_> = list.items.iter().map(|item| item.state).collect();
            assert_eq!(states, vec![TaskState::Todo, TaskState::Done]);
        }
        other => panic!("Expected task list, got {other:?}"),
    }
}

#[test]
fn test_heading_and_marks() {
    let doc = markdown_to_adf("## Plan\n\nShip **fast** and *safely*");
    match &doc.content[0] {
        Block::Heading(heading) => assert_eq!(heading.level, 2),
        other => panic!("Expected heading, got {other:?}"),
    }
    match &doc.content[1] {
        Block::Paragraph(paragraph) => {
            let marked: Vec<_> = paragraph
                .content
                .iter()
                .filter_map(|inline| match inline {
                    Inline::Text(run) if !run.is_plain() => Some(run.clone()),
                    _ => None,
                })
                .collect();
            assert_eq!(marked.len(), 2);
            assert_eq!(marked[0].text, "fast");
            assert!(marked[0].has(MarkKind::Strong));
            assert_eq!(marked[1].text, "safely");
            assert!(marked[1].has(MarkKind::Em));
        }
        other => panic!("Expected paragraph, got {other:?}"),
    }
}

#[test]
fn test_link() {
    match first_block("See [docs](https://example.com/docs)") {
        Block::Paragraph(paragraph) => {
            let link = paragraph
                .content
                .iter()
                .find_map(|inline| match inline {
                    Inline::Text(run) => run.link_href().map(|href| (run.text.clone(), href.to_string())),
                    _ => None,
                })
                .expect("a link run");
            assert_eq!(link, ("docs".to_string(), "https://example.com/docs".to_string()));
        }
        other => panic!("Expected paragraph, got {other:?}"),
    }
}

#[test]
fn test_code_block_keeps_language() {
    match first_block("```rust\nfn main() {}\n```") {
        Block::CodeBlock(code) => {
            assert_eq!(code.language.as_deref(), Some("rust"));
            assert_eq!(code.text, "fn main() {}");
        }
        other => panic!("Expected code block, got {other:?}"),
    }
}

#[test]
fn test_ordered_list_and_rule() {
    let doc = markdown_to_adf("1. one\n2. two\n\n---\n\ntail");
    assert!(matches!(&doc.content[0], Block::OrderedList(list) if list.items.len() == 2));
    assert!(matches!(doc.content[1], Block::Rule));
    assert!(matches!(doc.content[2], Block::Paragraph(_)));
}

#[test]
fn test_table_header_row() {
    let doc = markdown_to_adf("| a | b |\n| --- | --- |\n| 1 | 2 |");
    match &doc.content[0] {
        Block::Table(table) => {
            assert_eq!(table.rows.len(), 2);
            assert_eq!(table.rows[0].cells.len(), 2);
        }
        other => panic!("Expected table, got {other:?}"),
    }
}

#[test]
fn test_soft_wrapped_list_item_stays_one_item() {
    let doc = markdown_to_adf("- first item\n  wraps here\n- second");
    assert_eq!(
        doc.content,
        vec![Block::BulletList(List {
            items: vec![
                ListItem::from_inlines(vec![Inline::plain("first item wraps here")]),
                ListItem::from_inlines(vec![Inline::plain("second")]),
            ],
        })]
    );
}

#[test]
fn test_marks_touching_words_survive() {
    for (markdown, mark) in [
        ("foo*bar*", Mark::Em),
        ("foo**bar**", Mark::Strong),
        ("foo~~bar~~", Mark::Strike),
        ("foo`bar`", Mark::Code),
    ] {
        assert_eq!(
            first_block(markdown),
            Block::paragraph(vec![Inline::plain("foo"), Inline::marked("bar", vec![mark])]),
            "{markdown}"
        );
    }
}

#[test]
fn test_mark_followed_by_word_survives() {
    assert_eq!(
        first_block("*bar*baz and ~~gone~~d"),
        Block::paragraph(vec![
            Inline::marked("bar", vec![Mark::Em]),
            Inline::plain("baz and "),
            Inline::marked("gone", vec![Mark::Strike]),
            Inline::plain("d"),
        ])
    );
}
