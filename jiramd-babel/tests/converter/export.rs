//! Export tests (ADF → Markdown and wiki markup)

use insta::assert_snapshot;
use jiramd_babel::adf::{Block, Document, Inline, Mark, TextRun};
use jiramd_babel::formats::wiki::{parse_inline, serialize_to_wiki};
use jiramd_babel::{adf_to_markdown, adf_value_to_markdown, markdown_to_adf, normalize_markdown};
use serde_json::{json, Value};

fn adf(value: Value) -> Document {
    Document::from_value(&value)
}

#[test]
fn test_null_description() {
    assert_eq!(adf_value_to_markdown(&Value::Null), "");
    assert_eq!(adf_value_to_markdown(&json!({ "type": "doc" })), "");
}

#[test]
fn test_ordered_list_is_numbered_from_one() {
    let items: Vec<Value> = ["first", "second", "third"]
        .iter()
        .map(|text| {
            json!({
                "type": "listItem",
                "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": text }] }]
            })
        })
        .collect();
    let doc = adf(json!({
        "type": "doc",
        "version": 1,
        "content": [{ "type": "orderedList", "content": items }]
    }));
    assert_eq!(adf_to_markdown(&doc), "1. first\n2. second\n3. third");
}

#[test]
fn test_strong_em_is_combined_in_wiki() {
    let doc = adf(json!({
        "type": "doc",
        "version": 1,
        "content": [{ "type": "paragraph", "content": [
            { "type": "text", "text": "both", "marks": [{ "type": "strong" }, { "type": "em" }] }
        ]}]
    }));
    assert_eq!(serialize_to_wiki(&doc), "_*both*_");
    assert_eq!(
        parse_inline("_*both*_"),
        vec![Inline::Text(TextRun::new("both", vec![Mark::Strong, Mark::Em]))]
    );
}

#[test]
fn test_marks_next_to_words_keep_their_boundaries() {
    let doc = Document::new(vec![Block::paragraph(vec![
        Inline::plain("foo"),
        Inline::marked("bar", vec![Mark::Em]),
    ])]);
    assert_eq!(adf_to_markdown(&doc), "foo*bar*");

    let doc = Document::new(vec![Block::paragraph(vec![
        Inline::marked("bar", vec![Mark::Em]),
        Inline::plain("baz "),
        Inline::plain("x"),
        Inline::marked("gone", vec![Mark::Strike]),
        Inline::plain("y"),
    ])]);
    assert_eq!(serialize_to_wiki(&doc), "{_}bar{_}baz x{-}gone{-}y");
    assert_eq!(adf_to_markdown(&doc), "*bar*baz x~~gone~~y");
}

#[test]
fn test_checkboxes_survive() {
    for (input, expected) in [
        ("- [ ] X", "- [ ] X"),
        ("- [x] X", "- [x] X"),
        ("- [X] X", "- [x] X"),
    ] {
        assert_eq!(adf_to_markdown(&markdown_to_adf(input)), expected, "{input}");
    }
}

#[test]
fn test_lenient_nodes_become_text() {
    let doc = adf(json!({
        "type": "doc",
        "version": 1,
        "content": [
            { "type": "paragraph", "content": [
                { "type": "text", "text": "Ping " },
                { "type": "mention", "attrs": { "id": "1", "text": "@ada" } },
                { "type": "text", "text": " now" }
            ]},
            { "type": "panel", "content": [
                { "type": "paragraph", "content": [{ "type": "text", "text": "Note" }] }
            ]}
        ]
    }));
    assert_eq!(adf_to_markdown(&doc), "Ping @ada now\n\nNote");
}

#[test]
fn test_normalize_markdown_repairs_older_output() {
    assert_eq!(
        normalize_markdown("- < > a\n- <x> b\n\n1. one\n1. two"),
        "- [ ] a\n- [x] b\n\n1. one\n2. two"
    );
}

#[test]
fn test_kitchen_sink_to_markdown() {
    let doc = adf(json!({
        "type": "doc",
        "version": 1,
        "content": [
            { "type": "heading", "attrs": { "level": 1 }, "content": [{ "type": "text", "text": "Release" }] },
            { "type": "paragraph", "content": [
                { "type": "text", "text": "Read " },
                { "type": "text", "text": "the notes", "marks": [{ "type": "link", "attrs": { "href": "https://example.com" } }] },
                { "type": "text", "text": " and run " },
                { "type": "text", "text": "make", "marks": [{ "type": "code" }] }
            ]},
            { "type": "bulletList", "content": [
                { "type": "listItem", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "fast" }] }] },
                { "type": "listItem", "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "safe", "marks": [{ "type": "strike" }] }] }] }
            ]},
            { "type": "taskList", "content": [
                { "type": "taskItem", "attrs": { "state": "DONE" }, "content": [{ "type": "text", "text": "build" }] },
                { "type": "taskItem", "attrs": { "state": "TODO" }, "content": [{ "type": "text", "text": "ship" }] }
            ]},
            { "type": "codeBlock", "attrs": { "language": "sh" }, "content": [{ "type": "text", "text": "make release" }] },
            { "type": "rule" }
        ]
    }));
    assert_snapshot!(adf_to_markdown(&doc), @r###"
    # Release

    Read [the notes](https://example.com) and run `make`

    - fast
    - ~~safe~~

    - [x] build
    - [ ] ship

    ```sh
    make release
    ```

    ---
    "###);
}
