//! ADF tree → JSON value.
//!
//! Task lists get deterministic local ids (`task-list-<n>`, `task-<n>-<i>`) numbered in
//! document order, so encoding the same tree twice yields identical JSON.

use super::nodes::*;
use serde_json::{json, Map, Value};

/// Encode a document as an ADF JSON value.
pub fn to_value(doc: &Document) -> Value {
    let mut encoder = Encoder::default();
    let content: Vec<Value> = doc
        .content
        .iter()
        .map(|block| encoder.block(block))
        .collect();
    json!({
        "type": "doc",
        "version": doc.version,
        "content": content,
    })
}

#[derive(Default)]
struct Encoder {
    task_lists: usize,
}

impl Encoder {
    fn block(&mut self, block: &Block) -> Value {
        match block {
            Block::Heading(heading) => json!({
                "type": "heading",
                "attrs": { "level": heading.level },
                "content": inlines(&heading.content),
            }),
            Block::Paragraph(paragraph) => json!({
                "type": "paragraph",
                "content": inlines(&paragraph.content),
            }),
            Block::BulletList(list) | Block::OrderedList(list) => {
                let items: Vec<Value> = list
                    .items
                    .iter()
                    .map(|item| {
                        json!({
                            "type": "listItem",
                            "content": self.blocks(&item.content),
                        })
                    })
                    .collect();
                json!({ "type": block.type_name(), "content": items })
            }
            Block::TaskList(list) => {
                self.task_lists += 1;
                let list_id = self.task_lists;
                let items: Vec<Value> = list
                    .items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        json!({
                            "type": "taskItem",
                            "attrs": {
                                "localId": format!("task-{list_id}-{index}"),
                                "state": item.state.as_str(),
                            },
                            "content": inlines(&item.content),
                        })
                    })
                    .collect();
                json!({
                    "type": "taskList",
                    "attrs": { "localId": format!("task-list-{list_id}") },
                    "content": items,
                })
            }
            Block::CodeBlock(code) => {
                let mut node = Map::new();
                node.insert("type".into(), json!("codeBlock"));
                let attrs = match &code.language {
                    Some(language) => json!({ "language": language }),
                    None => json!({}),
                };
                node.insert("attrs".into(), attrs);
                // ADF rejects empty text nodes
                let content = if code.text.is_empty() {
                    Vec::new()
                } else {
                    vec![json!({ "type": "text", "text": code.text })]
                };
                node.insert("content".into(), Value::Array(content));
                Value::Object(node)
            }
            Block::Blockquote(quote) => json!({
                "type": "blockquote",
                "content": self.blocks(&quote.content),
            }),
            Block::Table(table) => {
                let rows: Vec<Value> = table
                    .rows
                    .iter()
                    .map(|row| {
                        let cells: Vec<Value> = row
                            .cells
                            .iter()
                            .map(|cell| {
                                json!({
                                    "type": cell.kind.type_name(),
                                    "attrs": {},
                                    "content": self.blocks(&cell.content),
                                })
                            })
                            .collect();
                        json!({ "type": "tableRow", "content": cells })
                    })
                    .collect();
                json!({
                    "type": "table",
                    "attrs": { "isNumberColumnEnabled": false, "layout": "default" },
                    "content": rows,
                })
            }
            Block::Rule => json!({ "type": "rule" }),
        }
    }

    fn blocks(&mut self, blocks: &[Block]) -> Vec<Value> {
        blocks.iter().map(|block| self.block(block)).collect()
    }
}

fn inlines(content: &[Inline]) -> Vec<Value> {
    content.iter().filter_map(inline).collect()
}

fn inline(inline: &Inline) -> Option<Value> {
    match inline {
        Inline::HardBreak => Some(json!({ "type": "hardBreak" })),
        Inline::Text(run) if run.text.is_empty() => None,
        Inline::Text(run) => {
            let mut node = Map::new();
            node.insert("type".into(), json!("text"));
            node.insert("text".into(), json!(run.text));
            if !run.marks.is_empty() {
                let marks: Vec<Value> = run.marks.iter().map(mark).collect();
                node.insert("marks".into(), Value::Array(marks));
            }
            Some(Value::Object(node))
        }
    }
}

fn mark(mark: &Mark) -> Value {
    match mark {
        Mark::Link { href } => json!({ "type": "link", "attrs": { "href": href } }),
        other => json!({ "type": other.type_name() }),
    }
}
