//! JSON value → ADF tree.
//!
//! Decoding never fails. Jira returns plenty of node kinds outside the supported subset
//! (panels, mentions, media, status lozenges); those are reduced to their visible text or
//! dropped, and a missing or malformed document decodes to an empty one.

use super::nodes::*;
use serde_json::Value;
use tracing::debug;

/// Decode an ADF JSON value, leniently.
pub fn from_value(value: &Value) -> Document {
    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(1);

    let content = match value.get("content").and_then(Value::as_array) {
        Some(nodes) => blocks(nodes),
        None => Vec::new(),
    };

    Document { version, content }
}

fn node_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or("")
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn attr_str<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get("attrs")
        .and_then(|attrs| attrs.get(key))
        .and_then(Value::as_str)
}

fn blocks(nodes: &[Value]) -> Vec<Block> {
    nodes.iter().filter_map(block).collect()
}

fn block(node: &Value) -> Option<Block> {
    let block = match node_type(node) {
        "heading" => {
            let level = node
                .get("attrs")
                .and_then(|attrs| attrs.get("level"))
                .and_then(Value::as_u64)
                .unwrap_or(1)
                .clamp(1, 6) as u8;
            Block::heading(level, inlines(children(node)))
        }
        "paragraph" => Block::paragraph(inlines(children(node))),
        "bulletList" => Block::BulletList(list(node)),
        "orderedList" => Block::OrderedList(list(node)),
        "taskList" => Block::TaskList(task_list(node)),
        "codeBlock" => Block::CodeBlock(CodeBlock {
            language: attr_str(node, "language")
                .filter(|lang| !lang.is_empty())
                .map(str::to_string),
            text: plain_text(&inlines(children(node))),
        }),
        "blockquote" => Block::Blockquote(Blockquote {
            content: blocks(children(node)),
        }),
        "table" => Block::Table(table(node)),
        "rule" => Block::Rule,
        other => {
            // panel, expand, mediaSingle, decisionList, ...
            let content = inlines(children(node));
            if content.is_empty() {
                debug!(node_type = other, "dropping ADF block without text");
                return None;
            }
            debug!(node_type = other, "flattening unsupported ADF block to a paragraph");
            Block::paragraph(content)
        }
    };
    Some(block)
}

fn list(node: &Value) -> List {
    let items = children(node)
        .iter()
        .map(|item| {
            if node_type(item) == "listItem" {
                ListItem {
                    content: blocks(children(item)),
                }
            } else {
                ListItem {
                    content: block(item).into_iter().collect(),
                }
            }
        })
        .collect();
    List { items }
}

fn task_list(node: &Value) -> TaskList {
    let mut items = Vec::new();
    collect_task_items(node, &mut items);
    TaskList { items }
}

fn collect_task_items(node: &Value, items: &mut Vec<TaskItem>) {
    for child in children(node) {
        match node_type(child) {
            "taskItem" => {
                let state = match attr_str(child, "state") {
                    Some("DONE") => TaskState::Done,
                    _ => TaskState::Todo,
                };
                items.push(TaskItem {
                    state,
                    content: inlines(children(child)),
                });
            }
            // nested task lists are flattened into their parent
            "taskList" => collect_task_items(child, items),
            _ => {}
        }
    }
}

fn table(node: &Value) -> Table {
    let rows = children(node)
        .iter()
        .filter(|row| node_type(row) == "tableRow")
        .map(|row| TableRow {
            cells: children(row)
                .iter()
                .map(|cell| TableCell {
                    kind: if node_type(cell) == "tableHeader" {
                        CellKind::Header
                    } else {
                        CellKind::Data
                    },
                    content: blocks(children(cell)),
                })
                .collect(),
        })
        .collect();
    Table { rows }
}

fn inlines(nodes: &[Value]) -> Vec<Inline> {
    let mut out = Vec::new();
    for node in nodes {
        collect_inline(node, &mut out);
    }
    out
}

fn collect_inline(node: &Value, out: &mut Vec<Inline>) {
    match node_type(node) {
        "text" => {
            let text = node.get("text").and_then(Value::as_str).unwrap_or("");
            let marks = node
                .get("marks")
                .and_then(Value::as_array)
                .map(|marks| marks.iter().filter_map(mark).collect())
                .unwrap_or_default();
            out.push(Inline::Text(TextRun::new(text, marks)));
        }
        "hardBreak" => out.push(Inline::HardBreak),
        "mention" | "emoji" | "status" => {
            let text = attr_str(node, "text").or_else(|| attr_str(node, "shortName"));
            if let Some(text) = text {
                out.push(Inline::plain(text));
            }
        }
        "inlineCard" => {
            if let Some(url) = attr_str(node, "url") {
                out.push(Inline::marked(url, vec![Mark::link(url)]));
            }
        }
        _ => {
            // block nodes met in inline position contribute their text
            let nested = children(node);
            for (index, child) in nested.iter().enumerate() {
                if index > 0 && is_block_type(node_type(child)) {
                    out.push(Inline::plain(" "));
                }
                collect_inline(child, out);
            }
        }
    }
}

fn is_block_type(kind: &str) -> bool {
    matches!(
        kind,
        "paragraph" | "heading" | "bulletList" | "orderedList" | "listItem" | "taskItem"
    )
}

fn mark(node: &Value) -> Option<Mark> {
    match node_type(node) {
        "strong" => Some(Mark::Strong),
        "em" => Some(Mark::Em),
        "strike" => Some(Mark::Strike),
        "code" => Some(Mark::Code),
        "link" => Some(Mark::link(attr_str(node, "href").unwrap_or(""))),
        _ => None,
    }
}
