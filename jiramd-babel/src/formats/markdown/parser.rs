//! Markdown parsing (Markdown → ADF)
//!
//! Pipeline: Markdown string → Comrak AST → ADF tree.
//! Marks are tracked as a stack while walking inline nodes, so `***x***` becomes one run
//! carrying both `strong` and `em`.

use crate::adf::*;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use tracing::debug;

/// Parse a Markdown string into an ADF document.
pub fn parse_from_markdown(source: &str) -> Document {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let content = root.children().flat_map(blocks_from_node).collect();
    Document::new(content)
}

pub(crate) fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

fn blocks_from_node<'a>(node: &'a AstNode<'a>) -> Vec<Block> {
    let value = node.data.borrow().value.clone();
    match value {
        NodeValue::Paragraph => vec![Block::paragraph(inlines_from_children(node))],

        NodeValue::Heading(heading) => {
            vec![Block::heading(heading.level, inlines_from_children(node))]
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            lists_from_items(node, ordered)
        }

        NodeValue::CodeBlock(code) => {
            let language = code
                .info
                .split_whitespace()
                .next()
                .map(str::to_string);
            let text = code
                .literal
                .strip_suffix('\n')
                .unwrap_or(&code.literal)
                .to_string();
            vec![Block::CodeBlock(CodeBlock { language, text })]
        }

        NodeValue::BlockQuote => vec![Block::Blockquote(Blockquote {
            content: node.children().flat_map(blocks_from_node).collect(),
        })],

        NodeValue::Table(_) => vec![Block::Table(table_from_node(node))],

        NodeValue::ThematicBreak => vec![Block::Rule],

        NodeValue::HtmlBlock(html) => {
            debug!(literal = %html.literal.trim(), "dropping HTML block");
            Vec::new()
        }

        _ => {
            // footnote definitions, description lists and other extension blocks
            let content = inlines_from_children(node);
            if content.is_empty() {
                Vec::new()
            } else {
                vec![Block::paragraph(content)]
            }
        }
    }
}

/// Turn the items of one Markdown list into ADF lists.
///
/// Runs of checkbox items become task lists; a list mixing checkbox and plain items is
/// split at every change of kind.
fn lists_from_items<'a>(list: &'a AstNode<'a>, ordered: bool) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut items: Vec<ListItem> = Vec::new();
    let mut tasks: Vec<TaskItem> = Vec::new();

    for child in list.children() {
        let value = child.data.borrow().value.clone();
        match value {
            NodeValue::TaskItem(symbol) => {
                flush_list(&mut blocks, &mut items, ordered);
                let state = match symbol {
                    Some(c) if c.eq_ignore_ascii_case(&'x') => TaskState::Done,
                    _ => TaskState::Todo,
                };
                tasks.push(TaskItem {
                    state,
                    content: task_text(child),
                });
            }
            _ => {
                flush_tasks(&mut blocks, &mut tasks);
                items.push(ListItem {
                    content: child.children().flat_map(blocks_from_node).collect(),
                });
            }
        }
    }

    flush_list(&mut blocks, &mut items, ordered);
    flush_tasks(&mut blocks, &mut tasks);
    blocks
}

fn flush_list(blocks: &mut Vec<Block>, items: &mut Vec<ListItem>, ordered: bool) {
    if items.is_empty() {
        return;
    }
    let list = List {
        items: std::mem::take(items),
    };
    blocks.push(if ordered {
        Block::OrderedList(list)
    } else {
        Block::BulletList(list)
    });
}

fn flush_tasks(blocks: &mut Vec<Block>, tasks: &mut Vec<TaskItem>) {
    if !tasks.is_empty() {
        blocks.push(Block::TaskList(TaskList {
            items: std::mem::take(tasks),
        }));
    }
}

/// Inline content of a task item: its paragraphs joined by a space.
fn task_text<'a>(item: &'a AstNode<'a>) -> Vec<Inline> {
    let mut content = Vec::new();
    for (index, child) in item.children().enumerate() {
        if index > 0 {
            content.push(Inline::plain(" "));
        }
        content.extend(inlines_from_children(child));
    }
    merge_runs(content)
}

fn table_from_node<'a>(table: &'a AstNode<'a>) -> Table {
    let rows = table
        .children()
        .filter_map(|row| {
            let header = match row.data.borrow().value {
                NodeValue::TableRow(header) => header,
                _ => return None,
            };
            let kind = if header {
                CellKind::Header
            } else {
                CellKind::Data
            };
            let cells = row
                .children()
                .map(|cell| TableCell {
                    kind,
                    content: vec![Block::paragraph(inlines_from_children(cell))],
                })
                .collect();
            Some(TableRow { cells })
        })
        .collect();
    Table { rows }
}

fn inlines_from_children<'a>(node: &'a AstNode<'a>) -> Vec<Inline> {
    let mut marks = Vec::new();
    let mut out = Vec::new();
    for child in node.children() {
        collect_inlines(child, &mut marks, &mut out);
    }
    merge_runs(out)
}

fn collect_inlines<'a>(node: &'a AstNode<'a>, marks: &mut Vec<Mark>, out: &mut Vec<Inline>) {
    let value = node.data.borrow().value.clone();
    let pushed = match value {
        NodeValue::Text(text) => {
            out.push(Inline::marked(text.to_string(), marks.clone()));
            return;
        }
        NodeValue::Code(code) => {
            let mut code_marks = marks.clone();
            code_marks.push(Mark::Code);
            out.push(Inline::marked(code.literal, code_marks));
            return;
        }
        NodeValue::HtmlInline(html) => {
            out.push(Inline::marked(html, marks.clone()));
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            out.push(Inline::HardBreak);
            return;
        }
        NodeValue::Image(link) => {
            let mut alt = String::new();
            for child in node.children() {
                collect_text(child, &mut alt);
            }
            let text = if alt.is_empty() { link.url.clone() } else { alt };
            let mut image_marks = marks.clone();
            image_marks.push(Mark::link(link.url));
            out.push(Inline::marked(text, image_marks));
            return;
        }
        NodeValue::Strong => Some(Mark::Strong),
        NodeValue::Emph => Some(Mark::Em),
        NodeValue::Strikethrough => Some(Mark::Strike),
        NodeValue::Link(link) => Some(Mark::link(link.url)),
        _ => None,
    };

    if let Some(mark) = &pushed {
        marks.push(mark.clone());
    }
    for child in node.children() {
        collect_inlines(child, marks, out);
    }
    if pushed.is_some() {
        marks.pop();
    }
}

fn collect_text<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        _ => {
            for child in node.children() {
                collect_text(child, output);
            }
        }
    }
}

/// Merge neighbouring text runs that carry the same marks.
fn merge_runs(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut merged: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        match (merged.last_mut(), inline) {
            (Some(Inline::Text(last)), Inline::Text(run)) if last.marks == run.marks => {
                last.text.push_str(&run.text);
            }
            (_, inline) => merged.push(inline),
        }
    }
    merged
}
