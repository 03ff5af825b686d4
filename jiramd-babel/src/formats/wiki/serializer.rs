//! ADF → Jira wiki markup.
//!
//! One wiki block per ADF block, blocks separated by a blank line. Nested lists are
//! flattened into their parent list because the wiki builder only reads one level.

use crate::adf::*;

/// Serialize a document to wiki markup. Empty blocks are skipped.
pub fn serialize_to_wiki(doc: &Document) -> String {
    doc.content
        .iter()
        .map(block_to_wiki)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Serialize a single block.
pub fn block_to_wiki(block: &Block) -> String {
    match block {
        Block::Heading(heading) => {
            format!("h{}. {}", heading.level, single_line(&inlines_to_wiki(&heading.content)))
        }
        Block::Paragraph(paragraph) => inlines_to_wiki(&paragraph.content),
        Block::BulletList(list) => list_lines(list, "*").join("\n"),
        Block::OrderedList(list) => list_lines(list, "#").join("\n"),
        Block::TaskList(list) => list
            .items
            .iter()
            .map(|item| {
                let checkbox = if item.state.is_done() { "[x]" } else { "[ ]" };
                // always a dash: asterisk checkboxes get mangled by text converters
                format!("- {checkbox} {}", plain_text(&item.content))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Block::CodeBlock(code) => match &code.language {
            Some(language) => format!("{{code:{language}}}\n{}\n{{code}}", code.text),
            None => format!("{{code}}\n{}\n{{code}}", code.text),
        },
        Block::Blockquote(quote) => {
            let text = quote
                .content
                .iter()
                .map(block_text)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            if text.contains('\n') {
                format!("{{quote}}\n{text}\n{{quote}}")
            } else {
                format!("bq. {text}")
            }
        }
        Block::Table(table) => table
            .rows
            .iter()
            .map(|row| {
                let header = matches!(row.cells.first(), Some(cell) if cell.kind == CellKind::Header);
                let separator = if header { "||" } else { "|" };
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .map(|cell| single_line(&blocks_inline_text(&cell.content)))
                    .collect();
                format!("{separator}{}{separator}", cells.join(separator))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Rule => "----".to_string(),
    }
}

fn list_lines(list: &List, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for item in &list.items {
        let (nested, own): (Vec<&Block>, Vec<&Block>) = item.content.iter().partition(|block| {
            matches!(
                block,
                Block::BulletList(_) | Block::OrderedList(_) | Block::TaskList(_)
            )
        });
        let text = own
            .into_iter()
            .map(|block| single_line(&block_text(block)))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("{prefix} {text}"));
        for block in nested {
            lines.push(block_to_wiki(block));
        }
    }
    lines
}

/// Marked-up text of a block used in inline position (list items, cells, quotes).
fn block_text(block: &Block) -> String {
    match block {
        Block::Heading(heading) => inlines_to_wiki(&heading.content),
        Block::Paragraph(paragraph) => inlines_to_wiki(&paragraph.content),
        Block::CodeBlock(code) => format!("{{{{{}}}}}", code.text),
        other => block_to_wiki(other),
    }
}

/// Headings, list items and table cells are one wiki line each.
fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

fn blocks_inline_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(block_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serialize inline content, applying marks.
pub fn inlines_to_wiki(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .enumerate()
        .map(|(index, inline)| match inline {
            Inline::Text(run) => {
                let word_follows = matches!(
                    inlines.get(index + 1),
                    Some(Inline::Text(next)) if next.text.starts_with(char::is_alphanumeric)
                );
                wrap_run(run, word_follows)
            }
            Inline::HardBreak => "\n".to_string(),
        })
        .collect()
}

/// Serialize one text run.
///
/// `code` suppresses every other wrapping; otherwise strong/em are applied (combined as
/// `_*text*_`), strikethrough goes outside them and a link wraps everything.
pub fn run_to_wiki(run: &TextRun) -> String {
    wrap_run(run, false)
}

/// A closing `_` or `-` directly before a letter reads as part of the word, so those
/// delimiters switch to the brace form there.
fn wrap_run(run: &TextRun, word_follows: bool) -> String {
    let braced = word_follows && run.link_href().is_none();
    let mut text = run.text.clone();
    if text.is_empty() {
        return text;
    }

    if run.has(MarkKind::Code) {
        text = format!("{{{{{text}}}}}");
    } else {
        text = match (run.has(MarkKind::Strong), run.has(MarkKind::Em)) {
            (true, true) => format!("_*{text}*_"),
            (true, false) => format!("*{text}*"),
            (false, true) if braced && !run.has(MarkKind::Strike) => format!("{{_}}{text}{{_}}"),
            (false, true) => format!("_{text}_"),
            (false, false) => text,
        };
        if run.has(MarkKind::Strike) {
            text = if braced {
                format!("{{-}}{text}{{-}}")
            } else {
                format!("-{text}-")
            };
        }
    }

    if let Some(href) = run.link_href() {
        text = format!("[{text}|{href}]");
    }
    text
}
