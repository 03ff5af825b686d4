//! Markdown serialization (ADF → Markdown)
//!
//! Hand-written rather than going through `comrak::format_commonmark`: comrak escapes
//! brackets and emphasis characters in text runs, which breaks the `- [ ]` task lines
//! and makes round trips drift. Ordered items are all written as `1.`; the converter's
//! renumbering pass assigns the final numbers.

use crate::adf::*;

/// Serialize a document to Markdown, blocks separated by a blank line.
pub fn serialize_to_markdown(doc: &Document) -> String {
    doc.content
        .iter()
        .map(block_to_markdown)
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block_to_markdown(block: &Block) -> String {
    match block {
        Block::Heading(heading) => format!(
            "{} {}",
            "#".repeat(usize::from(heading.level)),
            inlines_to_markdown(&heading.content)
        ),
        Block::Paragraph(paragraph) => inlines_to_markdown(&paragraph.content),
        Block::BulletList(list) => list_lines(list, false, 0).join("\n"),
        Block::OrderedList(list) => list_lines(list, true, 0).join("\n"),
        Block::TaskList(list) => list
            .items
            .iter()
            .map(|item| {
                let checkbox = if item.state.is_done() { "[x]" } else { "[ ]" };
                format!("- {checkbox} {}", inlines_to_markdown(&item.content))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Block::CodeBlock(code) => format!(
            "```{}\n{}\n```",
            code.language.as_deref().unwrap_or(""),
            code.text
        ),
        Block::Blockquote(quote) => quote
            .content
            .iter()
            .map(block_to_markdown)
            .collect::<Vec<_>>()
            .join("\n\n")
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Table(table) => table_lines(table).join("\n"),
        Block::Rule => "---".to_string(),
    }
}

fn list_lines(list: &List, ordered: bool, depth: usize) -> Vec<String> {
    let indent = "  ".repeat(depth);
    let marker = if ordered { "1." } else { "-" };
    let mut lines = Vec::new();
    for item in &list.items {
        let mut text = Vec::new();
        let mut nested = Vec::new();
        for block in &item.content {
            match block {
                Block::BulletList(inner) => nested.extend(list_lines(inner, false, depth + 1)),
                Block::OrderedList(inner) => nested.extend(list_lines(inner, true, depth + 1)),
                Block::TaskList(_) => {
                    let child_indent = "  ".repeat(depth + 1);
                    nested.extend(
                        block_to_markdown(block)
                            .lines()
                            .map(|line| format!("{child_indent}{line}")),
                    );
                }
                other => text.push(block_to_markdown(other).replace('\n', " ")),
            }
        }
        lines.push(format!("{indent}{marker} {}", text.join(" ")));
        lines.extend(nested);
    }
    lines
}

fn table_lines(table: &Table) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, row) in table.rows.iter().enumerate() {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| {
                cell.content
                    .iter()
                    .map(block_to_markdown)
                    .collect::<Vec<_>>()
                    .join(" ")
                    .replace('\n', " ")
                    .replace('|', "\\|")
            })
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
        // GFM tables always start with a header row
        if index == 0 {
            let rule = vec!["---"; row.cells.len().max(1)];
            lines.push(format!("| {} |", rule.join(" | ")));
        }
    }
    lines
}

/// Serialize inline content, applying marks.
pub fn inlines_to_markdown(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(run) => run_to_markdown(run),
            Inline::HardBreak => "\n".to_string(),
        })
        .collect()
}

/// Serialize one text run.
///
/// Surrounding whitespace is kept outside the delimiters, since `** x**` is not emphasis.
pub fn run_to_markdown(run: &TextRun) -> String {
    let core = run.text.trim();
    if core.is_empty() || run.is_plain() {
        return run.text.clone();
    }
    let leading = &run.text[..run.text.len() - run.text.trim_start().len()];
    let trailing = &run.text[run.text.trim_end().len()..];

    let mut text = if run.has(MarkKind::Code) {
        format!("`{core}`")
    } else {
        let mut text = match (run.has(MarkKind::Strong), run.has(MarkKind::Em)) {
            (true, true) => format!("***{core}***"),
            (true, false) => format!("**{core}**"),
            (false, true) => format!("*{core}*"),
            (false, false) => core.to_string(),
        };
        if run.has(MarkKind::Strike) {
            text = format!("~~{text}~~");
        }
        text
    };

    if let Some(href) = run.link_href() {
        text = format!("[{text}]({href})");
    }
    format!("{leading}{text}{trailing}")
}
