//! Jira wiki markup → ADF.
//!
//! The builder is a fold over lines. [`ScanState`] holds whatever block is still open
//! (a list, a code block, a table or a `{quote}` body); every other block is complete the
//! moment its line is read. Line classification, in priority order:
//!
//! 1. inside a code block: append until the closing `{code}`
//! 2. `{code[:lang]}` / `{noformat}`: open a code block
//! 3. `|` / `||` prefix: table row (header row iff `||`); any other line closes the table
//! 4. blank line: closes the open list
//! 5. `h1.` … `h6.`: heading
//! 6. `bq.`: single-line blockquote
//! 7. `{quote}`: collect lines until the closing `{quote}`
//! 8. `* `, `- `: bullet item, or task item when followed by `[ ]`, `[x]` or `[X]`
//! 9. `# `: ordered item
//! 10. `----`: rule
//! 11. anything else: paragraph
//!
//! Unterminated code and quote blocks consume the rest of the input.

use super::inline::parse_inline;
use crate::adf::*;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

static TASK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([ xX])\]\s+(.+)$").expect("valid task regex"));
static CODE_LANG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{code:([^}|]+)").expect("valid code regex"));

/// Build an ADF document from wiki markup.
pub fn parse_from_wiki(wiki: &str) -> Document {
    if wiki.is_empty() {
        return Document::empty();
    }
    wiki.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .fold(WikiBuilder::default(), WikiBuilder::feed)
        .finish()
}

/// The kind of list currently accumulating items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
    Task,
}

/// An open list and its items so far.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenList {
    Bullet(Vec<ListItem>),
    Ordered(Vec<ListItem>),
    Task(Vec<TaskItem>),
}

impl OpenList {
    fn kind(&self) -> ListKind {
        match self {
            OpenList::Bullet(_) => ListKind::Bullet,
            OpenList::Ordered(_) => ListKind::Ordered,
            OpenList::Task(_) => ListKind::Task,
        }
    }

    fn new(kind: ListKind) -> Self {
        match kind {
            ListKind::Bullet => OpenList::Bullet(Vec::new()),
            ListKind::Ordered => OpenList::Ordered(Vec::new()),
            ListKind::Task => OpenList::Task(Vec::new()),
        }
    }

    fn into_block(self) -> Block {
        match self {
            OpenList::Bullet(items) => Block::BulletList(List { items }),
            OpenList::Ordered(items) => Block::OrderedList(List { items }),
            OpenList::Task(items) => Block::TaskList(TaskList { items }),
        }
    }
}

/// Which closing marker ends the open code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fence {
    Code,
    NoFormat,
}

impl Fence {
    fn closes(&self, line: &str) -> bool {
        match self {
            Fence::Code => line.starts_with("{code}"),
            Fence::NoFormat => line.starts_with("{noformat}"),
        }
    }
}

/// Accumulator state between lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    InList(OpenList),
    InCode {
        fence: Fence,
        language: Option<String>,
        lines: Vec<String>,
    },
    InTable(Vec<TableRow>),
    InQuote(Vec<String>),
}

/// Line-at-a-time builder; see the module docs for the rules.
#[derive(Debug, Default)]
pub struct WikiBuilder {
    blocks: Vec<Block>,
    state: ScanState,
}

impl WikiBuilder {
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Consume one line.
    pub fn feed(mut self, line: &str) -> Self {
        match &mut self.state {
            ScanState::InCode { fence, lines, .. } => {
                if fence.closes(line) {
                    self.close();
                } else {
                    lines.push(line.to_string());
                }
                return self;
            }
            ScanState::InQuote(lines) => {
                if line.starts_with("{quote}") {
                    self.close();
                } else {
                    lines.push(line.to_string());
                }
                return self;
            }
            _ => {}
        }

        if line.starts_with("{code") || line.starts_with("{noformat}") {
            self.close();
            let (fence, language) = if line.starts_with("{noformat}") {
                (Fence::NoFormat, None)
            } else {
                let language = CODE_LANG_RE
                    .captures(line)
                    .map(|caps| caps[1].trim().to_string())
                    .filter(|lang| !lang.is_empty());
                (Fence::Code, language)
            };
            trace!(?fence, ?language, "open code block");
            self.state = ScanState::InCode {
                fence,
                language,
                lines: Vec::new(),
            };
            return self;
        }

        if line.starts_with('|') {
            self.push_table_row(line);
            return self;
        }
        if matches!(self.state, ScanState::InTable(_)) {
            self.close();
        }

        if line.trim().is_empty() {
            self.close();
            return self;
        }

        if let Some((level, rest)) = heading_prefix(line) {
            self.close();
            self.blocks
                .push(Block::heading(level, parse_inline(rest.trim())));
        } else if let Some(rest) = line.strip_prefix("bq.") {
            self.close();
            self.blocks.push(Block::Blockquote(Blockquote {
                content: vec![Block::paragraph(parse_inline(rest.trim()))],
            }));
        } else if line.starts_with("{quote}") {
            self.close();
            self.state = ScanState::InQuote(Vec::new());
        } else if let Some(rest) = bullet_item(line) {
            match TASK_RE.captures(rest) {
                Some(caps) => {
                    let state = if caps[1].eq_ignore_ascii_case("x") {
                        TaskState::Done
                    } else {
                        TaskState::Todo
                    };
                    let item = TaskItem {
                        state,
                        content: vec![Inline::plain(&caps[2])],
                    };
                    if let OpenList::Task(items) = self.open_list(ListKind::Task) {
                        items.push(item);
                    }
                }
                None => {
                    let item = ListItem::from_inlines(parse_inline(rest));
                    if let OpenList::Bullet(items) = self.open_list(ListKind::Bullet) {
                        items.push(item);
                    }
                }
            }
        } else if let Some(rest) = ordered_item(line) {
            let item = ListItem::from_inlines(parse_inline(rest));
            if let OpenList::Ordered(items) = self.open_list(ListKind::Ordered) {
                items.push(item);
            }
        } else if line.trim() == "----" {
            self.close();
            self.blocks.push(Block::Rule);
        } else {
            self.close();
            self.blocks.push(Block::paragraph(parse_inline(line)));
        }
        self
    }

    /// Flush whatever is still open and return the document.
    pub fn finish(mut self) -> Document {
        match &self.state {
            ScanState::InCode { .. } => debug!("unterminated code block consumed to end of input"),
            ScanState::InQuote(_) => debug!("unterminated quote consumed to end of input"),
            _ => {}
        }
        self.close();
        Document::new(self.blocks)
    }

    /// Return the open list of `kind`, flushing a list of another kind first.
    fn open_list(&mut self, kind: ListKind) -> &mut OpenList {
        let reuse = matches!(&self.state, ScanState::InList(list) if list.kind() == kind);
        if !reuse {
            self.close();
            self.state = ScanState::InList(OpenList::new(kind));
        }
        match &mut self.state {
            ScanState::InList(list) => list,
            _ => unreachable!("list state was just opened"),
        }
    }

    fn push_table_row(&mut self, line: &str) {
        let header = line.starts_with("||");
        let separator = if header { "||" } else { "|" };
        let kind = if header {
            CellKind::Header
        } else {
            CellKind::Data
        };
        let cells = line
            .split(separator)
            .filter(|cell| !cell.trim().is_empty())
            .map(|cell| TableCell {
                kind,
                content: vec![Block::paragraph(parse_inline(cell.trim()))],
            })
            .collect();

        if !matches!(self.state, ScanState::InTable(_)) {
            self.close();
            self.state = ScanState::InTable(Vec::new());
        }
        if let ScanState::InTable(rows) = &mut self.state {
            rows.push(TableRow { cells });
        }
    }

    /// Move the open accumulator, if any, into the finished blocks.
    fn close(&mut self) {
        let block = match std::mem::take(&mut self.state) {
            ScanState::Idle => return,
            ScanState::InList(list) => list.into_block(),
            ScanState::InCode {
                language, lines, ..
            } => Block::CodeBlock(CodeBlock {
                language,
                text: lines.join("\n"),
            }),
            ScanState::InTable(rows) => Block::Table(Table { rows }),
            ScanState::InQuote(lines) => Block::Blockquote(Blockquote {
                content: vec![Block::paragraph(quote_inlines(&lines))],
            }),
        };
        self.blocks.push(block);
    }
}

fn quote_inlines(lines: &[String]) -> Vec<Inline> {
    let mut content = Vec::new();
    for (index, line) in lines.iter().filter(|l| !l.trim().is_empty()).enumerate() {
        if index > 0 {
            content.push(Inline::HardBreak);
        }
        content.extend(parse_inline(line.trim()));
    }
    if content.is_empty() {
        content.push(Inline::plain(""));
    }
    content
}

fn heading_prefix(line: &str) -> Option<(u8, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'h' && (b'1'..=b'6').contains(&bytes[1]) && bytes[2] == b'.'
    {
        Some((bytes[1] - b'0', &line[3..]))
    } else {
        None
    }
}

/// Text of a bullet item (`* `, `*\t`, `- `, `-\t`, or a tight `-[ ]` checkbox).
fn bullet_item(line: &str) -> Option<&str> {
    for marker in ["* ", "*\t", "- ", "-\t"] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    line.strip_prefix('-')
        .filter(|rest| rest.starts_with('[') && TASK_RE.is_match(rest.trim()))
        .map(str::trim)
}

fn ordered_item(line: &str) -> Option<&str> {
    line.strip_prefix("# ")
        .or_else(|| line.strip_prefix("#\t"))
        .map(str::trim)
}
