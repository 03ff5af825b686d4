//! Core data structures for the Atlassian Document Format (ADF) subset.
//!
//! Only the node kinds the converters understand are modelled. Anything else is folded
//! into these variants by the lenient decoder in [`super::from_json`].

/// The root of an ADF document (`{"type": "doc", "version": 1, "content": [...]}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub version: u32,
    pub content: Vec<Block>,
}

impl Document {
    pub fn new(content: Vec<Block>) -> Self {
        Document {
            version: 1,
            content,
        }
    }

    /// An empty version 1 document.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    BulletList(List),
    OrderedList(List),
    TaskList(TaskList),
    CodeBlock(CodeBlock),
    Blockquote(Blockquote),
    Table(Table),
    Rule,
}

impl Block {
    pub fn paragraph(content: Vec<Inline>) -> Self {
        Block::Paragraph(Paragraph { content })
    }

    pub fn heading(level: u8, content: Vec<Inline>) -> Self {
        Block::Heading(Heading {
            level: level.clamp(1, 6),
            content,
        })
    }

    /// Node type name as it appears in ADF JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Heading(_) => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::BulletList(_) => "bulletList",
            Block::OrderedList(_) => "orderedList",
            Block::TaskList(_) => "taskList",
            Block::CodeBlock(_) => "codeBlock",
            Block::Blockquote(_) => "blockquote",
            Block::Table(_) => "table",
            Block::Rule => "rule",
        }
    }
}

/// A heading, level 1 to 6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub content: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

/// Items of a bullet or ordered list. The list kind lives on [`Block`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub content: Vec<Block>,
}

impl ListItem {
    /// A list item holding a single paragraph.
    pub fn from_inlines(content: Vec<Inline>) -> Self {
        ListItem {
            content: vec![Block::paragraph(content)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskList {
    pub items: Vec<TaskItem>,
}

/// A checkbox entry. Task items carry inline content directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub state: TaskState,
    pub content: Vec<Inline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Todo,
    Done,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Todo => "TODO",
            TaskState::Done => "DONE",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskState::Done)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blockquote {
    pub content: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub kind: CellKind,
    pub content: Vec<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header,
    Data,
}

impl CellKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            CellKind::Header => "tableHeader",
            CellKind::Data => "tableCell",
        }
    }
}

/// Inline content of headings, paragraphs and task items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(TextRun),
    HardBreak,
}

impl Inline {
    pub fn plain(text: impl Into<String>) -> Self {
        Inline::Text(TextRun::plain(text))
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Inline::Text(TextRun::new(text, marks))
    }
}

/// A run of text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl TextRun {
    pub fn new(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        TextRun {
            text: text.into(),
            marks,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    pub fn has(&self, kind: MarkKind) -> bool {
        self.marks.iter().any(|m| m.kind() == kind)
    }

    pub fn link_href(&self) -> Option<&str> {
        self.marks.iter().find_map(|m| match m {
            Mark::Link { href } => Some(href.as_str()),
            _ => None,
        })
    }

    pub fn is_plain(&self) -> bool {
        self.marks.is_empty()
    }
}

/// Formatting applied to a [`TextRun`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Strong,
    Em,
    Strike,
    Code,
    Link { href: String },
}

/// Payload-free discriminant of [`Mark`], used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Strong,
    Em,
    Strike,
    Code,
    Link,
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link { href: href.into() }
    }

    pub fn kind(&self) -> MarkKind {
        match self {
            Mark::Strong => MarkKind::Strong,
            Mark::Em => MarkKind::Em,
            Mark::Strike => MarkKind::Strike,
            Mark::Code => MarkKind::Code,
            Mark::Link { .. } => MarkKind::Link,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Link { .. } => "link",
        }
    }
}

/// Concatenated text of a slice of inlines, marks ignored.
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(run) => run.text.as_str(),
            Inline::HardBreak => "\n",
        })
        .collect()
}
