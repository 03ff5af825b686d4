//! Markdown format implementation
//!
//! Markdown is the on-disk representation of issue descriptions and stories.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing, with the GFM table, strikethrough,
//! autolink and tasklist extensions enabled. Serialization is hand-written (see
//! `serializer.rs`).
//!
//! # Pipeline
//!
//! Jira only understands wiki markup and ADF, so the format goes through wiki markup in
//! both directions, exactly like the sync tool does:
//!
//! - parse: Markdown → comrak AST → ADF → wiki markup → ADF
//! - serialize: ADF → wiki markup → ADF → Markdown → checkbox and numbering fix-ups
//!
//! The wiki hop normalizes the tree to what Jira can store (flat lists, plain task items)
//! so a document converted from Markdown and back is stable after the first pass.
//!
//! # Element Mapping Table
//!
//! | Markdown              | Wiki markup            | Notes                                 |
//! |-----------------------|------------------------|---------------------------------------|
//! | `# Heading`           | `h1. Heading`          | levels 1-6                            |
//! | `**bold**`            | `*bold*`               |                                       |
//! | `*italic*`            | `_italic_`             | `_italic_` also parsed                |
//! | `***both***`          | `_*both*_`             |                                       |
//! | `~~strike~~`          | `-strike-`             |                                       |
//! | `` `code` ``          | `{{code}}`             |                                       |
//! | `[text](url)`         | `[text\|url]`          | images become links                   |
//! | fenced code           | `{code:lang}`          | first info word is the language       |
//! | `> quote`             | `bq.` / `{quote}`      |                                       |
//! | GFM table             | `\|\|h\|\|` / `\|c\|`  | first row is the header row           |
//! | `- item`              | `* item`               |                                       |
//! | `1. item`             | `# item`               | renumbered from 1 on output           |
//! | `- [ ] task`          | `- [ ] task`           | `[x]` and `[X]` mean done             |
//! | `---`                 | `----`                 |                                       |

pub mod parser;
pub mod serializer;

use crate::adf::Document;
use crate::converter;
use crate::error::FormatError;
use crate::format::Format;

pub use parser::parse_from_markdown;
pub use serializer::serialize_to_markdown;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "GitHub-flavoured Markdown subset"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(converter::markdown_to_adf(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(converter::adf_to_markdown(doc))
    }
}
