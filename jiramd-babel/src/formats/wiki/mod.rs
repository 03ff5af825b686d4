//! Jira wiki markup format
//!
//! Wiki markup is the line-oriented text language of Jira Server and of the legacy Jira
//! editor. Both directions go through the ADF model.
//!
//! # Element Mapping Table
//!
//! | ADF node          | Wiki markup                   | Notes                                    |
//! |-------------------|-------------------------------|------------------------------------------|
//! | heading           | `h1.` … `h6.`                 |                                          |
//! | paragraph         | plain line                    | one paragraph per line on import         |
//! | bulletList        | `* item`                      | `- item` also accepted on import         |
//! | orderedList       | `# item`                      |                                          |
//! | taskList          | `- [ ] item` / `- [x] item`   | always a dash; item text is plain        |
//! | codeBlock         | `{code:lang}` … `{code}`      | `{noformat}` imports as a code block     |
//! | blockquote        | `bq. text` / `{quote}`…       |                                          |
//! | table             | `\|\|h\|\|` / `\|c\|`         | header row iff the first cell is header  |
//! | rule              | `----`                        |                                          |
//! | strong / em       | `*b*` / `_i_` / `_*both*_`    |                                          |
//! | strike            | `-s-`                         | delimiters must hug the text             |
//! | code              | `{{c}}`                       | suppresses other marks                   |
//! | link              | `[text\|url]`                 | outermost                                |
//!
//! # Lossy Conversions
//!
//! - Nested lists are flattened into their parent list
//! - Marks inside task items are dropped
//! - Multi-paragraph list items and cells are joined into one line

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::adf::Document;
use crate::error::FormatError;
use crate::format::Format;

pub use inline::parse_inline;
pub use parser::parse_from_wiki;
pub use serializer::serialize_to_wiki;

/// Format implementation for Jira wiki markup
pub struct WikiFormat;

impl Format for WikiFormat {
    fn name(&self) -> &str {
        "jira"
    }

    fn description(&self) -> &str {
        "Jira wiki markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["jira", "wiki"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_from_wiki(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_to_wiki(doc))
    }
}
