//! Markdown, Jira wiki markup and ADF interoperability for the jiramd sync tool
//!
//!     This crate converts rich text between the three representations a Jira ↔ Markdown
//!     sync deals with (a Markdown dialect, Jira's legacy wiki markup and the Atlassian
//!     Document Format), and parses/renders the Story template the tool keeps on disk.
//!
//!     This is a pure lib, that is, it powers jiramd-cli but is shell agnostic: no code
//!     here reads files, env vars or prints. Every call is synchronous and deterministic.
//!
//! Architecture
//!
//!     The ADF tree (./adf) is the shared model. Every format parses into it and
//!     serializes out of it, so each format only has to deal with its own syntax:
//!
//!     .
//!     ├── adf                     # ADF node model, lenient JSON decoding, encoding
//!     ├── converter.rs            # markdown_to_jira, adf_to_markdown, ...
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation
//!     │   │   ├── serializer.rs   # Serializer implementation
//!     │   │   └── mod.rs
//!     ├── issue.rs                # fetched Jira issue JSON → Story
//!     ├── status.rs               # Jira status ↔ story status
//!     └── story                   # Story template parser, renderer, naming, validation
//!
//!     Wiki markup is the hub of the converter: Markdown reaches ADF through it and ADF
//!     reaches Markdown through it. That keeps the supported construct set identical in
//!     every direction, which is what makes round trips stable.
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs
//!     ├── converter
//!     └── story
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to
//!     include these in the mod.
//!
//! Library Choices
//!
//!     Markdown is parsed with comrak; we never write a Markdown parser. The Markdown
//!     serializer is ours, see ./formats/markdown/serializer.rs for why.
//!
pub mod adf;
pub mod converter;
pub mod error;
pub mod format;
pub mod formats;
pub mod issue;
pub mod registry;
pub mod status;
pub mod story;

pub use converter::{
    adf_to_markdown, adf_value_to_markdown, jira_to_markdown, markdown_to_adf,
    markdown_to_jira, normalize_markdown,
};
pub use error::{FormatError, StoryParseError};
pub use format::Format;
pub use issue::{map_issue_to_story, parse_issues, JiraIssue};
pub use registry::FormatRegistry;
pub use status::{map_markdown_status_to_jira, normalize_status, status_category, StatusMap};
pub use story::{
    parse_markdown_to_stories, render_single_story_markdown, ParseOptions, Story, Todo,
};
