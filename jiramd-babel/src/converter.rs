//! Conversions between Markdown, Jira wiki markup and ADF.
//!
//! Every path goes through wiki markup, the lowest common denominator Jira accepts:
//!
//! ```text
//! markdown_to_adf:  Markdown ──comrak──▶ ADF ──▶ wiki ──▶ ADF
//! adf_to_markdown:  ADF ──▶ wiki ──▶ ADF ──▶ Markdown ──▶ normalize_markdown
//! ```
//!
//! [`normalize_markdown`] repairs the checkbox artifacts older converters produced
//! (`- < > task`) and renumbers ordered lists from 1.

use crate::adf::Document;
use crate::formats::markdown::{parse_from_markdown, serialize_to_markdown};
use crate::formats::wiki::{parse_from_wiki, serialize_to_wiki};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static CHECKBOX_ARTIFACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(\s*)- <([ xX])> ").expect("valid checkbox regex"));
static ORDERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)1\.(\s+.*)$").expect("valid ordered item regex"));

/// Markdown → Jira wiki markup.
pub fn markdown_to_jira(markdown: &str) -> String {
    serialize_to_wiki(&parse_from_markdown(markdown))
}

/// Jira wiki markup → Markdown.
pub fn jira_to_markdown(wiki: &str) -> String {
    normalize_markdown(&serialize_to_markdown(&parse_from_wiki(wiki)))
}

/// Markdown → ADF, via wiki markup.
pub fn markdown_to_adf(markdown: &str) -> Document {
    parse_from_wiki(&markdown_to_jira(markdown))
}

/// ADF → Markdown, via wiki markup.
pub fn adf_to_markdown(doc: &Document) -> String {
    normalize_markdown(&jira_to_markdown(&serialize_to_wiki(doc)))
}

/// ADF JSON → Markdown. `null` (an issue without description) yields an empty string.
pub fn adf_value_to_markdown(value: &Value) -> String {
    if value.is_null() {
        return String::new();
    }
    adf_to_markdown(&Document::from_value(value))
}

/// Fix checkbox artifacts and renumber ordered lists.
pub fn normalize_markdown(markdown: &str) -> String {
    let fixed = CHECKBOX_ARTIFACT_RE.replace_all(markdown, "$1- [$2] ");
    renumber_ordered_lists(&fixed)
}

/// Rewrite every contiguous run of `1.` items as 1..N.
///
/// Runs are tracked per indentation so a nested ordered list counts on its own and the
/// outer list resumes after it. A blank line or an unindented non-item line ends all
/// runs. Fenced code is left alone.
pub fn renumber_ordered_lists(markdown: &str) -> String {
    let mut counters: Vec<(usize, usize)> = Vec::new();
    let mut in_fence = false;
    let mut out: Vec<String> = Vec::new();

    for line in markdown.split('\n') {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            counters.clear();
            out.push(line.to_string());
            continue;
        }
        if in_fence {
            out.push(line.to_string());
            continue;
        }

        match ORDERED_ITEM_RE.captures(line) {
            Some(caps) => {
                let indent = caps[1].len();
                while counters.last().is_some_and(|(level, _)| *level > indent) {
                    counters.pop();
                }
                let number = match counters.last_mut() {
                    Some((level, count)) if *level == indent => {
                        *count += 1;
                        *count
                    }
                    _ => {
                        counters.push((indent, 1));
                        1
                    }
                };
                out.push(format!("{}{number}.{}", &caps[1], &caps[2]));
            }
            None => {
                let indent = line.len() - line.trim_start().len();
                if line.trim().is_empty() || indent == 0 {
                    counters.clear();
                } else {
                    while counters.last().is_some_and(|(level, _)| *level >= indent) {
                        counters.pop();
                    }
                }
                out.push(line.to_string());
            }
        }
    }

    out.join("\n")
}
