//! Inline Jira wiki markup → ADF text runs.
//!
//! A single left-to-right scan. At each position the triggers are tried in order:
//!
//! | markup        | marks          | notes                                              |
//! |---------------|----------------|----------------------------------------------------|
//! | `_*text*_`    | strong + em    | tried before the single delimiters                 |
//! | `*text*`      | strong         | content must be non-empty                          |
//! | `_text_`      | em             | closing `_` must not precede a letter or digit     |
//! | `-text-`      | strike         | see [`find_strike_end`]                            |
//! | `{_}text{_}`  | em             | brace form, allowed inside words                   |
//! | `{*}text{*}`  | strong         | brace form                                         |
//! | `{-}text{-}`  | strike         | brace form                                         |
//! | `{{text}}`    | code           |                                                    |
//! | `[text\|url]` | link           | link text is parsed recursively                    |
//!
//! Text that matches nothing is appended to the previous run when that run is plain,
//! otherwise it starts a new plain run.

use crate::adf::{Inline, Mark, TextRun};

/// Parse one line (or quote body) of wiki text into inline runs.
///
/// Empty input yields a single empty text run.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    if text.is_empty() {
        return vec![Inline::plain("")];
    }
    let chars: Vec<char> = text.chars().collect();
    parse_runs(&chars)
        .into_iter()
        .map(Inline::Text)
        .collect()
}

fn parse_runs(chars: &[char]) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if let Some((matched, next)) = match_markup(chars, i) {
            runs.extend(matched);
            i = next;
            continue;
        }

        let next = next_special(chars, i + 1);
        let segment: String = chars[i..next].iter().collect();
        match runs.last_mut() {
            Some(last) if last.is_plain() => last.text.push_str(&segment),
            _ => runs.push(TextRun::plain(segment)),
        }
        i = next;
    }

    runs
}

/// Try every trigger at `i`; returns the produced runs and the index after the markup.
fn match_markup(chars: &[char], i: usize) -> Option<(Vec<TextRun>, usize)> {
    match chars[i] {
        '_' => {
            if chars.get(i + 1) == Some(&'*') {
                if let Some(end) = find_seq(chars, i + 2, &['*', '_']) {
                    let run = marked(&chars[i + 2..end], vec![Mark::Strong, Mark::Em]);
                    return Some((vec![run], end + 2));
                }
            }
            if chars.get(i + 1) == Some(&'_') {
                return None;
            }
            let end = (i + 2..chars.len()).find(|&j| chars[j] == '_' && !precedes_word(chars, j))?;
            Some((vec![marked(&chars[i + 1..end], vec![Mark::Em])], end + 1))
        }
        '*' => {
            let end = find_char(chars, i + 1, '*')?;
            (end > i + 1).then(|| (vec![marked(&chars[i + 1..end], vec![Mark::Strong])], end + 1))
        }
        '-' => {
            let end = find_strike_end(chars, i)?;
            Some((vec![marked(&chars[i + 1..end], vec![Mark::Strike])], end + 1))
        }
        '{' if chars.get(i + 2) == Some(&'}') && matches!(chars.get(i + 1), Some('_' | '*' | '-')) => {
            let delimiter = [chars[i], chars[i + 1], chars[i + 2]];
            let end = (i + 4..chars.len().saturating_sub(2))
                .find(|&j| chars[j..j + 3] == delimiter)?;
            let mark = match delimiter[1] {
                '_' => Mark::Em,
                '*' => Mark::Strong,
                _ => Mark::Strike,
            };
            Some((vec![marked(&chars[i + 3..end], vec![mark])], end + 3))
        }
        '{' if chars.get(i + 1) == Some(&'{') => {
            let end = find_seq(chars, i + 2, &['}', '}'])?;
            Some((vec![marked(&chars[i + 2..end], vec![Mark::Code])], end + 2))
        }
        '[' => {
            let end = find_char(chars, i + 1, ']')?;
            let inner = &chars[i + 1..end];
            let pipe = inner.iter().position(|c| *c == '|')?;
            let href: String = inner[pipe + 1..].iter().collect();
            let label = &inner[..pipe];
            let mut runs = if label.is_empty() {
                vec![TextRun::plain(href.clone())]
            } else {
                parse_runs(label)
            };
            for run in &mut runs {
                run.marks.push(Mark::link(href.clone()));
            }
            Some((runs, end + 1))
        }
        _ => None,
    }
}

/// Closing dash of a strikethrough opened at `start`.
///
/// The opening dash must be followed, and the closing dash preceded, by a non-space
/// character. A closing dash followed by a letter or digit is skipped, so list dashes,
/// dates and hyphenated words stay plain text.
fn find_strike_end(chars: &[char], start: usize) -> Option<usize> {
    let first = *chars.get(start + 1)?;
    if first.is_whitespace() || first == '-' {
        return None;
    }
    (start + 2..chars.len()).find(|&j| {
        chars[j] == '-'
            && !chars[j - 1].is_whitespace()
            && !precedes_word(chars, j)
    })
}

fn precedes_word(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|c| c.is_alphanumeric())
}

fn find_char(chars: &[char], from: usize, target: char) -> Option<usize> {
    (from..chars.len()).find(|&j| chars[j] == target)
}

fn find_seq(chars: &[char], from: usize, seq: &[char; 2]) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&j| chars[j] == seq[0] && chars[j + 1] == seq[1])
}

fn next_special(chars: &[char], from: usize) -> usize {
    (from..chars.len())
        .find(|&j| matches!(chars[j], '*' | '_' | '-' | '{' | '['))
        .unwrap_or(chars.len())
}

fn marked(chars: &[char], marks: Vec<Mark>) -> TextRun {
    TextRun::new(chars.iter().collect::<String>(), marks)
}
