//! Per-line label injection for the text exposition format.
//!
//! Every line is handled on its own:
//! - comment (`#`) and blank lines pass through untouched
//! - `name{a="1"} 5` gets the fragment appended inside the first label block
//! - `name 5` gets a new block right after the metric name
//!
//! Metric names, values and timestamps are never rewritten.

use std::borrow::Cow;

/// Result of scanning a line for its first label block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelBlock {
    /// Byte offsets of `{` and its matching `}`.
    Found { open: usize, close: usize },
    /// `{` without a closing brace.
    Unterminated,
    Absent,
}

/// Find the first `{...}` span. Braces inside quoted label values
/// (including escaped quotes) do not open or close the block.
fn scan_label_block(line: &str) -> LabelBlock {
    let Some(open) = line.find('{') else {
        return LabelBlock::Absent;
    };

    let mut in_quotes = false;
    let mut escaped = false;
    for (i, b) in line.bytes().enumerate().skip(open + 1) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_quotes => escaped = true,
            b'"' => in_quotes = !in_quotes,
            b'}' if !in_quotes => return LabelBlock::Found { open, close: i },
            _ => {}
        }
    }
    LabelBlock::Unterminated
}

fn is_passthrough(line: &str) -> bool {
    let t = line.trim_start();
    t.is_empty() || t.starts_with('#')
}

/// Inject `fragment` (already rendered, e.g. `env="prod",dc="1"`) into one
/// exposition line.
///
/// An empty fragment, a comment, a blank line, an unterminated label block or
/// a line with fewer than two whitespace-separated tokens is returned as-is.
pub fn transform_line<'a>(line: &'a str, fragment: &str) -> Cow<'a, str> {
    if fragment.is_empty() || is_passthrough(line) {
        return Cow::Borrowed(line);
    }

    match scan_label_block(line) {
        LabelBlock::Found { open, close } => {
            let existing = line[open + 1..close].trim_end();
            let mut out = String::with_capacity(line.len() + fragment.len() + 1);
            out.push_str(&line[..close]);
            if !existing.is_empty() && !existing.ends_with(',') {
                out.push(',');
            }
            out.push_str(fragment);
            out.push_str(&line[close..]);
            Cow::Owned(out)
        }
        LabelBlock::Unterminated => Cow::Borrowed(line),
        LabelBlock::Absent => {
            let mut tokens = line.split_whitespace();
            let Some(name) = tokens.next() else {
                return Cow::Borrowed(line);
            };
            let rest: Vec<&str> = tokens.collect();
            if rest.is_empty() {
                return Cow::Borrowed(line);
            }
            Cow::Owned(format!("{name}{{{fragment}}} {}", rest.join(" ")))
        }
    }
}
