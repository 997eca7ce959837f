use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::labels::LabelSet;

/// Marker placed in front of label occurrences; the extractor splits on it.
pub const LINE_BREAK: char = '\n';

static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Replace every CRLF, LF and CR with a single space.
pub fn flatten_line_breaks(content: &str) -> String {
    LINE_BREAK_RE.replace_all(content, " ").into_owned()
}

/// Flatten `content` to one line, then break it so that label occurrences
/// start their own lines.
///
/// Labels are processed in supplied order and every step works on the text
/// produced by the previous one, so offsets found for later labels already
/// account for earlier insertions.
pub fn normalize<S: AsRef<str>>(content: &str, labels: &[S]) -> String {
    let set = LabelSet::new(labels);
    let flat = flatten_line_breaks(content);
    (0..set.len()).fold(flat, |text, idx| break_around(text, &set, idx))
}

/// One fold step for label `idx`.
///
/// The very first break goes in front of the label itself; after that, only
/// the nearest following label of a different kind gets a break, which ends
/// this label's value.
fn break_around(text: String, set: &LabelSet<'_>, idx: usize) -> String {
    let label = set.label(idx);
    let Some(found) = set.locate(&text, idx, 0) else {
        debug!(label, "label not found");
        return text;
    };

    let (text, found) = if text.contains(LINE_BREAK) {
        (text, found)
    } else {
        (
            insert_break(text, found.start, label),
            found.shifted(LINE_BREAK.len_utf8()),
        )
    };

    match next_other(&text, set, idx, found.end) {
        Some((start, next)) => insert_break(text, start, next),
        None => text,
    }
}

/// Nearest occurrence of any label other than `idx` at or after `from`.
fn next_other<'a>(text: &str, set: &LabelSet<'a>, idx: usize, from: usize) -> Option<(usize, &'a str)> {
    let label = set.label(idx);
    (0..set.len())
        .filter(|&other| set.label(other) != label)
        .filter_map(|other| set.locate(text, other, from).map(|o| (o.start, set.label(other))))
        .min_by_key(|&(start, _)| start)
}

fn insert_break(mut text: String, at: usize, label: &str) -> String {
    trace!(label, offset = at, "inserting line break");
    text.insert(at, LINE_BREAK);
    text
}

// ── Tests ──
