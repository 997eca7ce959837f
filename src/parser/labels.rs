use std::collections::HashSet;

use crate::error::ArgumentError;

/// Byte range of one label occurrence inside a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
}

impl Occurrence {
    /// Same occurrence after `by` bytes were inserted in front of it.
    pub fn shifted(self, by: usize) -> Self {
        Occurrence {
            start: self.start + by,
            end: self.end + by,
        }
    }
}

/// Reject label lists that `get` cannot work with.
pub fn validate<S: AsRef<str>>(labels: &[S]) -> Result<(), ArgumentError> {
    if labels.is_empty() {
        return Err(ArgumentError::NoLabels);
    }

    if let Some(index) = labels.iter().position(|l| l.as_ref().trim().is_empty()) {
        return Err(ArgumentError::BlankLabel { index });
    }

    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        let label = label.as_ref();
        if !seen.insert(label) {
            return Err(ArgumentError::DuplicateLabel {
                label: label.to_string(),
            });
        }
    }
    Ok(())
}

/// Label list in supplied order, with the nesting relationships precomputed.
///
/// A label is *nested* when another label is a substring of it or it is a
/// substring of another label. Nested labels are located with a greedy
/// longest-match-first scan so that `Name:` is never found inside
/// `First Name:`; every other label uses a plain substring search.
#[derive(Debug, Clone)]
pub struct LabelSet<'a> {
    labels: Vec<&'a str>,
    by_length: Vec<&'a str>,
    nested: Vec<bool>,
}

impl<'a> LabelSet<'a> {
    /// Empty strings are dropped: they would match at every position.
    pub fn new<S: AsRef<str>>(labels: &'a [S]) -> Self {
        let labels: Vec<&str> = labels
            .iter()
            .map(|l| l.as_ref())
            .filter(|l| !l.is_empty())
            .collect();

        let nested = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                labels
                    .iter()
                    .enumerate()
                    .any(|(j, other)| i != j && (other.contains(label) || label.contains(other)))
            })
            .collect();

        let mut by_length = labels.clone();
        by_length.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        by_length.dedup();

        LabelSet {
            labels,
            by_length,
            nested,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, idx: usize) -> &'a str {
        self.labels[idx]
    }

    pub(crate) fn is_nested(&self, idx: usize) -> bool {
        self.nested[idx]
    }

    /// First occurrence of label `idx` starting at or after byte offset `from`.
    pub fn locate(&self, text: &str, idx: usize, from: usize) -> Option<Occurrence> {
        let label = self.labels[idx];
        if self.is_nested(idx) {
            self.scan(text, label, from)
        } else {
            text.get(from..)?.find(label).map(|i| Occurrence {
                start: from + i,
                end: from + i + label.len(),
            })
        }
    }

    /// Left-to-right tokenization where the longest label starting at a
    /// position consumes it. Always starts at 0 so token boundaries do not
    /// depend on `from`.
    fn scan(&self, text: &str, label: &str, from: usize) -> Option<Occurrence> {
        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            match self.longest_at(rest) {
                Some(found) => {
                    if found == label && pos >= from {
                        return Some(Occurrence {
                            start: pos,
                            end: pos + found.len(),
                        });
                    }
                    pos += found.len();
                }
                None => pos += rest.chars().next().map_or(1, char::len_utf8),
            }
        }
        None
    }

    fn longest_at(&self, rest: &str) -> Option<&'a str> {
        self.by_length.iter().copied().find(|l| rest.starts_with(l))
    }
}

// ── Tests ──
