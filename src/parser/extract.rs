use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::normalize::LINE_BREAK;

/// Label → value pairs in the order they were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    fields: Vec<(String, String)>,
}

impl Extraction {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.fields.iter().any(|(l, _)| l == label)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    fn insert(&mut self, label: &str, value: &str) {
        self.fields.push((label.to_string(), value.to_string()));
    }
}

impl IntoIterator for Extraction {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl From<Extraction> for HashMap<String, String> {
    fn from(extraction: Extraction) -> Self {
        extraction.fields.into_iter().collect()
    }
}

impl Serialize for Extraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Scan normalized text line by line and pair each line-starting label with
/// the rest of its line.
///
/// Labels are tried in supplied order; the first one that prefixes the line
/// and has no value yet wins the line. A label seen again on a later line
/// keeps its first value.
pub fn extract_lines<S: AsRef<str>>(normalized: &str, labels: &[S]) -> Extraction {
    let mut found = Extraction::default();

    for line in normalized.split(LINE_BREAK).map(str::trim) {
        if line.is_empty() {
            continue;
        }
        let hit = labels
            .iter()
            .map(|l| l.as_ref())
            .filter(|l| !l.is_empty())
            .find(|l| line.starts_with(l) && !found.contains(l));
        if let Some(label) = hit {
            found.insert(label, line[label.len()..].trim());
        }
    }

    found
}

// ── Tests ──
