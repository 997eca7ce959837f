//! Extract labeled field values from semi-structured text.
//!
//! Given content such as a scraped profile page and a list of known label
//! strings, [`LabelExtractor::get`] returns the text that follows each label
//! up to the next label or the end of the content.
//!
//! ```
//! use label_scraper::LabelExtractor;
//!
//! let extractor = LabelExtractor::default();
//! let fields = extractor
//!     .get("First Name: Alice Last Name: Bob", &["First Name:", "Last Name:"])
//!     .unwrap();
//! assert_eq!(fields.get("First Name:"), Some("Alice"));
//! assert_eq!(fields.get("Last Name:"), Some("Bob"));
//! ```

pub mod config;
pub mod error;
pub mod parser;

pub use crate::config::{ExtractorConfig, Settings};
pub use crate::error::ArgumentError;
pub use crate::parser::Extraction;

/// Stateless extraction engine. Holds only immutable configuration, so one
/// instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct LabelExtractor {
    config: ExtractorConfig,
}

impl LabelExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Map each label found in `content` to its value.
    ///
    /// Fails when the content is blank, the label list is empty, a label is
    /// blank, or a label appears twice. Labels that do not occur are simply
    /// missing from the result.
    pub fn get<S: AsRef<str>>(&self, content: &str, labels: &[S]) -> Result<Extraction, ArgumentError> {
        parser::extract_fields(content, labels, &self.config)
    }

    /// The normalized, one-label-per-line text that [`get`](Self::get) scans.
    /// Performs no validation.
    pub fn preview_content<S: AsRef<str>>(&self, content: &str, labels: &[S]) -> String {
        parser::normalize_content(content, labels, &self.config)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_uses_config() {
        let raw = LabelExtractor::new(ExtractorConfig {
            de_entitize_content: false,
        });
        let fields = raw.get("Age: <i>4</i>", &["Age:"]).unwrap();
        assert_eq!(fields.get("Age:"), Some("<i>4</i>"));

        let fields = LabelExtractor::default().get("Age: <i>4</i>", &["Age:"]).unwrap();
        assert_eq!(fields.get("Age:"), Some("4"));
    }

    #[test]
    fn preview_does_not_validate() {
        let extractor = LabelExtractor::default();
        let preview = extractor.preview_content("Age: 4 Age: 5", &["Age:", "Age:"]);
        assert_eq!(preview, "\nAge: 4 Age: 5");
        assert_eq!(extractor.preview_content("", &["Age:"]), "");
        let none: [&str; 0] = [];
        assert_eq!(extractor.preview_content("a\nb", &none), "a b");
    }

    #[test]
    fn preview_is_idempotent() {
        let extractor = LabelExtractor::default();
        let labels = vec!["Name:".to_string(), "First Name:".to_string()];
        let first = extractor.preview_content("First Name: Alice Name: Bob", &labels);
        let second = extractor.preview_content("First Name: Alice Name: Bob", &labels);
        assert_eq!(first, second);
    }

    #[test]
    fn shared_across_threads() {
        let extractor = std::sync::Arc::new(LabelExtractor::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let extractor = std::sync::Arc::clone(&extractor);
                std::thread::spawn(move || {
                    let content = format!("Id: {} City: Oslo", i);
                    extractor.get(&content, &["Id:", "City:"]).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let fields = handle.join().unwrap();
            assert_eq!(fields.get("Id:"), Some(i.to_string().as_str()));
            assert_eq!(fields.get("City:"), Some("Oslo"));
        }
    }
}
