use thiserror::Error;

/// Precondition failures raised by [`crate::LabelExtractor::get`].
///
/// Validation runs before any normalization, so an error means no work was done.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("content must not be empty or whitespace")]
    EmptyContent,

    #[error("at least one label is required")]
    NoLabels,

    #[error("label at position {index} is empty or whitespace")]
    BlankLabel { index: usize },

    #[error("duplicate label {label:?}")]
    DuplicateLabel { label: String },
}
