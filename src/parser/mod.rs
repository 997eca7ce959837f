pub mod extract;
pub mod html;
pub mod labels;
pub mod normalize;

use tracing::debug;

use crate::config::ExtractorConfig;
use crate::error::ArgumentError;
pub use extract::Extraction;

/// Markup stripping (if enabled) followed by line-break normalization.
pub fn normalize_content<S: AsRef<str>>(
    content: &str,
    labels: &[S],
    config: &ExtractorConfig,
) -> String {
    if config.de_entitize_content {
        normalize::normalize(&html::visible_text(content), labels)
    } else {
        normalize::normalize(content, labels)
    }
}

/// Three-step pipeline: validate → normalize → scan lines.
pub fn extract_fields<S: AsRef<str>>(
    content: &str,
    labels: &[S],
    config: &ExtractorConfig,
) -> Result<Extraction, ArgumentError> {
    if let Err(e) = validate(content, labels) {
        debug!(error = %e, "rejected extraction input");
        return Err(e);
    }

    let normalized = normalize_content(content, labels, config);
    let fields = extract::extract_lines(&normalized, labels);
    debug!(
        labels = labels.len(),
        found = fields.len(),
        "extracted fields"
    );
    Ok(fields)
}

fn validate<S: AsRef<str>>(content: &str, labels: &[S]) -> Result<(), ArgumentError> {
    if content.trim().is_empty() {
        return Err(ArgumentError::EmptyContent);
    }
    labels::validate(labels)
}

// ── Tests ──
