//! Engine and CLI configuration.
//!
//! [`ExtractorConfig`] is what the library needs. [`Settings`] is the layered
//! view the binary loads: built-in defaults, then an optional TOML file, then
//! `LABEL_SCRAPER_*` environment variables.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_SETTINGS: &str = r#"
de_entitize_content = true
labels = []
"#;

const ENV_PREFIX: &str = "LABEL_SCRAPER";

/// Immutable, construction-time options of [`crate::LabelExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExtractorConfig {
    /// Strip HTML tags and decode entities before normalizing.
    #[serde(default = "default_de_entitize_content")]
    pub de_entitize_content: bool,
}

fn default_de_entitize_content() -> bool {
    true
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            de_entitize_content: default_de_entitize_content(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_de_entitize_content")]
    pub de_entitize_content: bool,
    /// Labels used when none are given on the command line.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Settings {
    /// Defaults, then `path` (if given), then the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(path, None)
    }

    /// Like [`load`](Self::load), but reads `LABEL_SCRAPER_*` variables from
    /// `env` instead of the process environment when given.
    pub fn load_from(path: Option<&Path>, env: Option<config::Map<String, String>>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("labels")
                    .source(env),
            )
            .build()
            .with_context(|| match path {
                Some(p) => format!("loading settings from {}", p.display()),
                None => "loading settings".to_string(),
            })?
            .try_deserialize()
            .context("invalid settings")
    }

    /// Built-in defaults without touching the filesystem or environment.
    pub fn defaults() -> Self {
        Settings {
            de_entitize_content: default_de_entitize_content(),
            labels: Vec::new(),
        }
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            de_entitize_content: self.de_entitize_content,
        }
    }
}

/// Read labels from a file: one per line, blank lines and `#` comments skipped.
///
/// Lines are kept verbatim apart from the line ending, since trailing spaces
/// can be part of a label.
pub fn read_labels_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading labels from {}", path.display()))?;
    Ok(parse_labels(&text))
}

fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .map(str::to_string)
        .collect()
}

// ── Tests ──
