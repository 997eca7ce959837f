use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use label_scraper::{Extraction, LabelExtractor};

/// Outcome for one input file, printed as a JSON line.
#[derive(Debug, Serialize)]
pub struct FileResult {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Extraction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct BatchStats {
    pub total: usize,
    pub ok: usize,
    pub empty: usize,
    pub errors: usize,
}

impl BatchStats {
    fn from_results(results: &[FileResult]) -> Self {
        let errors = results.iter().filter(|r| r.error.is_some()).count();
        let empty = results
            .iter()
            .filter(|r| r.fields.as_ref().is_some_and(Extraction::is_empty))
            .count();
        BatchStats {
            total: results.len(),
            ok: results.len() - errors - empty,
            empty,
            errors,
        }
    }
}

/// Regular files directly inside `dir`, sorted by name, optionally filtered by
/// extension (case-insensitive, without the dot).
pub fn collect_files(dir: &Path, ext: Option<&str>, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = match ext {
            Some(want) => path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(want.trim_start_matches('.'))),
            None => true,
        };
        if matches {
            files.push(path);
        }
    }

    files.sort();
    if let Some(n) = limit {
        files.truncate(n);
    }
    Ok(files)
}

/// Extract every file in parallel. Failures are recorded per file and do not
/// stop the batch.
pub fn extract_files(
    extractor: &LabelExtractor,
    files: &[PathBuf],
    labels: &[String],
) -> Result<(Vec<FileResult>, BatchStats)> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let results: Vec<FileResult> = files
        .par_iter()
        .map(|file| {
            let result = extract_file(extractor, file, labels);
            pb.inc(1);
            result
        })
        .collect();

    pb.finish_and_clear();

    let stats = BatchStats::from_results(&results);
    info!(
        "Extracted {} files ({} ok, {} without fields, {} errors)",
        stats.total, stats.ok, stats.empty, stats.errors
    );
    Ok((results, stats))
}

fn extract_file(extractor: &LabelExtractor, file: &Path, labels: &[String]) -> FileResult {
    let outcome = std::fs::read_to_string(file)
        .map_err(anyhow::Error::from)
        .and_then(|content| extractor.get(&content, labels).map_err(anyhow::Error::from));

    match outcome {
        Ok(fields) => FileResult {
            file: file.to_path_buf(),
            fields: Some(fields),
            error: None,
        },
        Err(e) => {
            warn!("Extraction failed for {}: {}", file.display(), e);
            FileResult {
                file: file.to_path_buf(),
                fields: None,
                error: Some(e.to_string()),
            }
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["First Name:".to_string(), "Last Name:".to_string()]
    }

    #[test]
    fn collects_and_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.html"), "x").unwrap();
        std::fs::write(dir.path().join("a.HTML"), "x").unwrap();
        std::fs::write(dir.path().join("c.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("sub.html")).unwrap();

        let all = collect_files(dir.path(), None, None).unwrap();
        assert_eq!(all.len(), 3);

        let html = collect_files(dir.path(), Some(".html"), None).unwrap();
        let names: Vec<_> = html
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.HTML", "b.html"]);

        let limited = collect_files(dir.path(), None, Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn missing_dir_is_an_error() {
        assert!(collect_files(Path::new("/nonexistent/label_scraper"), None, None).is_err());
    }

    #[test]
    fn per_file_failures_do_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1.txt"), "First Name: Ada Last Name: Lovelace").unwrap();
        std::fs::write(dir.path().join("2.txt"), "   ").unwrap();
        std::fs::write(dir.path().join("3.txt"), "no fields here").unwrap();

        let files = collect_files(dir.path(), Some("txt"), None).unwrap();
        let (results, stats) = extract_files(&LabelExtractor::default(), &files, &labels()).unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.ok, 1);
        assert_eq!(stats.empty, 1);
        assert_eq!(stats.errors, 1);

        let first = results[0].fields.as_ref().unwrap();
        assert_eq!(first.get("Last Name:"), Some("Lovelace"));
        assert!(results[1].error.as_deref().unwrap().contains("empty"));
    }

    #[test]
    fn result_serializes_as_json_line() {
        let result = FileResult {
            file: PathBuf::from("a.txt"),
            fields: None,
            error: Some("boom".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"file":"a.txt","error":"boom"}"#
        );
    }
}
