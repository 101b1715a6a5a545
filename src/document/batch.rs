//! Sequential batches with per-unit failure isolation.
//!
//! A unit that fails keeps its original content and is recorded as failed;
//! the batch goes on with the next unit. Only fatal errors (bad configuration)
//! end a batch early.

use std::path::{Path, PathBuf};

use glob::{GlobError, Pattern};

use log::{info, warn};
use serde::Serialize;

use crate::document::processor::{DocumentProcessor, DocumentReport, ProgressSink, is_edited_path};
use crate::document::rewriter::TextRewriter;
use crate::error::{RephraseError, Result};

/// Result for one unit of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UnitResult {
    Succeeded { index: usize, output: String },
    Failed { index: usize, original: String, error: String },
}

impl UnitResult {
    pub fn index(&self) -> usize {
        match self {
            UnitResult::Succeeded { index, .. } | UnitResult::Failed { index, .. } => *index,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UnitResult::Succeeded { .. })
    }

    /// The rewritten text, or the original for a failed unit.
    pub fn text(&self) -> &str {
        match self {
            UnitResult::Succeeded { output, .. } => output,
            UnitResult::Failed { original, .. } => original,
        }
    }
}

/// Per-unit results of a text batch, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub units: Vec<UnitResult>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.units.iter().filter(|u| u.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.units.len() - self.succeeded()
    }

    /// One text per unit: rewritten where possible, original otherwise.
    pub fn texts(&self) -> Vec<&str> {
        self.units.iter().map(UnitResult::text).collect()
    }

    fn record(
        &mut self,
        index: usize,
        original: &str,
        result: Result<String>,
        sink: &dyn ProgressSink,
    ) -> Result<()> {
        match result {
            Ok(output) => self.units.push(UnitResult::Succeeded { index, output }),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                sink.unit_failed(index, &e);
                self.units.push(UnitResult::Failed {
                    index,
                    original: original.to_string(),
                    error: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Rewrite each unit with `rewriter`, isolating failures.
pub async fn transform_units<S: AsRef<str>>(
    rewriter: &dyn TextRewriter,
    units: &[S],
    sink: &dyn ProgressSink,
) -> Result<BatchReport> {
    let total = units.len();
    let mut report = BatchReport::default();

    for (i, unit) in units.iter().enumerate() {
        let unit = unit.as_ref();
        let result = rewriter.rewrite(unit).await;
        report.record(i, unit, result, sink)?;
        sink.progress(i + 1, total, &format!("Processed unit {}/{total}", i + 1));
    }

    Ok(report)
}

/// Synchronous counterpart of [`transform_units`] over a closure.
pub fn transform_units_with<S, F>(
    units: &[S],
    sink: &dyn ProgressSink,
    mut transform: F,
) -> Result<BatchReport>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Result<String>,
{
    let total = units.len();
    let mut report = BatchReport::default();

    for (i, unit) in units.iter().enumerate() {
        let unit = unit.as_ref();
        report.record(i, unit, transform(unit), sink)?;
        sink.progress(i + 1, total, &format!("Processed unit {}/{total}", i + 1));
    }

    Ok(report)
}

/// A file that could not be processed.
#[derive(Clone, Debug, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of processing a directory.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DirectoryReport {
    /// Matching files found (outputs of earlier runs excluded).
    pub total: usize,
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<FileFailure>,
}

impl DirectoryReport {
    pub fn processed(&self) -> usize {
        self.documents.len()
    }
}

/// Files in `dir` matching the glob `pattern`, sorted, without `*_edited.*` outputs.
///
/// The pattern is relative to `dir` and supports `*`, `?`, `[...]` classes
/// and `**`. An invalid pattern is a configuration error.
pub fn matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RephraseError::document_format(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }
    let dir_str = dir.to_str().ok_or_else(|| {
        RephraseError::configuration(format!("Directory path is not UTF-8: {}", dir.display()))
    })?;
    let full = Path::new(&Pattern::escape(dir_str)).join(pattern);

    let entries = glob::glob(&full.to_string_lossy()).map_err(|e| {
        RephraseError::configuration(format!("Invalid file pattern '{pattern}': {e}"))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(GlobError::into_error)?;
        if path.is_file() && !is_edited_path(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Process every matching document in `dir`, one at a time.
pub async fn process_directory(
    processor: &DocumentProcessor,
    dir: &Path,
    pattern: &str,
    sink: &dyn ProgressSink,
) -> Result<DirectoryReport> {
    let files = matching_files(dir, pattern)?;
    let total = files.len();
    info!("Found {total} file(s) matching '{pattern}' in {}", dir.display());

    let mut report = DirectoryReport {
        total,
        ..Default::default()
    };

    for (i, path) in files.into_iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        sink.progress(i, total, &format!("Processing {name}"));

        match processor.process(&path, sink).await {
            Ok(document) => report.documents.push(document),
            Err(e @ RephraseError::Configuration(_)) => return Err(e),
            Err(e) => {
                warn!("Failed to process {}: {e}", path.display());
                sink.unit_failed(i, &e);
                report.failures.push(FileFailure {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    sink.progress(
        total,
        total,
        &format!("Processed {}/{total} file(s)", report.processed()),
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::processor::NoProgress;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Reverse;

    #[async_trait]
    impl TextRewriter for Reverse {
        async fn rewrite(&self, text: &str) -> Result<String> {
            if text.is_empty() {
                return Err(RephraseError::analysis("nothing to analyze"));
            }
            Ok(text.chars().rev().collect())
        }

        fn name(&self) -> &'static str {
            "reverse"
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ProgressSink for Recorder {
        fn progress(&self, current: usize, total: usize, message: &str) {
            self.events.lock().push(format!("{current}/{total} {message}"));
        }

        fn unit_failed(&self, index: usize, error: &RephraseError) {
            self.events.lock().push(format!("failed {index}: {error}"));
        }
    }

    #[tokio::test]
    async fn test_failed_unit_is_isolated() {
        let sink = Recorder::default();
        let report = transform_units(&Reverse, &["abc", "", "xyz"], &sink).await.unwrap();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.texts(), vec!["cba", "", "zyx"]);
        assert!(matches!(report.units[1], UnitResult::Failed { index: 1, .. }));

        let events = sink.events.lock();
        assert_eq!(events.len(), 4);
        assert!(events[1].starts_with("failed 1: Analysis error"));
        assert_eq!(events[3], "3/3 Processed unit 3/3");
    }

    #[test]
    fn test_fatal_error_ends_batch() {
        let mut calls = 0;
        let result = transform_units_with(&["a", "b", "c"], &NoProgress, |text| {
            calls += 1;
            if text == "b" {
                Err(RephraseError::configuration("unknown synonym list"))
            } else {
                Ok(text.to_string())
            }
        });
        assert!(matches!(result, Err(RephraseError::Configuration(_))));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_process_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "First.\n\nSecond.\n").unwrap();
        fs::write(dir.path().join("b.txt"), "Third.\n").unwrap();
        fs::write(dir.path().join("old_edited.txt"), "Skip me.\n").unwrap();
        fs::write(dir.path().join("c.json"), "{ broken").unwrap();
        fs::write(dir.path().join("notes.md"), "Notes.\n").unwrap();

        let processor = DocumentProcessor::new(Arc::new(Reverse));
        let report = process_directory(&processor, dir.path(), "*.*", &NoProgress)
            .await
            .unwrap();

        // a.txt, b.txt, c.json and notes.md match; old_edited.txt is skipped.
        assert_eq!(report.total, 4);
        assert_eq!(report.processed(), 3);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("c.json"));
        assert_eq!(
            fs::read_to_string(dir.path().join("a_edited.txt")).unwrap(),
            ".tsriF\n\n.dnoceS\n"
        );
        assert!(!dir.path().join("old_edited_edited.txt").exists());
    }

    #[tokio::test]
    async fn test_process_directory_requires_directory() {
        let processor = DocumentProcessor::new(Arc::new(Reverse));
        let result =
            process_directory(&processor, Path::new("/nonexistent/dir"), "*.txt", &NoProgress)
                .await;
        assert!(matches!(result, Err(RephraseError::DocumentFormat(_))));
    }

    #[test]
    fn test_matching_files_character_classes() {
        let dir = TempDir::new().unwrap();
        for name in ["a.json", "b.tson", "c.txt", "d_edited.json"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.json")).unwrap();

        let files = matching_files(dir.path(), "*.[jt]son").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.tson"]);

        let names = matching_files(dir.path(), "?.txt").unwrap();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_matching_files_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let result = matching_files(dir.path(), "[unclosed");
        assert!(matches!(result, Err(RephraseError::Configuration(_))));
    }
}
