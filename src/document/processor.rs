//! Paragraph-by-paragraph document rewriting.
//!
//! Each non-empty paragraph (table cells included) is rewritten on its own. A
//! paragraph whose rewrite fails keeps its original text and the failure is
//! reported to the [`ProgressSink`]; only fatal errors stop the document. The
//! result goes to `<stem>_edited<ext>` next to the input, written to a
//! temporary file first so a failed run never leaves a partial output behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use crate::document::codec::codec_for_path;
use crate::document::rewriter::TextRewriter;
use crate::error::{RephraseError, Result};

/// Suffix appended to the stem of output files.
pub const EDITED_SUFFIX: &str = "_edited";

/// Receives progress and per-unit failures.
pub trait ProgressSink: Send + Sync {
    /// `current` of `total` units are done.
    fn progress(&self, current: usize, total: usize, message: &str);

    /// Unit `index` failed and kept its original content.
    fn unit_failed(&self, _index: usize, _error: &RephraseError) {}
}

/// Discards all progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&self, _current: usize, _total: usize, _message: &str) {}
}

/// Forwards progress to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn progress(&self, current: usize, total: usize, message: &str) {
        info!("[{current}/{total}] {message}");
    }

    fn unit_failed(&self, index: usize, error: &RephraseError) {
        warn!("Unit {} kept unchanged: {error}", index + 1);
    }
}

/// A unit that could not be rewritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnitFailure {
    pub index: usize,
    pub error: String,
}

/// Outcome of processing one document.
#[derive(Clone, Debug, Serialize)]
pub struct DocumentReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Paragraphs in the document, empty ones included.
    pub paragraphs: usize,
    pub rewritten: usize,
    pub skipped: usize,
    pub failures: Vec<UnitFailure>,
}

/// `dir/report.json` → `dir/report_edited.json`.
pub fn edited_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{EDITED_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{EDITED_SUFFIX}"),
    };
    input.with_file_name(file_name)
}

/// Whether a path is itself an output of [`edited_path`].
pub fn is_edited_path(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with(EDITED_SUFFIX))
}

/// Write `content` to `path` via a sibling temporary file and a rename.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    if let Err(e) = fs::write(&temp, content).and_then(|_| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(e.into());
    }
    Ok(())
}

/// Rewrites documents paragraph by paragraph.
#[derive(Clone)]
pub struct DocumentProcessor {
    rewriter: Arc<dyn TextRewriter>,
}

impl DocumentProcessor {
    pub fn new(rewriter: Arc<dyn TextRewriter>) -> Self {
        DocumentProcessor { rewriter }
    }

    pub fn rewriter(&self) -> &Arc<dyn TextRewriter> {
        &self.rewriter
    }

    /// Rewrite `input` and write the result next to it.
    pub async fn process(&self, input: &Path, sink: &dyn ProgressSink) -> Result<DocumentReport> {
        if !input.is_file() {
            return Err(RephraseError::document_format(format!(
                "File not found: {}",
                input.display()
            )));
        }
        let codec = codec_for_path(input)?;
        let mut document = codec.read(input)?;
        info!(
            "Processing {} with the {} rewriter ({} codec)",
            input.display(),
            self.rewriter.name(),
            codec.name()
        );

        let mut paragraphs = document.paragraphs_mut();
        let total = paragraphs.len();
        let mut rewritten = 0;
        let mut skipped = 0;
        let mut failures = Vec::new();

        for (i, paragraph) in paragraphs.iter_mut().enumerate() {
            if paragraph.is_blank() {
                skipped += 1;
                sink.progress(i + 1, total, "Skipped empty paragraph");
                continue;
            }

            let text = paragraph.text();
            match self.rewriter.rewrite(&text).await {
                Ok(new_text) => {
                    debug!("Paragraph {}: {} → {} bytes", i + 1, text.len(), new_text.len());
                    paragraph.replace_text(new_text);
                    rewritten += 1;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    sink.unit_failed(i, &e);
                    failures.push(UnitFailure {
                        index: i,
                        error: e.to_string(),
                    });
                }
            }
            sink.progress(i + 1, total, &format!("Processed paragraph {}/{total}", i + 1));
        }

        let output = edited_path(input);
        write_atomically(&output, &codec.encode(&document)?)?;
        info!(
            "Wrote {} ({rewritten} rewritten, {} failed)",
            output.display(),
            failures.len()
        );

        Ok(DocumentReport {
            input: input.to_path_buf(),
            output,
            paragraphs: total,
            rewritten,
            skipped,
            failures,
        })
    }
}
