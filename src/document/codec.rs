//! Document containers.
//!
//! A codec turns file content into a [`Document`] and back. The codec for a
//! path is chosen by its extension:
//!
//! - `.json`: the serde form of the document model, formatting included;
//! - `.txt` / `.md`: plain text, paragraphs separated by blank lines.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::model::{Block, Document};
use crate::error::{RephraseError, Result};

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("blank-line pattern is valid"));

/// Reads and writes one document container format.
pub trait DocumentCodec: Send + Sync {
    /// Parse file content.
    fn decode(&self, content: &str) -> Result<Document>;

    /// Serialize a document.
    fn encode(&self, document: &Document) -> Result<String>;

    /// Lowercase file extensions handled, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Get the name of this codec.
    fn name(&self) -> &'static str;

    /// Read a document from disk.
    fn read(&self, path: &Path) -> Result<Document> {
        if !path.is_file() {
            return Err(RephraseError::document_format(format!(
                "File not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        self.decode(&content)
    }
}

/// The JSON form of the document model.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonDocumentCodec;

impl DocumentCodec for JsonDocumentCodec {
    fn decode(&self, content: &str) -> Result<Document> {
        serde_json::from_str(content)
            .map_err(|e| RephraseError::document_format(format!("Not a JSON document: {e}")))
    }

    fn encode(&self, document: &Document) -> Result<String> {
        Ok(serde_json::to_string_pretty(document)?)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Plain text: one paragraph per blank-line separated block, no formatting.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextCodec;

impl DocumentCodec for PlainTextCodec {
    fn decode(&self, content: &str) -> Result<Document> {
        let content = content.replace("\r\n", "\n");
        Ok(Document::from_paragraphs(
            BLANK_LINE
                .split(content.trim_matches('\n'))
                .filter(|paragraph| !paragraph.trim().is_empty()),
        ))
    }

    fn encode(&self, document: &Document) -> Result<String> {
        let mut paragraphs = Vec::with_capacity(document.blocks.len());
        for block in &document.blocks {
            match block {
                Block::Paragraph(paragraph) => paragraphs.push(paragraph.text()),
                Block::Table(table) => {
                    // Cells become tab-separated lines.
                    for row in &table.rows {
                        let cells: Vec<String> = row
                            .iter()
                            .map(|cell| {
                                cell.paragraphs
                                    .iter()
                                    .map(|p| p.text())
                                    .collect::<Vec<_>>()
                                    .join(" ")
                            })
                            .collect();
                        paragraphs.push(cells.join("\t"));
                    }
                }
            }
        }
        let mut text = paragraphs.join("\n\n");
        text.push('\n');
        Ok(text)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt", "md"]
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

/// Pick the codec for a path by extension.
pub fn codec_for_path(path: &Path) -> Result<Box<dyn DocumentCodec>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let codecs: [Box<dyn DocumentCodec>; 2] = [Box::new(JsonDocumentCodec), Box::new(PlainTextCodec)];
    codecs
        .into_iter()
        .find(|codec| codec.extensions().contains(&extension.as_str()))
        .ok_or_else(|| {
            RephraseError::document_format(format!(
                "Unsupported document type: {}",
                path.display()
            ))
        })
}
