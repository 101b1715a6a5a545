//! Structured document model: blocks of paragraphs and tables, paragraphs of
//! formatted runs.

use serde::{Deserialize, Serialize};

/// Character formatting of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunFormat {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    /// Size in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// RGB hex color such as `"1F4E79"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RunFormat {
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn with_font<S: Into<String>>(mut self, name: S, size: f32) -> Self {
        self.font_name = Some(name.into());
        self.font_size = Some(size);
        self
    }

    pub fn with_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A span of text sharing one format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub format: RunFormat,
}

impl Run {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Run {
            text: text.into(),
            format: RunFormat::default(),
        }
    }

    pub fn with_format(mut self, format: RunFormat) -> Self {
        self.format = format;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Paragraph { runs }
    }

    /// A paragraph holding one unformatted run.
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Paragraph {
            runs: vec![Run::new(text)],
        }
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }

    /// Replace the paragraph text with a single run carrying the first run's
    /// formatting. Formatting of later runs is lost.
    pub fn replace_text<S: Into<String>>(&mut self, text: S) {
        let format = self
            .runs
            .first()
            .map(|run| run.format.clone())
            .unwrap_or_default();
        self.runs = vec![Run {
            text: text.into(),
            format,
        }];
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Document { blocks }
    }

    /// A document of plain paragraphs.
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Document {
            blocks: paragraphs
                .into_iter()
                .map(|text| Block::Paragraph(Paragraph::from_text(text)))
                .collect(),
        }
    }

    /// Every paragraph in reading order, table cells included.
    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        let mut paragraphs = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(paragraph) => paragraphs.push(paragraph),
                Block::Table(table) => {
                    for cell in table.rows.iter().flatten() {
                        paragraphs.extend(cell.paragraphs.iter());
                    }
                }
            }
        }
        paragraphs
    }

    /// Mutable counterpart of [`Document::paragraphs`].
    pub fn paragraphs_mut(&mut self) -> Vec<&mut Paragraph> {
        let mut paragraphs = Vec::new();
        for block in &mut self.blocks {
            match block {
                Block::Paragraph(paragraph) => paragraphs.push(paragraph),
                Block::Table(table) => {
                    for cell in table.rows.iter_mut().flatten() {
                        paragraphs.extend(cell.paragraphs.iter_mut());
                    }
                }
            }
        }
        paragraphs
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(vec![
            Block::Paragraph(Paragraph::new(vec![
                Run::new("Bold start ").with_format(RunFormat::default().bold()),
                Run::new("plain end."),
            ])),
            Block::Table(Table {
                rows: vec![vec![
                    Cell {
                        paragraphs: vec![Paragraph::from_text("Cell one.")],
                    },
                    Cell {
                        paragraphs: vec![Paragraph::from_text(""), Paragraph::from_text("Cell two.")],
                    },
                ]],
            }),
        ])
    }

    #[test]
    fn test_paragraph_walk_includes_tables() {
        let document = sample();
        let texts: Vec<String> = document.paragraphs().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["Bold start plain end.", "Cell one.", "", "Cell two."]);
        assert_eq!(document.paragraph_count(), 4);
    }

    #[test]
    fn test_replace_text_takes_first_run_format() {
        let mut document = sample();
        let mut paragraphs = document.paragraphs_mut();
        paragraphs[0].replace_text("All bold now.");

        assert_eq!(paragraphs[0].runs.len(), 1);
        assert!(paragraphs[0].runs[0].format.bold);
        assert_eq!(paragraphs[0].text(), "All bold now.");
        assert!(paragraphs[2].is_blank());
    }

    #[test]
    fn test_json_shape() {
        let document = Document::new(vec![Block::Paragraph(Paragraph::from_text("Hi."))]);
        let json = serde_json::to_string(&document).unwrap();
        assert_eq!(
            json,
            r#"{"blocks":[{"type":"paragraph","runs":[{"text":"Hi.","format":{}}]}]}"#
        );

        let parsed: Document = serde_json::from_str(
            r#"{"blocks":[{"type":"paragraph","runs":[{"text":"Hi.","format":{"italic":true,"font_size":11.0}}]}]}"#,
        )
        .unwrap();
        let run = &parsed.paragraphs()[0].runs[0];
        assert!(run.format.italic);
        assert_eq!(run.format.font_size, Some(11.0));
    }
}
