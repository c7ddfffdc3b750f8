//! Core data structures of the block model.
//!
//! Every block and run carries its resolved style, so consumers never call back into
//! the style resolver.

use crate::style::{ParagraphStyle, RunStyle};
use serde::Serialize;

/// An ordered sequence of blocks produced from one input document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// One-line-per-block text tree, as printed by the `treeviz` format.
    pub fn outline(&self) -> String {
        crate::formats::treeviz::to_treeviz_str(self)
    }
}

/// One structural unit of output content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    ListItem(ListItem),
    Quote(Quote),
    CodeBlock(CodeBlock),
    InlineCode(InlineCode),
    Table(Table),
    ImagePlaceholder(ImagePlaceholder),
    /// Vertical spacer produced by `hr` and `br`.
    Rule(Rule),
}

/// A heading, level 1 to 6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub runs: Vec<StyledRun>,
    /// Run style of unformatted text in the block.
    pub base: RunStyle,
    pub style: ParagraphStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub runs: Vec<StyledRun>,
    pub alignment: Alignment,
    pub base: RunStyle,
    pub style: ParagraphStyle,
}

/// One `<li>`, flattened out of its list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub runs: Vec<StyledRun>,
    pub ordered: bool,
    /// Number of list containers strictly between the item and the outermost list.
    pub depth: usize,
    /// Ordinal of the outermost list in the document; numbering restarts per list.
    pub list: usize,
    /// Personal-info list: no marker and no indentation.
    pub flat: bool,
    pub base: RunStyle,
    pub style: ParagraphStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub runs: Vec<StyledRun>,
    pub base: RunStyle,
    pub style: ParagraphStyle,
}

/// Preformatted text, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub text: String,
    pub language: Option<String>,
    pub run: RunStyle,
    pub style: ParagraphStyle,
}

/// `<code>` found outside a `<pre>` at block level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineCode {
    pub runs: Vec<StyledRun>,
    pub base: RunStyle,
    pub style: ParagraphStyle,
}

/// A table with at least one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Widest row, used to lay out the grid.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }
}

/// A row with at least one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub runs: Vec<StyledRun>,
    pub is_header: bool,
    pub alignment: Alignment,
    pub base: RunStyle,
    pub style: ParagraphStyle,
}

/// Stand-in for an image; images are never embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlaceholder {
    pub alt_text: String,
    pub run: RunStyle,
    pub style: ParagraphStyle,
}

impl ImagePlaceholder {
    /// Text shown in place of the image.
    pub fn label(&self) -> String {
        format!("[Image: {}]", self.alt_text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub style: ParagraphStyle,
}

/// Horizontal alignment of a paragraph or cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parse an `align` attribute or `text-align` value. Unknown values are `Left`.
    pub fn from_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "right" => Alignment::Right,
            "center" => Alignment::Center,
            "justify" => Alignment::Justify,
            _ => Alignment::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

/// An immutable span of text with resolved formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
    /// Hard line break in place of text.
    pub line_break: bool,
    pub link: Option<String>,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
            line_break: false,
            link: None,
        }
    }

    pub fn line_break(style: RunStyle) -> Self {
        Self {
            text: String::new(),
            style,
            line_break: true,
            link: None,
        }
    }

    /// A copy pointing at `target`.
    pub fn with_link(self, target: impl Into<String>) -> Self {
        Self {
            link: Some(target.into()),
            ..self
        }
    }

    /// A copy with its text replaced.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }
}

/// Concatenated text of a run sequence, line breaks as `\n`.
pub fn plain_text(runs: &[StyledRun]) -> String {
    runs.iter()
        .map(|run| if run.line_break { "\n" } else { run.text.as_str() })
        .collect()
}
