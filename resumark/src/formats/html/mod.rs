//! HTML format implementation
//!
//! HTML is both an input and an output. As input it is the converter's native
//! language: `parse` hands the source straight to [`crate::convert::parse_html`]. As
//! output it is the printable page the PDF exporter feeds to a headless browser.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `rcdom` + `markup5ever` ecosystem for HTML parsing and serialization:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//! - `markup5ever`: Serialization infrastructure
//!
//! Parsing and serializing with the same tree types keeps the two directions honest, and
//! html5ever recovers from malformed markup the way a browser does.
//!
//! # Block Mapping Table
//!
//! | Block            | HTML                                               |
//! |------------------|----------------------------------------------------|
//! | Heading          | `<hN class="rm-hN">`                               |
//! | Paragraph        | `<p class="rm-p">`, `text-align` when not left     |
//! | ListItem         | `<div class="rm-li">` + `<span class="rm-marker">` |
//! | Quote            | `<blockquote class="rm-quote">`                    |
//! | CodeBlock        | `<pre class="rm-pre"><code>`                       |
//! | InlineCode       | `<p class="rm-code">`                              |
//! | Table            | `<table class="rm-table">` with `th`/`td`          |
//! | ImagePlaceholder | `<p class="rm-img">[Image: alt]</p>`               |
//! | Rule             | `<p class="rm-rule"><br></p>`                      |
//!
//! Lists are emitted flat, one element per item, with the marker computed while
//! walking the blocks. That keeps the page identical to the DOCX, where list items
//! are plain paragraphs too.
//!
//! # Options
//!
//! - `page-size`: `a4` (default) or `letter`
//! - `css-path`: a stylesheet appended after the generated one
//!
//! Other options are ignored so a single option set can be shared across formats.

mod serializer;

pub use serializer::{serialize_to_html, serialize_to_html_with_options, HtmlOptions};

use crate::convert::parse_html;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::page_size_option;
use crate::ir::Document;
use std::collections::HashMap;
use std::fs;

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Merge per-call options over the format's own.
    pub fn options_from(&self, options: &HashMap<String, String>) -> Result<HtmlOptions, FormatError> {
        let mut resolved = self.options.clone();
        if options.contains_key("page-size") {
            resolved.page = page_size_option(options)?;
        }
        if let Some(path) = options.get("css-path") {
            let css = fs::read_to_string(path).map_err(|err| {
                FormatError::SerializationError(format!("Failed to read CSS file '{path}': {err}"))
            })?;
            resolved.custom_css = Some(css);
        }
        Ok(resolved)
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 page with embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_html(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html_with_options(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let options = self.options_from(options)?;
        serialize_to_html_with_options(doc, &options).map(SerializedDocument::Text)
    }
}
