//! DOCX export
//!
//! Writes a minimal WordprocessingML package by hand: the block model already carries
//! every resolved style value, so the writer is a direct mapping from blocks to
//! paragraphs, runs and tables with no layout decisions of its own.
//!
//! # Package Layout
//!
//! | Part                           | Content                                        |
//! |--------------------------------|------------------------------------------------|
//! | `[Content_Types].xml`          | part content types                             |
//! | `_rels/.rels`                  | points at the main document                    |
//! | `word/document.xml`            | body paragraphs and tables, section geometry   |
//! | `word/styles.xml`              | document defaults, outline heading styles      |
//! | `word/numbering.xml`           | bullet and decimal lists, nine levels each     |
//! | `word/_rels/document.xml.rels` | styles, numbering and hyperlink targets        |
//!
//! # Library Choice
//!
//! `zip` writes the package and `quick-xml` escapes text and attribute values. The
//! XML itself is assembled as strings: the vocabulary is small and fixed.
//!
//! # Options
//!
//! - `page-size`: `a4` (default) or `letter`

mod document;
mod parts;

pub use document::{write_document, DocumentPart, ListInstance};

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::page_size_option;
use crate::ir::Document;
use crate::style::{PageSetup, PageSize};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Format implementation for DOCX packages
#[derive(Debug, Clone, Default)]
pub struct DocxFormat {
    page: PageSize,
}

impl DocxFormat {
    pub fn new(page: PageSize) -> Self {
        Self { page }
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word document package"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "DOCX serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let page = if options.contains_key("page-size") {
            page_size_option(options)?
        } else {
            self.page
        };
        write_package(doc, &page.setup()).map(SerializedDocument::Binary)
    }
}

/// Serialize `doc` into a complete `.docx` package.
pub fn write_package(doc: &Document, page: &PageSetup) -> Result<Vec<u8>, FormatError> {
    let part = write_document(doc, page);
    log::debug!(
        "docx body: {} bytes, {} hyperlinks, {} lists",
        part.xml.len(),
        part.hyperlinks.len(),
        part.lists.len()
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let entries = [
        ("[Content_Types].xml", parts::CONTENT_TYPES.to_string()),
        ("_rels/.rels", parts::PACKAGE_RELATIONSHIPS.to_string()),
        ("word/document.xml", part.xml),
        ("word/styles.xml", parts::styles()),
        ("word/numbering.xml", parts::numbering(&part.lists)),
        (
            "word/_rels/document.xml.rels",
            parts::document_relationships(&part.hyperlinks),
        ),
    ];
    for (name, content) in entries {
        zip.start_file(name, deflated)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}
