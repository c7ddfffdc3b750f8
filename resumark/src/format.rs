//! Format trait definition
//!
//! Every input and output the crate understands is a [`Format`]. Input formats turn
//! source text into the block model; output formats turn the block model into text or
//! bytes. The registry and the publishing pipeline only ever talk to this trait.

use crate::error::FormatError;
use crate::ir::Document;
use std::collections::HashMap;

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug)]
pub enum SerializedDocument {
    /// UTF-8 text output (HTML, JSON, treeviz)
    Text(String),
    /// Binary output (DOCX, PDF)
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }
}

/// Trait for document formats
///
/// Formats can support parsing, serialization, or both. The defaults reject both
/// directions, so a format only overrides what it implements.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "docx")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extensions without the leading dot, used to detect formats from file names.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    /// Whether [`Format::serialize_with_options`] yields bytes rather than text.
    fn is_binary(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into text
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// Text formats without options can rely on this default, which delegates to
    /// [`Format::serialize`]. Binary formats override it to return
    /// [`SerializedDocument::Binary`].
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if options.is_empty() {
            self.serialize(doc).map(SerializedDocument::Text)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
