//! Format registry for format discovery and selection
//!
//! The CLI and the publishing pipeline look formats up here by name or by file
//! extension.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::Document;
use std::collections::HashMap;

/// Registry of document formats
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let doc = registry.parse("# Jane Doe", "markdown")?;
/// let html = registry.serialize(&doc, "html")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format of the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect a format from a file name's extension, ignoring case.
    ///
    /// Parsing formats win when several formats claim the same extension.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        let mut candidates: Vec<&dyn Format> = self
            .formats
            .values()
            .map(|f| f.as_ref())
            .filter(|f| f.file_extensions().contains(&extension.as_str()))
            .collect();
        candidates.sort_by_key(|f| (!f.supports_parsing(), f.name().to_string()));
        candidates.first().map(|f| f.name().to_string())
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a document using the specified text format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let empty = HashMap::new();
        match self.serialize_with_options(doc, format, &empty)? {
            SerializedDocument::Text(text) => Ok(text),
            SerializedDocument::Binary(_) => Err(FormatError::SerializationError(format!(
                "Format '{format}' produced binary output when text was expected"
            ))),
        }
    }

    /// Serialize a document using the specified format and options
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        log::debug!("serializing {} blocks as {format}", doc.blocks.len());
        fmt.serialize_with_options(doc, options)
    }

    /// Create a registry with the built-in formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markdown::MarkdownFormat::default());
        registry.register(crate::formats::html::HtmlFormat::default());
        registry.register(crate::formats::docx::DocxFormat::default());
        #[cfg(feature = "native-export")]
        registry.register(crate::formats::pdf::PdfFormat::default());
        registry.register(crate::formats::json::JsonFormat);
        registry.register(crate::formats::treeviz::TreevizFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
