//! JSON dump of the block model
//!
//! Every block carries its resolved styles, so the dump shows exactly what the DOCX
//! writer and the HTML serializer will receive. Blocks are tagged with a `kind` field.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::Document;
use std::collections::HashMap;

/// Pretty-printed JSON of `doc`, ending in a newline.
pub fn to_json_str(doc: &Document) -> Result<String, FormatError> {
    serde_json::to_string_pretty(doc)
        .map(|json| json + "\n")
        .map_err(|err| FormatError::SerializationError(format!("JSON encoding failed: {err}")))
}

/// Format implementation for the JSON dump
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Block model with resolved styles as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        to_json_str(doc)
    }

    /// The dump has no options; shared ones (page size, Chrome) are ignored.
    fn serialize_with_options(
        &self,
        doc: &Document,
        _options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        to_json_str(doc).map(SerializedDocument::Text)
    }
}
