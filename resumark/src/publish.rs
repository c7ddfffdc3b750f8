//! Document publishing pipeline.
//!
//! Bridges the format registry and file I/O: one call serializes a document and either
//! returns the text or writes the artifact to disk. [`publish_all`] produces several
//! artifacts from one conversion, which is how the DOCX and PDF pair is exported.
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::FormatError;
use crate::format::SerializedDocument;
use crate::ir::Document;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Specifies how to publish a document.
///
/// ```ignore
/// let spec = PublishSpec::new(&document, "docx")
///     .with_output_path("cv.docx")
///     .with_option("page-size", "letter");
/// ```
///
/// Without an output path, text formats return in-memory content. Binary formats
/// (DOCX, PDF) require an explicit output path.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    pub document: &'a Document,
    /// Target format name (e.g., "html", "docx", "pdf").
    pub format: &'a str,
    /// Optional file path for writing output. Required for binary formats.
    pub output: Option<PathBuf>,
    /// Format-specific options (e.g., page size, Chrome binary).
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(document: &'a Document, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Adds every option from `options`, overriding earlier values.
    pub fn with_options(mut self, options: &HashMap<String, String>) -> Self {
        self.options
            .extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (for text formats without an output path).
    InMemory(String),
    /// Path to the written file (when output path was specified).
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

/// Publishes a document as described by `spec`.
///
/// # Errors
///
/// Returns [`FormatError`] if the format is unknown or cannot serialize, if
/// serialization or file I/O fails, or if a binary format is requested without an
/// output path.
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, FormatError> {
    let registry = FormatRegistry::with_defaults();
    publish_with(&registry, spec)
}

/// [`publish`] against a caller-supplied registry.
pub fn publish_with(
    registry: &FormatRegistry,
    spec: PublishSpec<'_>,
) -> Result<PublishResult, FormatError> {
    let serialized = registry.serialize_with_options(spec.document, spec.format, &spec.options)?;
    match serialized {
        SerializedDocument::Text(text) => write_or_return_text(text, spec.output),
        SerializedDocument::Binary(bytes) => write_binary(bytes, spec.output),
    }
}

/// Write `<stem>.<ext>` into `out_dir` for every format in `formats`.
///
/// The extension is the format's first registered extension. The directory is created
/// when missing. Stops at the first failure.
pub fn publish_all(
    document: &Document,
    out_dir: &Path,
    stem: &str,
    formats: &[&str],
    options: &HashMap<String, String>,
) -> Result<Vec<PathBuf>, FormatError> {
    let registry = FormatRegistry::with_defaults();
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let extension = registry
            .get(format)?
            .file_extensions()
            .first()
            .copied()
            .unwrap_or(*format);
        let path = out_dir.join(format!("{stem}.{extension}"));
        let spec = PublishSpec::new(document, format)
            .with_output_path(&path)
            .with_options(options);
        if let PublishArtifact::File(path) = publish_with(&registry, spec)?.artifact {
            log::debug!("wrote {}", path.display());
            written.push(path);
        }
    }
    Ok(written)
}

fn write_or_return_text(
    text: String,
    output: Option<PathBuf>,
) -> Result<PublishResult, FormatError> {
    if let Some(path) = output {
        write_to_path(path, text.into_bytes()).map(|path| PublishResult {
            artifact: PublishArtifact::File(path),
        })
    } else {
        Ok(PublishResult {
            artifact: PublishArtifact::InMemory(text),
        })
    }
}

fn write_binary(bytes: Vec<u8>, output: Option<PathBuf>) -> Result<PublishResult, FormatError> {
    let path = output.ok_or_else(|| {
        FormatError::SerializationError(
            "binary formats require an explicit output path".to_string(),
        )
    })?;
    write_to_path(path, bytes).map(|path| PublishResult {
        artifact: PublishArtifact::File(path),
    })
}

fn write_to_path(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf, FormatError> {
    fs::write(&path, &bytes)
        .map(|_| path.clone())
        .map_err(|err| FormatError::SerializationError(format!("{}: {err}", path.display())))
}
