//! Error types for conversion and publishing

use std::fmt;

/// Errors raised by formats, the registry and the publishing pipeline.
///
/// Converting an HTML tree to blocks never fails; these only come from looking up
/// formats and writing outputs.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Source could not be read as the requested format
    ParseError(String),
    /// An output could not be produced or written
    SerializationError(String),
    /// The format lacks the requested direction or option
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::SerializationError(format!("I/O error: {err}"))
    }
}

impl From<zip::result::ZipError> for FormatError {
    fn from(err: zip::result::ZipError) -> Self {
        FormatError::SerializationError(format!("package error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_serialization_errors() {
        let err: FormatError = std::io::Error::other("disk full").into();
        assert_eq!(
            err,
            FormatError::SerializationError("I/O error: disk full".to_string())
        );
    }

    #[test]
    fn display_names_the_format() {
        let err = FormatError::FormatNotFound("rtf".to_string());
        assert_eq!(err.to_string(), "Format 'rtf' not found");
    }
}
