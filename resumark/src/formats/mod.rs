//! Format implementations
//!
//! Inputs (Markdown, HTML) end in the block model; outputs (HTML, DOCX, PDF, JSON,
//! treeviz) start from it. Nothing here decides styling: every output reads the
//! resolved values stored on the blocks.

pub mod common;
pub mod docx;
pub mod html;
pub mod icons;
pub mod json;
pub mod markdown;
#[cfg(feature = "native-export")]
pub mod pdf;
pub mod treeviz;

pub use docx::DocxFormat;
pub use html::{HtmlFormat, HtmlOptions};
pub use json::JsonFormat;
pub use markdown::{MarkdownFormat, MarkdownOptions};
#[cfg(feature = "native-export")]
pub use pdf::PdfFormat;
pub use treeviz::TreevizFormat;
