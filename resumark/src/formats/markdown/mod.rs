//! Markdown input
//!
//! Markdown is only ever read. `comrak` renders it to HTML and the converter takes
//! over from there, so everything that reaches the block model has gone through the
//! same HTML path, whether the author wrote Markdown syntax or raw HTML.
//!
//! # Library Choice
//!
//! `comrak` is CommonMark compliant and ships the GitHub extensions CVs rely on
//! (tables, strikethrough, autolinks, task lists).
//!
//! Raw HTML is passed through by default: authors routinely write `<p align="center">`
//! or `<br>` to lay out a header block, and the converter understands those tags.

use crate::convert::parse_html;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::Document;
use comrak::{markdown_to_html as render, ComrakOptions};

/// Which Markdown extensions are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
    /// Pass inline and block HTML through instead of escaping it.
    pub raw_html: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            raw_html: true,
        }
    }
}

impl MarkdownOptions {
    fn comrak(&self) -> ComrakOptions<'static> {
        let mut options = ComrakOptions::default();
        options.extension.table = self.tables;
        options.extension.strikethrough = self.strikethrough;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.render.unsafe_ = self.raw_html;
        options
    }
}

/// Render Markdown to an HTML fragment.
pub fn markdown_to_html(source: &str, options: &MarkdownOptions) -> String {
    render(source, &options.comrak())
}

/// Markdown → HTML → blocks. Blank input yields an empty document.
pub fn parse_markdown(source: &str, options: &MarkdownOptions) -> Document {
    if source.trim().is_empty() {
        return Document::default();
    }
    let html = markdown_to_html(source, options);
    log::debug!("markdown rendered to {} bytes of html", html.len());
    parse_html(&html)
}

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with GitHub extensions (input only)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_markdown(source, &self.options))
    }
}
