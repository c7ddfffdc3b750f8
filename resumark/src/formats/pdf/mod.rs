//! PDF export built on top of the HTML serializer + headless Chrome.
//!
//! The document is rendered with the HTML format, page-size CSS is injected, and a
//! Chrome/Chromium binary running in headless mode prints the page to PDF. The printed
//! page uses exactly the styles the DOCX carries, since both come from the resolver.
//!
//! # Options
//!
//! - `page-size`: `a4` (default) or `letter`
//! - `css-path`: extra stylesheet, as for HTML
//! - `chrome-bin`: browser binary, overriding detection

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::page_size_option;
use crate::formats::html::{serialize_to_html_with_options, HtmlFormat};
use crate::ir::Document;
use crate::style::css::page_rule;
use crate::style::PageSetup;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;
use url::Url;
use which::which;

/// Environment variable naming the browser binary.
pub const CHROME_ENV: &str = "RESUMARK_CHROME_BIN";

/// Format implementation that shells out to Chrome/Chromium to generate PDFs.
#[derive(Debug, Clone, Default)]
pub struct PdfFormat {
    html: HtmlFormat,
    chrome_bin: Option<PathBuf>,
}

impl PdfFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `path` unless a `chrome-bin` option is passed per call.
    pub fn with_chrome_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_bin = Some(path.into());
        self
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "HTML-based PDF export via headless Chrome"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "PDF serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let page = page_size_option(options)?.setup();
        let html_options = self.html.options_from(options)?;
        let html = serialize_to_html_with_options(doc, &html_options)?;
        let final_html = inject_page_css(&html, &print_css(&page));

        let explicit = options
            .get("chrome-bin")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.chrome_bin.clone());
        let chrome = resolve_chrome_binary(explicit)?;
        log::info!("printing PDF with {}", chrome.display());

        let pdf_bytes = render_html_to_pdf(&final_html, &chrome, viewport(&page))?;
        Ok(SerializedDocument::Binary(pdf_bytes))
    }
}

fn print_css(page: &PageSetup) -> String {
    format!("{}\nbody {{ margin: 0; }}\n", page_rule(page))
}

/// Browser window matching the page at 96 dpi.
fn viewport(page: &PageSetup) -> (u32, u32) {
    (page.width / 15, page.height / 15)
}

fn inject_page_css(html: &str, css: &str) -> String {
    let style_tag = format!("<style data-resumark-pdf>\n{css}\n</style>");
    if let Some(idx) = html.find("</head>") {
        let mut output = String::with_capacity(html.len() + style_tag.len());
        output.push_str(&html[..idx]);
        output.push_str(&style_tag);
        output.push_str(&html[idx..]);
        output
    } else {
        format!("{style_tag}{html}")
    }
}

fn render_html_to_pdf(
    html: &str,
    chrome: &Path,
    (width, height): (u32, u32),
) -> Result<Vec<u8>, FormatError> {
    let temp_dir =
        tempdir().map_err(|e| FormatError::SerializationError(format!("Temp dir error: {e}")))?;
    let html_path = temp_dir.path().join("resumark-export.html");
    let mut html_file =
        fs::File::create(&html_path).map_err(|e| FormatError::SerializationError(e.to_string()))?;
    html_file
        .write_all(html.as_bytes())
        .map_err(|e| FormatError::SerializationError(e.to_string()))?;

    let pdf_path = temp_dir.path().join("resumark-export.pdf");
    let file_url = Url::from_file_path(&html_path).map_err(|_| {
        FormatError::SerializationError(
            "Failed to construct file:// URL for HTML input".to_string(),
        )
    })?;

    let pdf_arg = format!("--print-to-pdf={}", pdf_path.display());
    let window_arg = format!("--window-size={width},{height}");
    log::debug!("chrome {pdf_arg} {window_arg} {file_url}");

    let status = Command::new(chrome)
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--print-to-pdf-no-header")
        .arg(pdf_arg)
        .arg(window_arg)
        .arg(file_url.as_str())
        .status()
        .map_err(|e| {
            FormatError::SerializationError(format!(
                "Failed to launch Chrome ({}): {}",
                chrome.display(),
                e
            ))
        })?;

    if !status.success() {
        return Err(FormatError::SerializationError(format!(
            "Chrome exited with status {status}"
        )));
    }

    fs::read(&pdf_path).map_err(|e| {
        FormatError::SerializationError(format!("Chrome produced no PDF: {e}"))
    })
}

fn resolve_chrome_binary(explicit: Option<PathBuf>) -> Result<PathBuf, FormatError> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    for var in [CHROME_ENV, "GOOGLE_CHROME_BIN", "CHROME_BIN"] {
        if let Some(path) = env::var_os(var) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
    }

    for candidate in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
        "chrome",
        "msedge",
    ] {
        if let Ok(path) = which(candidate) {
            return Ok(path);
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidates = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ];
        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        let candidates = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];
        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        let candidates = [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium-browser",
            "/usr/bin/chromium",
            "/snap/bin/chromium",
        ];
        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    Err(FormatError::SerializationError(format!(
        "Unable to locate a Chrome/Chromium binary. Set {CHROME_ENV} or pass --extra-chrome-bin."
    )))
}
