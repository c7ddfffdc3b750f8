//! Shared configuration loader for resumark.
//!
//! `defaults/resumark.default.toml` is embedded into every binary so that the
//! documented defaults and runtime behavior stay in sync. Applications layer
//! user files on top of those defaults via [`Loader`] before deserializing into
//! [`ResumarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use resumark::style::PageSize;
use resumark::MarkdownOptions;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/resumark.default.toml");

/// Top-level configuration consumed by resumark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumarkConfig {
    pub markdown: MarkdownConfig,
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
}

impl ResumarkConfig {
    /// Serializer options implied by the configuration, in the keys formats read.
    ///
    /// Explicit command-line options are expected to be merged over this map.
    pub fn format_options(&self) -> HashMap<String, String> {
        let mut options = HashMap::new();
        options.insert(
            "page-size".to_string(),
            PageSize::from(self.convert.page.size).name().to_string(),
        );
        if let Some(chrome) = &self.convert.pdf.chrome_bin {
            options.insert("chrome-bin".to_string(), chrome.clone());
        }
        if let Some(css) = &self.convert.html.custom_css {
            options.insert("css-path".to_string(), css.clone());
        }
        options
    }
}

/// Mirrors the comrak extensions exposed by [`MarkdownOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
    pub raw_html: bool,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            tables: config.tables,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
            raw_html: config.raw_html,
        }
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub page: PageConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
    #[serde(default)]
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub size: PageSizeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PageSizeConfig {
    #[serde(rename = "a4")]
    A4,
    #[serde(rename = "letter")]
    Letter,
}

impl From<PageSizeConfig> for PageSize {
    fn from(config: PageSizeConfig) -> Self {
        match config {
            PageSizeConfig::A4 => PageSize::A4,
            PageSizeConfig::Letter => PageSize::Letter,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdfConfig {
    #[serde(default)]
    pub chrome_bin: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HtmlConfig {
    #[serde(default)]
    pub custom_css: Option<String>,
}

/// Controls the treeviz outline printed by `inspect`.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_runs: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ResumarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ResumarkConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.markdown.tables);
        assert!(config.markdown.raw_html);
        assert_eq!(config.convert.page.size, PageSizeConfig::A4);
        assert_eq!(config.convert.pdf.chrome_bin, None);
        assert_eq!(config.convert.html.custom_css, None);
        assert!(!config.inspect.show_runs);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.page.size", "letter")
            .expect("override to apply")
            .set_override("convert.pdf.chrome_bin", "/opt/chrome")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.convert.page.size, PageSizeConfig::Letter);
        assert_eq!(config.convert.pdf.chrome_bin.as_deref(), Some("/opt/chrome"));
    }

    #[test]
    fn user_file_is_layered_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[markdown]\nraw_html = false\n\n[convert.html]\ncustom_css = \"cv.css\"").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert!(!config.markdown.raw_html);
        assert!(config.markdown.tables);
        assert_eq!(config.convert.html.custom_css.as_deref(), Some("cv.css"));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/resumark.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/resumark.toml")
            .build()
            .unwrap();
        assert_eq!(config.convert.page.size, PageSizeConfig::A4);
    }

    #[test]
    fn markdown_config_converts_to_options() {
        let config = load_defaults().expect("defaults to deserialize");
        let options: MarkdownOptions = (&config.markdown).into();
        assert_eq!(options, MarkdownOptions::default());
    }

    #[test]
    fn format_options_carry_page_and_paths() {
        let config = Loader::new()
            .set_override("convert.page.size", "letter")
            .unwrap()
            .set_override("convert.html.custom_css", "cv.css")
            .unwrap()
            .build()
            .unwrap();
        let options = config.format_options();
        assert_eq!(options.get("page-size").map(String::as_str), Some("letter"));
        assert_eq!(options.get("css-path").map(String::as_str), Some("cv.css"));
        assert!(!options.contains_key("chrome-bin"));
    }
}
