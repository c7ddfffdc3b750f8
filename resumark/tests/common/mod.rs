use resumark::ir::Document;
use resumark::{parse_markdown, MarkdownOptions};
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture to exist")
}

pub fn sample_cv() -> Document {
    parse_markdown(&load_fixture("cv.md"), &MarkdownOptions::default())
}
