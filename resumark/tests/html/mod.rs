use crate::common::sample_cv;
use resumark::formats::html::{serialize_to_html_with_options, HtmlOptions};
use resumark::style::PageSize;
use resumark::{publish, FormatRegistry, PublishArtifact, PublishSpec};
use std::collections::HashMap;

fn sample_html() -> String {
    let doc = sample_cv();
    match publish(PublishSpec::new(&doc, "html")).unwrap().artifact {
        PublishArtifact::InMemory(html) => html,
        PublishArtifact::File(_) => panic!("expected in-memory html"),
    }
}

#[test]
fn page_is_titled_after_the_name() {
    let html = sample_html();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Jane Doe</title>"));
    assert!(html.contains("<div class=\"resumark-document\">"));
}

#[test]
fn markers_match_list_kind_and_depth() {
    let html = sample_html();
    assert!(html.contains("<span class=\"rm-marker\">▸</span>Led the "));
    assert!(html.contains("<span class=\"rm-marker\">▪</span>Cut latency by "));
    assert!(html.contains("<span class=\"rm-marker\">1.</span>First"));
    assert!(html.contains("<span class=\"rm-marker\">2.</span>Second"));
    assert_eq!(html.matches("<span class=\"rm-marker\">").count(), 5);
}

#[test]
fn contact_links_survive() {
    let html = sample_html();
    assert!(html.contains("<a href=\"https://github.com/jane\""));
    assert!(html.contains("<a href=\"mailto:jane@example.com\""));
}

#[test]
fn tables_and_quotes_are_styled() {
    let html = sample_html();
    assert!(html.contains("<table class=\"rm-table\">"));
    assert!(html.contains("text-align: right"));
    assert!(html.contains("class=\"rm-quote\""));
}

#[test]
fn letter_option_changes_geometry() {
    let options = HtmlOptions::new(PageSize::Letter);
    let html = serialize_to_html_with_options(&sample_cv(), &options).unwrap();
    assert!(html.contains("@page { size: 215.9mm 279.4mm;"));

    let mut map = HashMap::new();
    map.insert("page-size".to_string(), "tabloid".to_string());
    assert!(FormatRegistry::default()
        .serialize_with_options(&sample_cv(), "html", &map)
        .is_err());
}
