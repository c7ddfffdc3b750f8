use crate::common::sample_cv;
use resumark::formats::docx::{write_document, write_package, ListInstance};
use resumark::style::{PageSetup, PageSize};
use resumark::{publish, PublishArtifact, PublishSpec};
use std::fs;
use std::io::{Cursor, Read};
use tempfile::tempdir;
use zip::ZipArchive;

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn sample_cv_numbering_instances() {
    let part = write_document(&sample_cv(), &PageSetup::default());
    assert_eq!(
        part.lists,
        vec![
            ListInstance {
                num_id: 1,
                ordered: false
            },
            ListInstance {
                num_id: 2,
                ordered: true
            },
        ]
    );
    assert!(part.hyperlinks.contains(&"https://github.com/jane".to_string()));
    assert!(part
        .hyperlinks
        .contains(&"mailto:jane@example.com".to_string()));
}

#[test]
fn headings_use_outline_styles() {
    let part = write_document(&sample_cv(), &PageSetup::default());
    assert!(part.xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    assert!(part.xml.contains(r#"<w:pStyle w:val="Heading2"/>"#));
    assert!(part.xml.contains(r#"<w:pStyle w:val="Heading3"/>"#));
    assert!(part.xml.contains("EXPERIENCE"));
}

#[test]
fn nested_item_sits_one_level_deeper() {
    let part = write_document(&sample_cv(), &PageSetup::default());
    assert!(part
        .xml
        .contains(r#"<w:numPr><w:ilvl w:val="1"/><w:numId w:val="1"/></w:numPr>"#));
    assert!(part
        .xml
        .contains(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="2"/></w:numPr>"#));
}

#[test]
fn published_package_lands_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cv.docx");
    let doc = sample_cv();
    let result = publish(
        PublishSpec::new(&doc, "docx")
            .with_output_path(&path)
            .with_option("page-size", "letter"),
    )
    .unwrap();
    assert_eq!(result.artifact, PublishArtifact::File(path.clone()));

    let bytes = fs::read(&path).unwrap();
    let document = read_part(&bytes, "word/document.xml");
    assert!(document.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
    let numbering = read_part(&bytes, "word/numbering.xml");
    assert!(numbering.contains("▸"));
    assert!(numbering.contains("%1."));
}

#[test]
fn conversion_is_byte_stable() {
    let page = PageSize::A4.setup();
    let first = write_document(&sample_cv(), &page);
    let second = write_document(&sample_cv(), &page);
    assert_eq!(first, second);
    assert!(!write_package(&sample_cv(), &page).unwrap().is_empty());
}
