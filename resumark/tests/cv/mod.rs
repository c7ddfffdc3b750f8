use crate::common::sample_cv;
use resumark::ir::{plain_text, Alignment, Block, ListItem};
use resumark::style::{Color, FontFamily};

fn list_items(blocks: &[Block]) -> Vec<&ListItem> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::ListItem(item) => Some(item),
            _ => None,
        })
        .collect()
}

#[test]
fn sample_cv_block_sequence() {
    let doc = sample_cv();
    let kinds: Vec<&str> = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Heading(_) => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::ListItem(_) => "item",
            Block::Quote(_) => "quote",
            Block::CodeBlock(_) => "code",
            Block::InlineCode(_) => "inline-code",
            Block::Table(_) => "table",
            Block::ImagePlaceholder(_) => "image",
            Block::Rule(_) => "rule",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading", "heading", "item", "item", "heading", "heading", "item", "item", "item",
            "item", "item", "heading", "table", "quote",
        ]
    );
}

#[test]
fn section_banners_are_upper_case() {
    let doc = sample_cv();
    let headings: Vec<String> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading(heading) => Some(plain_text(&heading.runs)),
            _ => None,
        })
        .collect();
    assert_eq!(
        headings,
        vec![
            "Jane Doe",
            "CONTACT",
            "EXPERIENCE",
            "Staff Engineer, Acme",
            "SKILLS"
        ]
    );
}

#[test]
fn contact_list_is_flat() {
    let doc = sample_cv();
    let items = list_items(&doc.blocks);
    assert!(items[0].flat && items[1].flat);
    assert!(items[2..].iter().all(|item| !item.flat));
    assert_eq!(items[1].runs[0].link.as_deref(), Some("https://github.com/jane"));
}

#[test]
fn nested_items_carry_depth_and_exclude_children() {
    let doc = sample_cv();
    let items = list_items(&doc.blocks);
    assert_eq!(plain_text(&items[2].runs).trim_end(), "Led the billing rewrite");
    assert_eq!(items[2].depth, 0);
    assert_eq!(plain_text(&items[3].runs), "Cut latency by 40%");
    assert_eq!(items[3].depth, 1);
    assert_eq!(items[3].list, items[2].list);
    assert!(items[5].ordered && items[6].ordered);
    assert_ne!(items[5].list, items[2].list);
}

#[test]
fn emphasis_reaches_runs() {
    let doc = sample_cv();
    let items = list_items(&doc.blocks);
    let bold = items[2]
        .runs
        .iter()
        .find(|run| run.text == "billing")
        .expect("bold run");
    assert!(bold.style.bold);
    let italic = items[3]
        .runs
        .iter()
        .find(|run| run.text == "40%")
        .expect("italic run");
    assert!(italic.style.italic);
}

#[test]
fn table_keeps_header_row_and_alignment() {
    let doc = sample_cv();
    let table = doc
        .blocks
        .iter()
        .find_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
        .expect("table");
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.column_count(), 2);
    assert!(table.rows[0].cells.iter().all(|cell| cell.is_header));
    assert!(table.rows[1].cells.iter().all(|cell| !cell.is_header));
    assert_eq!(table.rows[1].cells[1].alignment, Alignment::Right);
    assert_eq!(plain_text(&table.rows[2].cells[0].runs), "Go");
}

#[test]
fn every_run_has_a_resolved_style() {
    let doc = sample_cv();
    for block in &doc.blocks {
        if let Block::Heading(heading) = block {
            for run in &heading.runs {
                assert_eq!(run.style.font, FontFamily::Inter);
                assert!(run.style.size > 0);
            }
        }
    }
    let quote = doc
        .blocks
        .iter()
        .find_map(|block| match block {
            Block::Quote(quote) => Some(quote),
            _ => None,
        })
        .expect("quote");
    assert!(quote.runs.iter().all(|run| run.style.color != Color::Accent));
}

#[test]
fn outline_lists_markers_like_the_serializers() {
    let outline = sample_cv().outline();
    assert!(outline.starts_with("⧉ Document (14 blocks)\n"));
    assert!(outline.contains("├─ • jane@example.com\n"));
    assert!(outline.contains("├─ • ▸ Led the billing rewrite"));
    assert!(outline.contains("├─ • ▪ Cut latency by 40% (depth 1)\n"));
    assert!(outline.contains("├─ • 1. First\n"));
    assert!(outline.contains("├─ • 2. Second\n"));
    assert!(outline.contains("├─ ☰ 3×2\n"));
}
