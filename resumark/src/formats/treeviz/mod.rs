//! Treeviz formatter for the block model
//!
//! Treeviz is a visual outline of a converted document: one line per block, drawn as
//! a tree with Unicode icons. It is the quickest way to see what the converter made of
//! an input, and it is what the snapshot tests compare.
//!
//! So the format is :
//! <prefix><connector> <icon> <label> (text truncated to 30 characters)
//!
//! Example:
//!
//! ⧉ Document (5 blocks)
//! ├─ § h1 Jane Doe
//! ├─ § h2 EXPERIENCE
//! ├─ ¶ Built the billing pipeline a…
//! ├─ • ▸ Rust
//! └─ ☰ 2×2
//!   ├─ ≡ Row 1 (2 cells)
//!   │ ├─ ◦ th Skill
//!   │ └─ ◦ th Years
//!   └─ ≡ Row 2 (2 cells)
//!     ├─ ◦ td Rust
//!     └─ ◦ td 5
//!
//! List markers are the ones the serializers print, computed the same way.
//!
//! Parameters:
//! - `show-runs`: list the styled runs under every block that has them.

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::common::{bool_option, Markers};
use crate::ir::{plain_text, Alignment, Block, Document, StyledRun, Table};
use crate::style::FontFamily;
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

struct Node {
    icon: &'static str,
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(kind: &str, label: impl Into<String>) -> Self {
        Self {
            icon: get_icon(kind),
            label: label.into(),
            children: Vec::new(),
        }
    }
}

fn truncate(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > LABEL_WIDTH {
        let head: String = flat.chars().take(LABEL_WIDTH).collect();
        format!("{head}…")
    } else {
        flat
    }
}

fn block_node(block: &Block, markers: &mut Markers, show_runs: bool) -> Node {
    let (kind, label, runs): (&str, String, Option<&[StyledRun]>) = match block {
        Block::Heading(heading) => (
            "Heading",
            format!("h{} {}", heading.level, truncate(&plain_text(&heading.runs))),
            Some(&heading.runs),
        ),
        Block::Paragraph(paragraph) => {
            let mut label = truncate(&plain_text(&paragraph.runs));
            if paragraph.alignment != Alignment::Left {
                label.push_str(&format!(" [{}]", paragraph.alignment.name()));
            }
            ("Paragraph", label, Some(&paragraph.runs))
        }
        Block::ListItem(item) => {
            let text = truncate(&plain_text(&item.runs));
            let mut label = match markers.next(item) {
                Some(marker) => format!("{marker} {text}"),
                None => text,
            };
            if item.depth > 0 {
                label.push_str(&format!(" (depth {})", item.depth));
            }
            ("ListItem", label, Some(&item.runs))
        }
        Block::Quote(quote) => (
            "Quote",
            truncate(&plain_text(&quote.runs)),
            Some(&quote.runs),
        ),
        Block::CodeBlock(code) => {
            let lines = code.text.trim_end_matches('\n').lines().count();
            let language = code.language.as_deref().unwrap_or("code");
            ("CodeBlock", format!("{language} ({lines} lines)"), None)
        }
        Block::InlineCode(code) => (
            "InlineCode",
            truncate(&plain_text(&code.runs)),
            Some(&code.runs),
        ),
        Block::Table(table) => return table_node(table, show_runs),
        Block::ImagePlaceholder(image) => ("ImagePlaceholder", truncate(&image.label()), None),
        Block::Rule(_) => ("Rule", "rule".to_string(), None),
    };

    let children = match runs {
        Some(runs) if show_runs => runs.iter().map(run_node).collect(),
        _ => Vec::new(),
    };
    Node {
        icon: get_icon(kind),
        label,
        children,
    }
}

fn table_node(table: &Table, show_runs: bool) -> Node {
    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| Node {
            icon: get_icon("Row"),
            label: format!("Row {} ({} cells)", index + 1, row.cells.len()),
            children: row
                .cells
                .iter()
                .map(|cell| {
                    let tag = if cell.is_header { "th" } else { "td" };
                    Node {
                        icon: get_icon("Run"),
                        label: format!("{tag} {}", truncate(&plain_text(&cell.runs))),
                        children: if show_runs {
                            cell.runs.iter().map(run_node).collect()
                        } else {
                            Vec::new()
                        },
                    }
                })
                .collect(),
        })
        .collect();
    Node {
        icon: get_icon("Table"),
        label: format!("{}×{}", table.rows.len(), table.column_count()),
        children: rows,
    }
}

fn run_node(run: &StyledRun) -> Node {
    if run.line_break {
        return Node::leaf("LineBreak", "break");
    }
    let mut flags = Vec::new();
    if run.style.bold {
        flags.push("bold");
    }
    if run.style.italic {
        flags.push("italic");
    }
    if run.style.underline {
        flags.push("underline");
    }
    if run.style.strike {
        flags.push("strike");
    }
    if run.style.font == FontFamily::CourierNew {
        flags.push("mono");
    }
    let mut label = format!("{:?}", truncate(&run.text));
    if !flags.is_empty() {
        label.push_str(&format!(" [{}]", flags.join(", ")));
    }
    match &run.link {
        Some(target) => Node::leaf("Link", format!("{label} → {target}")),
        None => Node::leaf("Run", label),
    }
}

fn format_nodes(nodes: &[Node], prefix: &str, output: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        let is_last = index == nodes.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!("{prefix}{connector} {} {}\n", node.icon, node.label));
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        format_nodes(&node.children, &child_prefix, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, false)
}

/// Outline of `doc`, with run children when `show_runs` is set.
pub fn to_treeviz_str_with_params(doc: &Document, show_runs: bool) -> String {
    let mut markers = Markers::new();
    let nodes: Vec<Node> = doc
        .blocks
        .iter()
        .map(|block| block_node(block, &mut markers, show_runs))
        .collect();

    let mut output = format!(
        "{} Document ({} blocks)\n",
        get_icon("Document"),
        doc.blocks.len()
    );
    format_nodes(&nodes, "", &mut output);
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual block outline with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let show_runs = bool_option(options, "show-runs", false)?;
        Ok(SerializedDocument::Text(to_treeviz_str_with_params(
            doc, show_runs,
        )))
    }
}
