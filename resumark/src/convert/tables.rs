//! Table extraction.

use super::dom::{alignment, children, tag};
use super::inline::{trim_blank_edges, InlineBuilder};
use super::tag::Tag;
use crate::ir::{Cell, Row, Table};
use crate::style::{resolve, BlockKind, StyleContext};
use markup5ever_rcdom::Handle;
use std::fmt;

/// Widest row a WordprocessingML table grid accepts.
pub const MAX_COLUMNS: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    TooManyColumns { found: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::TooManyColumns { found } => {
                write!(f, "table row has {found} cells, at most {MAX_COLUMNS} are supported")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Extract the rows of `table`. `Ok(None)` when no row has a cell.
///
/// Header styling is decided per cell: a `th` is a header cell in any row.
pub fn extract_table(table: &Handle) -> Result<Option<Table>, TableError> {
    let mut rows = Vec::new();
    for tr in table_rows(table) {
        let cells: Vec<Cell> = children(&tr)
            .iter()
            .filter_map(|node| match tag(node) {
                Some(Tag::HeaderCell) => Some(cell(node, true)),
                Some(Tag::DataCell) => Some(cell(node, false)),
                _ => None,
            })
            .collect();
        if cells.is_empty() {
            continue;
        }
        if cells.len() > MAX_COLUMNS {
            return Err(TableError::TooManyColumns { found: cells.len() });
        }
        rows.push(Row { cells });
    }
    Ok((!rows.is_empty()).then_some(Table { rows }))
}

/// `tr` elements of this table, skipping any nested table.
fn table_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in children(table) {
        match tag(&child) {
            Some(Tag::TableRow) => rows.push(child),
            Some(Tag::TableSection) => rows.extend(
                children(&child)
                    .into_iter()
                    .filter(|node| tag(node) == Some(Tag::TableRow)),
            ),
            _ => {}
        }
    }
    rows
}

fn cell(node: &Handle, header: bool) -> Cell {
    let ctx = StyleContext::new(BlockKind::TableCell { header });
    let record = resolve(&ctx);
    Cell {
        runs: trim_blank_edges(InlineBuilder::new(ctx).build(node)),
        is_header: header,
        alignment: alignment(node),
        base: record.run,
        style: record.paragraph,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::dom::{find_first_element, parse_tree};
    use crate::ir::{plain_text, Alignment};

    fn extract(html: &str) -> Result<Option<Table>, TableError> {
        let dom = parse_tree(html);
        let table = find_first_element(&dom.document, "table").unwrap();
        extract_table(&table)
    }

    #[test]
    fn empty_tables_are_absent() {
        assert_eq!(extract("<table></table>"), Ok(None));
        assert_eq!(extract("<table><tr></tr></table>"), Ok(None));
    }

    #[test]
    fn header_cells_are_marked_in_any_row() {
        let table = extract("<table><tr><td>a</td></tr><tr><th>b</th><td>c</td></tr></table>")
            .unwrap()
            .unwrap();
        assert_eq!(table.rows.len(), 2);
        assert!(!table.rows[0].cells[0].is_header);
        assert!(table.rows[1].cells[0].is_header);
        assert!(table.rows[1].cells[0].runs[0].style.bold);
        assert!(!table.rows[1].cells[1].is_header);
    }

    #[test]
    fn empty_cell_keeps_one_empty_run() {
        let table = extract("<table><tr><td></td><td>x</td></tr></table>")
            .unwrap()
            .unwrap();
        let empty = &table.rows[0].cells[0];
        assert_eq!(empty.runs.len(), 1);
        assert_eq!(empty.runs[0].text, "");
    }

    #[test]
    fn rows_without_cells_are_skipped() {
        let table = extract(
            "<table><thead><tr><th>h</th></tr></thead><tbody><tr></tr><tr><td>v</td></tr></tbody></table>",
        )
        .unwrap()
        .unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(plain_text(&table.rows[1].cells[0].runs), "v");
    }

    #[test]
    fn nested_tables_do_not_leak_rows() {
        let table = extract(
            "<table><tr><td>outer<table><tr><td>inner</td></tr></table></td></tr></table>",
        )
        .unwrap()
        .unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells.len(), 1);
    }

    #[test]
    fn cell_alignment_is_read() {
        let table = extract(r#"<table><tr><td style="text-align: right">1</td></tr></table>"#)
            .unwrap()
            .unwrap();
        assert_eq!(table.rows[0].cells[0].alignment, Alignment::Right);
    }

    #[test]
    fn too_wide_rows_are_an_error() {
        let cells = "<td>x</td>".repeat(MAX_COLUMNS + 1);
        let html = format!("<table><tr>{cells}</tr></table>");
        assert_eq!(
            extract(&html),
            Err(TableError::TooManyColumns {
                found: MAX_COLUMNS + 1
            })
        );
    }
}
