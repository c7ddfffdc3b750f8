//! `word/document.xml`: the block sequence as WordprocessingML paragraphs and tables.
//!
//! Styles are written as direct formatting taken from the blocks, so the package
//! renders the same whichever style definitions the reader falls back to.

use crate::ir::{Alignment, Block, Cell, Document, StyledRun, Table};
use crate::style::{Border, PageSetup, ParagraphStyle, RunStyle};
use quick_xml::escape::escape;

/// Relationship ids below this are taken by the styles and numbering parts.
pub const FIRST_LINK_RELATIONSHIP: usize = 3;
/// Deepest numbering level WordprocessingML defines.
pub const MAX_LEVEL: usize = 8;

const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#
);

/// One numbering instance; every list restarts its own count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListInstance {
    pub num_id: usize,
    pub ordered: bool,
}

/// The rendered main part plus what the other parts must declare for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPart {
    pub xml: String,
    /// Hyperlink targets; the n-th gets relationship `rId{FIRST_LINK_RELATIONSHIP + n}`.
    pub hyperlinks: Vec<String>,
    pub lists: Vec<ListInstance>,
}

pub fn write_document(doc: &Document, page: &PageSetup) -> DocumentPart {
    let mut writer = BodyWriter {
        out: String::new(),
        hyperlinks: Vec::new(),
        list_keys: Vec::new(),
        text_width: page
            .width
            .saturating_sub(page.margin_left + page.margin_right),
    };

    for block in &doc.blocks {
        writer.block(block);
    }
    // A table may not be the last thing before the section properties.
    if matches!(doc.blocks.last(), Some(Block::Table(_))) {
        writer.out.push_str("<w:p/>");
    }

    let lists = writer
        .list_keys
        .iter()
        .enumerate()
        .map(|(index, &(_, ordered))| ListInstance {
            num_id: index + 1,
            ordered,
        })
        .collect();

    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(&format!("<w:document {NAMESPACES}><w:body>"));
    xml.push_str(&writer.out);
    xml.push_str(&section_properties(page));
    xml.push_str("</w:body></w:document>");

    DocumentPart {
        xml,
        hyperlinks: writer.hyperlinks,
        lists,
    }
}

struct BodyWriter {
    out: String,
    hyperlinks: Vec<String>,
    /// (list ordinal, ordered) in order of first use; index + 1 is the numId.
    list_keys: Vec<(usize, bool)>,
    text_width: u32,
}

/// Paragraph-level extras that do not come from the style record.
#[derive(Default)]
struct ParagraphExtras {
    heading: Option<u8>,
    numbering: Option<(usize, usize)>,
    alignment: Alignment,
}

impl BodyWriter {
    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading(heading) => {
                let extras = ParagraphExtras {
                    heading: Some(heading.level.clamp(1, 6)),
                    ..Default::default()
                };
                self.paragraph(&heading.style, &extras, &heading.runs);
            }
            Block::Paragraph(paragraph) => {
                let extras = ParagraphExtras {
                    alignment: paragraph.alignment,
                    ..Default::default()
                };
                self.paragraph(&paragraph.style, &extras, &paragraph.runs);
            }
            Block::ListItem(item) => {
                let numbering = if item.flat {
                    None
                } else {
                    Some((self.num_id(item.list, item.ordered), item.depth.min(MAX_LEVEL)))
                };
                let extras = ParagraphExtras {
                    numbering,
                    ..Default::default()
                };
                self.paragraph(&item.style, &extras, &item.runs);
            }
            Block::Quote(quote) => {
                self.paragraph(&quote.style, &ParagraphExtras::default(), &quote.runs)
            }
            Block::InlineCode(code) => {
                self.paragraph(&code.style, &ParagraphExtras::default(), &code.runs)
            }
            Block::CodeBlock(code) => {
                self.open_paragraph(&code.style, &ParagraphExtras::default());
                let text = code.text.strip_suffix('\n').unwrap_or(&code.text);
                for (index, line) in text.split('\n').enumerate() {
                    if index > 0 {
                        self.out.push_str(&format!(
                            "<w:r>{}<w:br/></w:r>",
                            run_properties(&code.run)
                        ));
                    }
                    self.text_run(line, &code.run);
                }
                self.out.push_str("</w:p>");
            }
            Block::Table(table) => self.table(table),
            Block::ImagePlaceholder(image) => {
                self.open_paragraph(&image.style, &ParagraphExtras::default());
                self.text_run(&image.label(), &image.run);
                self.out.push_str("</w:p>");
            }
            Block::Rule(rule) => {
                self.open_paragraph(&rule.style, &ParagraphExtras::default());
                self.out.push_str("</w:p>");
            }
        }
    }

    fn num_id(&mut self, list: usize, ordered: bool) -> usize {
        let key = (list, ordered);
        match self.list_keys.iter().position(|k| *k == key) {
            Some(index) => index + 1,
            None => {
                self.list_keys.push(key);
                self.list_keys.len()
            }
        }
    }

    fn paragraph(&mut self, style: &ParagraphStyle, extras: &ParagraphExtras, runs: &[StyledRun]) {
        self.open_paragraph(style, extras);
        self.runs(runs);
        self.out.push_str("</w:p>");
    }

    fn open_paragraph(&mut self, style: &ParagraphStyle, extras: &ParagraphExtras) {
        self.out.push_str("<w:p>");
        self.out.push_str(&paragraph_properties(style, extras));
    }

    fn runs(&mut self, runs: &[StyledRun]) {
        for run in runs {
            if run.line_break {
                self.out
                    .push_str(&format!("<w:r>{}<w:br/></w:r>", run_properties(&run.style)));
                continue;
            }
            // Source line breaks inside text are layout whitespace, as in the browser.
            let text = run.text.replace('\n', " ");
            match &run.link {
                Some(target) => {
                    self.hyperlinks.push(target.clone());
                    let id = FIRST_LINK_RELATIONSHIP + self.hyperlinks.len() - 1;
                    self.out
                        .push_str(&format!(r#"<w:hyperlink r:id="rId{id}" w:history="1">"#));
                    self.text_run(&text, &run.style);
                    self.out.push_str("</w:hyperlink>");
                }
                None => self.text_run(&text, &run.style),
            }
        }
    }

    fn text_run(&mut self, text: &str, style: &RunStyle) {
        self.out.push_str(&format!(
            r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
            run_properties(style),
            escape(text)
        ));
    }

    fn table(&mut self, table: &Table) {
        let columns = table.column_count().max(1);
        let column_width = self.text_width / columns as u32;

        self.out.push_str("<w:tbl><w:tblPr>");
        self.out.push_str(r#"<w:tblW w:w="5000" w:type="pct"/>"#);
        self.out.push_str(&format!(
            "<w:tblBorders>{}</w:tblBorders>",
            r#"<w:insideH w:val="single" w:sz="6" w:space="0" w:color="e5e7eb"/>"#
        ));
        self.out.push_str(r#"<w:tblLayout w:type="fixed"/>"#);
        let margin = crate::style::resolver::CELL_MARGIN;
        self.out.push_str(&format!(
            r#"<w:tblCellMar><w:top w:w="{margin}" w:type="dxa"/><w:left w:w="{margin}" w:type="dxa"/><w:bottom w:w="{margin}" w:type="dxa"/><w:right w:w="{margin}" w:type="dxa"/></w:tblCellMar>"#
        ));
        self.out.push_str("</w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            self.out
                .push_str(&format!(r#"<w:gridCol w:w="{column_width}"/>"#));
        }
        self.out.push_str("</w:tblGrid>");

        for row in &table.rows {
            self.out.push_str("<w:tr>");
            for cell in &row.cells {
                self.cell(cell, column_width);
            }
            // Short rows are padded so every row spans the grid.
            for _ in row.cells.len()..columns {
                self.out.push_str(&format!(
                    r#"<w:tc><w:tcPr><w:tcW w:w="{column_width}" w:type="dxa"/></w:tcPr><w:p/></w:tc>"#
                ));
            }
            self.out.push_str("</w:tr>");
        }
        self.out.push_str("</w:tbl>");
    }

    fn cell(&mut self, cell: &Cell, width: u32) {
        self.out.push_str(&format!(
            r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/>"#
        ));
        if let Some(shade) = cell.style.shading {
            self.out.push_str(&format!(
                r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
                shade.hex()
            ));
        }
        self.out.push_str("</w:tcPr>");
        // Shading already sits on the cell.
        let style = ParagraphStyle {
            shading: None,
            ..cell.style
        };
        let extras = ParagraphExtras {
            alignment: cell.alignment,
            ..Default::default()
        };
        self.paragraph(&style, &extras, &cell.runs);
        self.out.push_str("</w:tc>");
    }
}

fn paragraph_properties(style: &ParagraphStyle, extras: &ParagraphExtras) -> String {
    let mut props = String::from("<w:pPr>");
    if let Some(level) = extras.heading {
        props.push_str(&format!(r#"<w:pStyle w:val="Heading{level}"/><w:keepNext/>"#));
    }
    if let Some((num_id, level)) = extras.numbering {
        props.push_str(&format!(
            r#"<w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{num_id}"/></w:numPr>"#
        ));
    }
    if style.border_left.is_some() || style.border_bottom.is_some() {
        props.push_str("<w:pBdr>");
        if let Some(edge) = &style.border_left {
            props.push_str(&border("left", edge, 8));
        }
        if let Some(edge) = &style.border_bottom {
            props.push_str(&border("bottom", edge, 4));
        }
        props.push_str("</w:pBdr>");
    }
    if let Some(shade) = style.shading {
        props.push_str(&format!(
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            shade.hex()
        ));
    }
    props.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="{}""#,
        style.spacing_before, style.spacing_after
    ));
    if let Some(line) = style.line {
        props.push_str(&format!(r#" w:line="{line}" w:lineRule="auto""#));
    }
    props.push_str("/>");
    if style.indent_left > 0 || style.hanging > 0 {
        props.push_str(&format!(r#"<w:ind w:left="{}""#, style.indent_left));
        if style.hanging > 0 {
            props.push_str(&format!(r#" w:hanging="{}""#, style.hanging));
        }
        props.push_str("/>");
    }
    if let Some(jc) = justification(extras.alignment) {
        props.push_str(&format!(r#"<w:jc w:val="{jc}"/>"#));
    }
    props.push_str("</w:pPr>");
    props
}

fn border(side: &str, edge: &Border, space: u32) -> String {
    format!(
        r#"<w:{side} w:val="single" w:sz="{}" w:space="{space}" w:color="{}"/>"#,
        edge.size,
        edge.color.hex()
    )
}

fn justification(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Left => None,
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
        Alignment::Justify => Some("both"),
    }
}

/// `w:rPr` for a run; every property is written out.
fn run_properties(style: &RunStyle) -> String {
    let font = style.font.name();
    let mut props = format!(
        r#"<w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
    );
    if style.bold {
        props.push_str("<w:b/><w:bCs/>");
    }
    if style.italic {
        props.push_str("<w:i/><w:iCs/>");
    }
    if style.strike {
        props.push_str("<w:strike/>");
    }
    props.push_str(&format!(
        r#"<w:color w:val="{}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#,
        style.color.hex(),
        size = style.size
    ));
    if style.underline {
        props.push_str(r#"<w:u w:val="single"/>"#);
    }
    props.push_str("</w:rPr>");
    props
}

fn section_properties(page: &PageSetup) -> String {
    format!(
        r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#,
        page.width,
        page.height,
        page.margin_top,
        page.margin_right,
        page.margin_bottom,
        page.margin_left
    )
}
