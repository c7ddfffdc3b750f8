//! HTML serialization (blocks → printable page)
//!
//! Builds an RcDom from the block sequence and serializes it with html5ever. Every
//! element carries its resolved style inline; the embedded stylesheet only adds page
//! geometry, element resets and the list marker box.

use crate::error::FormatError;
use crate::formats::common::Markers;
use crate::ir::{plain_text, Alignment, Block, Cell as TableCell, Document, StyledRun, Table};
use crate::style::css::{paragraph_declarations, run_declarations, stylesheet};
use crate::style::{document_defaults, PageSize, ParagraphStyle, RunStyle};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Title used when the document has no `h1`.
const FALLBACK_TITLE: &str = "Resume";

/// Options for HTML serialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlOptions {
    pub page: PageSize,
    /// Appended after the generated stylesheet
    pub custom_css: Option<String>,
}

impl HtmlOptions {
    pub fn new(page: PageSize) -> Self {
        Self {
            page,
            custom_css: None,
        }
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Serialize a document to a standalone HTML page on A4
pub fn serialize_to_html(doc: &Document) -> Result<String, FormatError> {
    serialize_to_html_with_options(doc, &HtmlOptions::default())
}

pub fn serialize_to_html_with_options(
    doc: &Document,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let dom = build_html_dom(doc);
    let body_html = serialize_dom(&dom)?;
    Ok(wrap_in_document(&body_html, &document_title(doc), options))
}

fn document_title(doc: &Document) -> String {
    doc.blocks
        .iter()
        .find_map(|block| match block {
            Block::Heading(heading) if heading.level == 1 => Some(plain_text(&heading.runs)),
            _ => None,
        })
        .map(|title| title.replace('\n', " ").trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn build_html_dom(doc: &Document) -> RcDom {
    let dom = RcDom::default();
    let container = create_element("div", vec![("class", "resumark-document")]);
    let mut markers = Markers::new();

    for block in &doc.blocks {
        let element = block_element(block, &mut markers);
        append(&container, element);
    }

    dom.document.children.borrow_mut().push(container);
    dom
}

fn block_element(block: &Block, markers: &mut Markers) -> Handle {
    match block {
        Block::Heading(heading) => {
            let tag = format!("h{}", heading.level.clamp(1, 6));
            let class = format!("rm-{tag}");
            let style = block_declarations(&heading.style, &heading.base);
            let element = create_element(&tag, vec![("class", &class), ("style", &style)]);
            append_runs(&element, &heading.runs, &heading.base);
            element
        }
        Block::Paragraph(paragraph) => {
            let style = with_alignment(
                block_declarations(&paragraph.style, &paragraph.base),
                paragraph.alignment,
            );
            let element = create_element("p", vec![("class", "rm-p"), ("style", &style)]);
            append_runs(&element, &paragraph.runs, &paragraph.base);
            element
        }
        Block::ListItem(item) => {
            let style = block_declarations(&item.style, &item.base);
            let element = create_element("div", vec![("class", "rm-li"), ("style", &style)]);
            if let Some(marker) = markers.next(item) {
                let span = create_element("span", vec![("class", "rm-marker")]);
                append(&span, create_text(&marker));
                append(&element, span);
            }
            append_runs(&element, &item.runs, &item.base);
            element
        }
        Block::Quote(quote) => {
            let style = block_declarations(&quote.style, &quote.base);
            let element =
                create_element("blockquote", vec![("class", "rm-quote"), ("style", &style)]);
            append_runs(&element, &quote.runs, &quote.base);
            element
        }
        Block::CodeBlock(code) => {
            let style = join_declarations(
                paragraph_declarations(&code.style),
                run_declarations(&code.run, &document_defaults()),
            );
            let pre = create_element("pre", vec![("class", "rm-pre"), ("style", &style)]);
            let class = code
                .language
                .as_ref()
                .map(|language| format!("language-{language}"));
            let attrs = match &class {
                Some(class) => vec![("class", class.as_str())],
                None => vec![],
            };
            let inner = create_element("code", attrs);
            let text = code.text.strip_suffix('\n').unwrap_or(&code.text);
            append(&inner, create_text(text));
            append(&pre, inner);
            pre
        }
        Block::InlineCode(code) => {
            let style = block_declarations(&code.style, &code.base);
            let element = create_element("p", vec![("class", "rm-code"), ("style", &style)]);
            append_runs(&element, &code.runs, &code.base);
            element
        }
        Block::Table(table) => table_element(table),
        Block::ImagePlaceholder(image) => {
            let style = join_declarations(
                paragraph_declarations(&image.style),
                run_declarations(&image.run, &document_defaults()),
            );
            let element = create_element("p", vec![("class", "rm-img"), ("style", &style)]);
            append(&element, create_text(&image.label()));
            element
        }
        Block::Rule(rule) => {
            let style = paragraph_declarations(&rule.style);
            let element = create_element("p", vec![("class", "rm-rule"), ("style", &style)]);
            append(&element, create_element("br", vec![]));
            element
        }
    }
}

/// Paragraph declarations plus the block's base run, so plain runs inherit it.
fn block_declarations(paragraph: &ParagraphStyle, base: &RunStyle) -> String {
    join_declarations(
        paragraph_declarations(paragraph),
        run_declarations(base, &document_defaults()),
    )
}

fn table_element(table: &Table) -> Handle {
    let element = create_element("table", vec![("class", "rm-table")]);
    let body = create_element("tbody", vec![]);
    for row in &table.rows {
        let tr = create_element("tr", vec![]);
        for cell in &row.cells {
            append(&tr, cell_element(cell));
        }
        append(&body, tr);
    }
    append(&element, body);
    element
}

fn cell_element(cell: &TableCell) -> Handle {
    let tag = if cell.is_header { "th" } else { "td" };
    let mut decls = Vec::new();
    if let Some(shade) = cell.style.shading {
        decls.push(format!("background: {}", shade.css()));
    }
    if cell.alignment != Alignment::Left {
        decls.push(format!("text-align: {}", cell.alignment.name()));
    }
    let style = join_declarations(
        decls.join("; "),
        run_declarations(&cell.base, &document_defaults()),
    );
    let element = create_element(tag, vec![("style", &style)]);
    append_runs(&element, &cell.runs, &cell.base);
    element
}

fn with_alignment(decls: String, alignment: Alignment) -> String {
    if alignment == Alignment::Left {
        decls
    } else {
        join_declarations(decls, format!("text-align: {}", alignment.name()))
    }
}

fn join_declarations(first: String, second: String) -> String {
    match (first.is_empty(), second.is_empty()) {
        (_, true) => first,
        (true, false) => second,
        (false, false) => format!("{first}; {second}"),
    }
}

/// Runs become bare text when they match `base`, a styled `span` otherwise.
fn append_runs(parent: &Handle, runs: &[StyledRun], base: &RunStyle) {
    for run in runs {
        if run.line_break {
            append(parent, create_element("br", vec![]));
            continue;
        }
        let style = run_declarations(&run.style, base);
        let node = match (&run.link, style.is_empty()) {
            (Some(href), _) => {
                let mut attrs = vec![("href", href.as_str())];
                if !style.is_empty() {
                    attrs.push(("style", style.as_str()));
                }
                let anchor = create_element("a", attrs);
                append(&anchor, create_text(&run.text));
                anchor
            }
            (None, true) => create_text(&run.text),
            (None, false) => {
                let span = create_element("span", vec![("style", &style)]);
                append(&span, create_text(&run.text));
                span
            }
        };
        append(parent, node);
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of the document container
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let container = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?
        .clone();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
        output.push(b'\n');
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

fn wrap_in_document(body_html: &str, title: &str, options: &HtmlOptions) -> String {
    let css = stylesheet(&options.page.setup());
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = html_escape(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="resumark">
  <title>{escaped_title}</title>
  <style>
{css}
{custom_css}
  </style>
</head>
<body>
<div class="resumark-document">
{body_html}</div>
</body>
</html>
"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::parse_html;

    fn render(html: &str) -> String {
        serialize_to_html(&parse_html(html)).unwrap()
    }

    #[test]
    fn page_is_standalone() {
        let html = render("<p>Hello</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("@page { size: 210mm 297mm;"));
        assert!(html.contains("<div class=\"resumark-document\">"));
        assert!(html.contains("Hello"));
    }

    #[test]
    fn title_comes_from_the_first_h1() {
        assert!(render("<h1>Jane &amp; Co</h1>").contains("<title>Jane &amp; Co</title>"));
        assert!(render("<p>no heading</p>").contains("<title>Resume</title>"));
    }

    #[test]
    fn headings_keep_their_level() {
        let html = render("<h3>Role</h3>");
        assert!(html.contains("<h3 class=\"rm-h3\""));
    }

    #[test]
    fn banner_headings_are_upper_cased() {
        let html = render("<h2>Experience</h2>");
        assert!(html.contains("EXPERIENCE"));
        assert!(html.contains("border-left: 4pt solid #2563eb"));
    }

    #[test]
    fn bold_runs_become_styled_spans() {
        let html = render("<p>plain <strong>bold</strong></p>");
        assert!(html.contains("plain <span style=\""));
        assert!(html.contains("font-weight: 700"));
    }

    #[test]
    fn links_keep_their_target() {
        let html = render("<p><a href=\"https://example.com\">site</a></p>");
        assert!(html.contains("<a href=\"https://example.com\""));
        assert!(html.contains("text-decoration: underline"));
    }

    #[test]
    fn list_markers_follow_kind_and_depth() {
        let html = render("<ol><li>one</li><li>two</li></ol><ul><li>a<ul><li>b</li></ul></li></ul>");
        assert!(html.contains("<span class=\"rm-marker\">1.</span>one"));
        assert!(html.contains("<span class=\"rm-marker\">2.</span>two"));
        assert!(html.contains("<span class=\"rm-marker\">▸</span>a"));
        assert!(html.contains("<span class=\"rm-marker\">▪</span>b"));
    }

    #[test]
    fn personal_info_list_has_no_markers() {
        let html = render("<h1>Jane</h1><h2>Contact</h2><ul><li>mail</li></ul>");
        assert!(!html.contains("rm-marker\">"));
        assert!(html.contains("mail"));
    }

    #[test]
    fn code_blocks_are_verbatim() {
        let html = render("<pre><code class=\"language-rust\">fn main() {\n    x &lt; y\n}\n</code></pre>");
        assert!(html.contains("<code class=\"language-rust\">fn main() {\n    x &lt; y\n}</code>"));
    }

    #[test]
    fn tables_render_header_cells() {
        let html = render(
            "<table><tr><th>Skill</th><th align=\"right\">Years</th></tr><tr><td>Rust</td><td>5</td></tr></table>",
        );
        assert!(html.contains("<table class=\"rm-table\">"));
        assert!(html.contains("<th style=\"background: #f9fafb; font-size: 12pt"));
        assert!(html.contains("text-align: right"));
        assert!(html.contains(">Rust</td>"));
    }

    #[test]
    fn bare_text_emphasis_only_changes_weight() {
        let html = render("**Lead** text");
        assert!(html.contains("<span style=\"font-weight: 700\">Lead</span> text"));
    }

    #[test]
    fn plain_runs_inherit_the_stored_base_style() {
        let mut base = document_defaults();
        base.color = crate::style::Color::Subtle;
        let doc = Document::new(vec![Block::Paragraph(crate::ir::Paragraph {
            runs: vec![StyledRun::new("caption", base)],
            alignment: Alignment::Left,
            base,
            style: ParagraphStyle::default(),
        })]);
        let html = serialize_to_html(&doc).unwrap();
        assert!(html.contains("color: #6b7280\">caption</p>"));
    }

    #[test]
    fn alignment_is_kept_on_paragraphs() {
        let html = render("<p align=\"center\">Jane</p>");
        assert!(html.contains("text-align: center"));
    }

    #[test]
    fn images_become_placeholders() {
        let html = render("<img src=\"me.png\" alt=\"Portrait\">");
        assert!(html.contains("[Image: Portrait]"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn custom_css_is_appended() {
        let options = HtmlOptions::default().with_custom_css(".x { color: red; }".to_string());
        let html = serialize_to_html_with_options(&parse_html("<p>a</p>"), &options).unwrap();
        assert!(html.contains(".x { color: red; }"));
        assert!(html.contains(".rm-marker"));
    }

    #[test]
    fn letter_pages_change_the_page_rule() {
        let options = HtmlOptions::new(PageSize::Letter);
        let html = serialize_to_html_with_options(&Document::default(), &options).unwrap();
        assert!(html.contains("@page { size: 215.9mm 279.4mm;"));
    }

    #[test]
    fn empty_documents_still_render() {
        let html = serialize_to_html(&Document::default()).unwrap();
        assert!(html.contains("<div class=\"resumark-document\">\n</div>"));
    }
}
