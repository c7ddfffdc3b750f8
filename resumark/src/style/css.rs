//! CSS rendering of resolved styles for the page renderer.
//!
//! The HTML page never carries a second style table: every declaration below is a
//! unit conversion of a [`RunStyle`], [`ParagraphStyle`] or [`PageSetup`].

use super::page::{twips_to_mm, PageSetup};
use super::resolver::{document_defaults, Border, ParagraphStyle, RunStyle, LINE_SPACING};

/// Twips (or half-points doubled) to a `pt` length.
fn pt(twips: u32) -> String {
    format!("{}pt", f64::from(twips) / 20.0)
}

fn border(edge: &Border) -> String {
    format!(
        "{}pt solid {}",
        f64::from(edge.size) / 8.0,
        edge.color.css()
    )
}

/// Declarations for a run, skipping properties equal to `base`.
pub fn run_declarations(run: &RunStyle, base: &RunStyle) -> String {
    let mut decls = Vec::new();
    if run.font != base.font {
        decls.push(format!("font-family: {}", run.font.css_stack()));
    }
    if run.size != base.size {
        decls.push(format!("font-size: {}pt", f64::from(run.size) / 2.0));
    }
    if run.color != base.color {
        decls.push(format!("color: {}", run.color.css()));
    }
    if run.bold != base.bold {
        decls.push(format!("font-weight: {}", if run.bold { 700 } else { 400 }));
    }
    if run.italic != base.italic {
        let style = if run.italic { "italic" } else { "normal" };
        decls.push(format!("font-style: {style}"));
    }
    if run.underline != base.underline || run.strike != base.strike {
        let decoration = match (run.underline, run.strike) {
            (true, true) => "underline line-through",
            (true, false) => "underline",
            (false, true) => "line-through",
            (false, false) => "none",
        };
        decls.push(format!("text-decoration: {decoration}"));
    }
    decls.join("; ")
}

/// Declarations for a block element.
pub fn paragraph_declarations(paragraph: &ParagraphStyle) -> String {
    let mut decls = vec![format!(
        "margin: {} 0 {} 0",
        pt(paragraph.spacing_before),
        pt(paragraph.spacing_after)
    )];
    if let Some(line) = paragraph.line {
        decls.push(format!("line-height: {}", f64::from(line) / 240.0));
    }
    if paragraph.indent_left > 0 {
        // A bar sits at the block edge, so the indent becomes inner padding.
        let property = if paragraph.border_left.is_some() {
            "padding-left"
        } else {
            "margin-left"
        };
        decls.push(format!("{property}: {}", pt(paragraph.indent_left)));
    }
    if paragraph.hanging > 0 {
        decls.push(format!("text-indent: -{}", pt(paragraph.hanging)));
        decls.push(format!("padding-left: {}", pt(paragraph.hanging)));
    }
    if let Some(edge) = &paragraph.border_left {
        decls.push(format!("border-left: {}", border(edge)));
        if paragraph.indent_left == 0 {
            decls.push("padding-left: 8pt".to_string());
        }
    }
    if let Some(edge) = &paragraph.border_bottom {
        decls.push(format!("border-bottom: {}", border(edge)));
        decls.push("padding-bottom: 4pt".to_string());
    }
    if let Some(shade) = paragraph.shading {
        decls.push(format!("background: {}", shade.css()));
    }
    decls.join("; ")
}

/// `@page` rule for the print path.
pub fn page_rule(page: &PageSetup) -> String {
    format!(
        "@page {{ size: {}mm {}mm; margin: {}mm {}mm {}mm {}mm; }}",
        twips_to_mm(page.width),
        twips_to_mm(page.height),
        twips_to_mm(page.margin_top),
        twips_to_mm(page.margin_right),
        twips_to_mm(page.margin_bottom),
        twips_to_mm(page.margin_left),
    )
}

/// Base stylesheet: page geometry, document defaults and list markers.
///
/// Block and run styles are emitted inline by the HTML serializer; this sheet only
/// resets element defaults and holds what has no per-node counterpart.
pub fn stylesheet(page: &PageSetup) -> String {
    let body = document_defaults();
    format!(
        "{page_rule}
* {{ box-sizing: border-box; }}
h1, h2, h3, h4, h5, h6, p, blockquote, pre {{ margin: 0; font-size: inherit; font-weight: inherit; }}
body {{
  font-family: {font};
  font-size: {size}pt;
  color: {color};
  line-height: {line};
  margin: 0;
  padding: 0;
  background: #ffffff;
  -webkit-print-color-adjust: exact;
  print-color-adjust: exact;
}}
@media screen {{ .resumark-document {{ max-width: {width}mm; margin: 0 auto; padding: {top}mm {side}mm; }} }}
.resumark-document h1, .resumark-document h2, .resumark-document h3 {{ page-break-after: avoid; }}
.rm-li {{ position: relative; page-break-inside: avoid; }}
.rm-marker {{ display: inline-block; min-width: {hanging}; text-indent: 0; color: {accent}; font-weight: 700; }}
.rm-pre {{ white-space: pre-wrap; }}
.rm-table {{ width: 100%; border-collapse: collapse; margin: 12pt 0; }}
.rm-table td, .rm-table th {{ padding: {cell}; text-align: left; vertical-align: top; border-bottom: 0.75pt solid {rule}; }}
.rm-table th {{ border-bottom: 1.5pt solid {accent}; }}
",
        page_rule = page_rule(page),
        width = twips_to_mm(page.width),
        top = twips_to_mm(page.margin_top),
        side = twips_to_mm(page.margin_left),
        font = body.font.css_stack(),
        size = f64::from(body.size) / 2.0,
        color = body.color.css(),
        line = f64::from(LINE_SPACING) / 240.0,
        hanging = pt(super::resolver::LIST_HANGING),
        accent = super::palette::Color::Accent.css(),
        rule = super::palette::Color::Rule.css(),
        cell = pt(super::resolver::CELL_MARGIN),
    )
}
