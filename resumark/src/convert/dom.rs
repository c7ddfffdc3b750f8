//! HTML input: parsing into an rcdom tree and read-only node helpers.

use super::assembler::assemble;
use super::tag::Tag;
use crate::ir::{Alignment, Document};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML document or fragment and convert its body into blocks.
pub fn parse_html(html: &str) -> Document {
    let dom = parse_tree(html);
    let Some(body) = find_first_element(&dom.document, "body") else {
        return Document::default();
    };
    let nodes: Vec<Handle> = body.children.borrow().iter().cloned().collect();
    log::debug!("assembling {} top-level nodes", nodes.len());
    let document = Document::new(assemble(&nodes));
    log::debug!("assembled {} blocks", document.blocks.len());
    document
}

/// Parse HTML into a DOM. Fragments get the implied `html`/`body` wrappers.
pub fn parse_tree(html: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
}

/// Lower-cased local name, `None` for non-elements.
pub fn tag_name(handle: &Handle) -> Option<String> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref().to_ascii_lowercase()),
        _ => None,
    }
}

pub fn tag(handle: &Handle) -> Option<Tag> {
    tag_name(handle).map(|name| Tag::from_name(&name))
}

pub fn is_element(handle: &Handle) -> bool {
    matches!(handle.data, NodeData::Element { .. })
}

pub fn attr(handle: &Handle, name: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref().eq_ignore_ascii_case(name))
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Contents of a text node, `None` for anything else.
pub fn text_of(handle: &Handle) -> Option<String> {
    match handle.data {
        NodeData::Text { ref contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// Concatenated text of all descendant text nodes.
pub fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    collect_text(handle, &mut text);
    text
}

fn collect_text(handle: &Handle, text: &mut String) {
    match handle.data {
        NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_text(child, text);
            }
        }
        _ => {}
    }
}

pub fn children(handle: &Handle) -> Vec<Handle> {
    handle.children.borrow().iter().cloned().collect()
}

pub fn has_children(handle: &Handle) -> bool {
    !handle.children.borrow().is_empty()
}

/// First element with the given name in document order, including `handle` itself.
pub fn find_first_element(handle: &Handle, name: &str) -> Option<Handle> {
    if tag_name(handle).as_deref() == Some(name) {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_first_element(child, name))
}

/// Alignment from an inline `text-align` declaration, else the `align` attribute.
pub fn alignment(handle: &Handle) -> Alignment {
    let from_style = attr(handle, "style").and_then(|style| {
        style.split(';').find_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            property
                .trim()
                .eq_ignore_ascii_case("text-align")
                .then(|| value.to_string())
        })
    });
    from_style
        .or_else(|| attr(handle, "align"))
        .map(|value| Alignment::from_value(&value))
        .unwrap_or_default()
}
