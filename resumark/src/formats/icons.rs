//! Shared icon mapping for the block outline
//!
//! One Unicode glyph per block kind, so an outline can be scanned by shape.

/// Get the Unicode icon for a block or outline node kind
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Heading" => "§",
        "Paragraph" => "¶",
        "ListItem" => "•",
        "Quote" => "\"",
        "CodeBlock" => "𝒱",
        "InlineCode" => "ƒ",
        "Table" => "☰",
        "Row" => "≡",
        "ImagePlaceholder" => "▣",
        "Rule" => "⎯",
        "Run" => "◦",
        "Link" => "⊕",
        "LineBreak" => "↵",
        _ => "○",
    }
}
