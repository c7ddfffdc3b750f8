//! The closed set of HTML tags the converter distinguishes.

/// An element name, folded to the role it plays during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Heading(u8),
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Blockquote,
    Pre,
    Code,
    Table,
    /// `thead`, `tbody` and `tfoot`.
    TableSection,
    TableRow,
    HeaderCell,
    DataCell,
    /// `hr`
    Rule,
    /// `br`
    LineBreak,
    Div,
    Section,
    Image,
    /// `strong` and `b`
    Bold,
    /// `em` and `i`
    Italic,
    Underline,
    /// `s`, `del` and `strike`
    Strike,
    Link,
    Span,
    Other,
}

impl Tag {
    /// Map a local element name. Matching is case-insensitive; anything unknown is `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "p" => Tag::Paragraph,
            "ul" => Tag::UnorderedList,
            "ol" => Tag::OrderedList,
            "li" => Tag::ListItem,
            "blockquote" => Tag::Blockquote,
            "pre" => Tag::Pre,
            "code" => Tag::Code,
            "table" => Tag::Table,
            "thead" | "tbody" | "tfoot" => Tag::TableSection,
            "tr" => Tag::TableRow,
            "th" => Tag::HeaderCell,
            "td" => Tag::DataCell,
            "hr" => Tag::Rule,
            "br" => Tag::LineBreak,
            "div" => Tag::Div,
            "section" => Tag::Section,
            "img" => Tag::Image,
            "strong" | "b" => Tag::Bold,
            "em" | "i" => Tag::Italic,
            "u" => Tag::Underline,
            "s" | "del" | "strike" => Tag::Strike,
            "a" => Tag::Link,
            "span" => Tag::Span,
            _ => Tag::Other,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, Tag::UnorderedList | Tag::OrderedList)
    }

    /// Formatting-only elements that become a standalone paragraph at block level.
    pub fn is_inline_wrapper(self) -> bool {
        matches!(
            self,
            Tag::Bold | Tag::Italic | Tag::Underline | Tag::Strike | Tag::Link | Tag::Span
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_synonyms() {
        assert_eq!(Tag::from_name("b"), Tag::Bold);
        assert_eq!(Tag::from_name("STRONG"), Tag::Bold);
        assert_eq!(Tag::from_name("del"), Tag::Strike);
        assert_eq!(Tag::from_name("tbody"), Tag::TableSection);
        assert_eq!(Tag::from_name("h6"), Tag::Heading(6));
    }

    #[test]
    fn unknown_names_are_other() {
        assert_eq!(Tag::from_name("h7"), Tag::Other);
        assert_eq!(Tag::from_name("article"), Tag::Other);
        assert_eq!(Tag::from_name(""), Tag::Other);
    }

    #[test]
    fn wrapper_and_list_predicates() {
        assert!(Tag::OrderedList.is_list());
        assert!(!Tag::ListItem.is_list());
        assert!(Tag::Span.is_inline_wrapper());
        assert!(!Tag::Code.is_inline_wrapper());
        assert!(!Tag::Div.is_inline_wrapper());
    }
}
