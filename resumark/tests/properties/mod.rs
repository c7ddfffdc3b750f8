use proptest::prelude::*;
use resumark::convert::{parse_emphasis, parse_html};
use resumark::formats::html::serialize_to_html;
use resumark::ir::plain_text;
use resumark::style::{BlockKind, StyleContext};
use resumark::{parse_markdown, MarkdownOptions};

fn markdown_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,20}".prop_map(|s| format!("# {s}")),
        "[a-zA-Z ]{0,20}".prop_map(|s| format!("## {s}")),
        "[a-zA-Z*_ ]{0,30}",
        "[a-zA-Z ]{1,15}".prop_map(|s| format!("- {s}")),
        "[a-zA-Z ]{1,15}".prop_map(|s| format!("  - {s}")),
        "[a-zA-Z ]{1,15}".prop_map(|s| format!("1. {s}")),
        "[a-zA-Z ]{1,10}".prop_map(|s| format!("| {s} | x |")),
        Just("|---|---|".to_string()),
        Just("---".to_string()),
        Just(String::new()),
    ]
}

proptest! {
    #[test]
    fn conversion_is_deterministic(lines in prop::collection::vec(markdown_line(), 0..25)) {
        let source = lines.join("\n");
        let options = MarkdownOptions::default();
        let first = parse_markdown(&source, &options);
        let second = parse_markdown(&source, &options);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serialize_to_html(&first).unwrap(),
            serialize_to_html(&second).unwrap()
        );
    }

    #[test]
    fn emphasis_only_drops_matched_delimiters(text in "[a-z *]{0,40}") {
        let ctx = StyleContext::new(BlockKind::BareText);
        let runs = parse_emphasis(&text, &ctx);
        prop_assert!(!runs.is_empty());
        prop_assert_eq!(plain_text(&runs).replace('*', ""), text.replace('*', ""));
    }

    #[test]
    fn text_without_delimiters_is_one_plain_run(text in "[a-z ]{1,40}") {
        let ctx = StyleContext::new(BlockKind::BareText);
        let runs = parse_emphasis(&text, &ctx);
        prop_assert_eq!(runs.len(), 1);
        prop_assert_eq!(&runs[0].text, &text);
        prop_assert!(!runs[0].style.bold && !runs[0].style.italic);
    }

    #[test]
    fn any_html_converts(html in "[<>/a-z =\"]{0,80}") {
        let doc = parse_html(&html);
        prop_assert_eq!(doc.clone(), parse_html(&html));
    }
}
