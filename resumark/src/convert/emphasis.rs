//! Literal `**bold**` / `*italic*` markup in bare text.
//!
//! Text that reaches the converter outside any element never went through the Markdown
//! emphasis rules, so its delimiters are still literal asterisks. The scan is two-level
//! and left to right: bold spans are found first, the text between them is scanned for
//! italics, and bold spans are not scanned again. `**a *b* c**` therefore yields one bold
//! run containing the asterisks around `b`.
//!
//! Unterminated delimiters are kept as literal text, so no input character other than a
//! matched delimiter pair is ever dropped.

use super::inline::styled_run;
use crate::ir::StyledRun;
use crate::style::{InlineFlags, StyleContext};

/// Split `text` into plain, bold and italic runs styled for `ctx`.
///
/// Always returns at least one run.
pub fn parse_emphasis(text: &str, ctx: &StyleContext) -> Vec<StyledRun> {
    let mut scanner = Scanner {
        ctx,
        runs: Vec::new(),
    };
    scanner.bold(text);
    if scanner.runs.is_empty() {
        scanner.runs.push(styled_run(ctx, ""));
    }
    scanner.runs
}

struct Scanner<'a> {
    ctx: &'a StyleContext,
    runs: Vec<StyledRun>,
}

impl Scanner<'_> {
    fn bold(&mut self, text: &str) {
        let mut rest = text;
        while let Some(open) = rest.find("**") {
            self.italic(&rest[..open]);
            let after = &rest[open + 2..];
            match after.find("**") {
                Some(close) => {
                    self.push(&after[..close], InlineFlags::default().bold());
                    rest = &after[close + 2..];
                }
                None => {
                    self.push("**", InlineFlags::default());
                    self.italic(after);
                    return;
                }
            }
        }
        self.italic(rest);
    }

    fn italic(&mut self, text: &str) {
        let mut rest = text;
        while let Some(open) = rest.find('*') {
            self.push(&rest[..open], InlineFlags::default());
            let after = &rest[open + 1..];
            match after.find('*') {
                Some(close) => {
                    self.push(&after[..close], InlineFlags::default().italic());
                    rest = &after[close + 1..];
                }
                None => {
                    self.push(&rest[open..], InlineFlags::default());
                    return;
                }
            }
        }
        self.push(rest, InlineFlags::default());
    }

    fn push(&mut self, text: &str, flags: InlineFlags) {
        if !text.is_empty() {
            self.runs.push(styled_run(&self.ctx.with_inline(flags), text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::plain_text;
    use crate::style::resolver::BODY_SIZE;
    use crate::style::{BlockKind, Color};

    fn parse(text: &str) -> Vec<StyledRun> {
        parse_emphasis(text, &StyleContext::new(BlockKind::BareText))
    }

    fn shape(runs: &[StyledRun]) -> Vec<(&str, bool, bool)> {
        runs.iter()
            .map(|run| (run.text.as_str(), run.style.bold, run.style.italic))
            .collect()
    }

    #[test]
    fn splits_bold_and_italic() {
        let runs = parse("a **b** c *d* e");
        assert_eq!(
            shape(&runs),
            vec![
                ("a ", false, false),
                ("b", true, false),
                (" c ", false, false),
                ("d", false, true),
                (" e", false, false),
            ]
        );
    }

    #[test]
    fn unterminated_bold_keeps_delimiters() {
        let runs = parse("**bold without end");
        assert_eq!(plain_text(&runs), "**bold without end");
        assert!(runs.iter().all(|run| !run.style.bold));
    }

    #[test]
    fn unterminated_bold_still_scans_italics() {
        let runs = parse("**x *y*");
        assert_eq!(
            shape(&runs),
            vec![("**", false, false), ("x ", false, false), ("y", false, true)]
        );
    }

    #[test]
    fn unterminated_italic_is_literal() {
        let runs = parse("5 * 3");
        assert_eq!(plain_text(&runs), "5 * 3");
        assert!(runs.iter().all(|run| !run.style.italic));
    }

    #[test]
    fn bold_spans_are_not_rescanned() {
        let runs = parse("**a *b* c**");
        assert_eq!(shape(&runs), vec![("a *b* c", true, false)]);
    }

    #[test]
    fn empty_input_yields_one_empty_run() {
        let runs = parse("");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "");
    }

    #[test]
    fn emphasis_in_bare_text_keeps_body_size_and_colour() {
        let runs = parse("**Lead** and *aside*");
        assert_eq!(shape(&runs)[0], ("Lead", true, false));
        assert_eq!(shape(&runs)[2], ("aside", false, true));
        for run in &runs {
            assert_eq!(run.style.size, BODY_SIZE);
            assert_eq!(run.style.color, Color::Body);
        }
    }
}
