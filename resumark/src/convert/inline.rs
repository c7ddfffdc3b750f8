//! Inline run building.
//!
//! Walks the children of a block element and turns them into [`StyledRun`]s. Formatting
//! elements only add [`InlineFlags`]; the concrete font, size and colour of every run
//! come from the style resolver for the block the runs will live in.

use super::dom::{attr, children, has_children, tag, text_content, text_of};
use super::tag::Tag;
use crate::ir::StyledRun;
use crate::style::{resolve, InlineFlags, StyleContext};
use markup5ever_rcdom::Handle;

/// Create one run of `text` styled for `ctx`.
pub(crate) fn styled_run(ctx: &StyleContext, text: &str) -> StyledRun {
    let record = resolve(ctx);
    let text = if record.uppercase {
        text.to_uppercase()
    } else {
        text.to_string()
    };
    StyledRun::new(text, record.run)
}

/// Builds runs for one block context.
#[derive(Debug, Clone, Copy)]
pub struct InlineBuilder {
    ctx: StyleContext,
    skip_lists: bool,
}

impl InlineBuilder {
    pub fn new(ctx: StyleContext) -> Self {
        Self {
            ctx,
            skip_lists: false,
        }
    }

    /// Leave nested lists (and stray list items) out; the list nester emits them as
    /// blocks of their own.
    pub fn skipping_lists(self) -> Self {
        Self {
            skip_lists: true,
            ..self
        }
    }

    /// Runs for the children of `element`. Never empty.
    pub fn build(&self, element: &Handle) -> Vec<StyledRun> {
        let mut runs = Vec::new();
        self.children(element, self.ctx.inline, None, &mut runs);
        self.or_empty(runs)
    }

    /// Runs for `element` itself, so its own formatting applies. Never empty.
    pub fn build_including(&self, element: &Handle) -> Vec<StyledRun> {
        let mut runs = Vec::new();
        self.node(element, self.ctx.inline, None, &mut runs);
        self.or_empty(runs)
    }

    fn or_empty(&self, mut runs: Vec<StyledRun>) -> Vec<StyledRun> {
        if runs.is_empty() {
            runs.push(styled_run(&self.ctx, ""));
        }
        runs
    }

    fn children(
        &self,
        element: &Handle,
        flags: InlineFlags,
        link: Option<&str>,
        out: &mut Vec<StyledRun>,
    ) {
        for child in children(element) {
            self.node(&child, flags, link, out);
        }
    }

    fn node(
        &self,
        node: &Handle,
        flags: InlineFlags,
        link: Option<&str>,
        out: &mut Vec<StyledRun>,
    ) {
        if let Some(text) = text_of(node) {
            out.push(self.run(&text, flags, link));
            return;
        }
        let Some(tag) = tag(node) else {
            return;
        };
        match tag {
            Tag::Bold => self.children(node, flags.bold(), link, out),
            Tag::Italic => self.children(node, flags.italic(), link, out),
            Tag::Underline => self.children(node, flags.underline(), link, out),
            Tag::Strike => self.children(node, flags.strike(), link, out),
            Tag::Code => self.children(node, flags.code(), link, out),
            Tag::Link => self.link(node, flags, out),
            Tag::LineBreak => {
                let style = resolve(&self.ctx.with_inline(flags)).run;
                out.push(StyledRun::line_break(style));
            }
            Tag::Span | Tag::Div => self.children(node, flags, link, out),
            Tag::UnorderedList | Tag::OrderedList | Tag::ListItem if self.skip_lists => {}
            Tag::Image => {
                let label = attr(node, "alt")
                    .filter(|alt| !alt.is_empty())
                    .or_else(|| attr(node, "src"))
                    .unwrap_or_default();
                if !label.is_empty() {
                    out.push(self.run(&format!("[Image: {label}]"), flags.italic(), link));
                }
            }
            _ if has_children(node) => self.children(node, flags, link, out),
            _ => {
                let text = text_content(node);
                if !text.is_empty() {
                    out.push(self.run(&text, flags, link));
                }
            }
        }
    }

    fn link(&self, node: &Handle, flags: InlineFlags, out: &mut Vec<StyledRun>) {
        let href = attr(node, "href").unwrap_or_default();
        let target = (!href.is_empty()).then_some(href.as_str());
        let flags = flags.link();

        let mut inner = Vec::new();
        self.children(node, flags, target, &mut inner);
        let has_text = inner.iter().any(|run| !run.text.trim().is_empty());
        if !has_text && !href.is_empty() {
            out.push(self.run(&href, flags, target));
        } else {
            out.extend(inner);
        }
    }

    fn run(&self, text: &str, flags: InlineFlags, link: Option<&str>) -> StyledRun {
        let run = styled_run(&self.ctx.with_inline(flags), text);
        match link {
            Some(target) => run.with_link(target),
            None => run,
        }
    }
}

/// Drop whitespace-only runs at both ends of a block. Keeps one empty run if nothing
/// else is left.
pub fn trim_blank_edges(mut runs: Vec<StyledRun>) -> Vec<StyledRun> {
    let blank = |run: &StyledRun| !run.line_break && run.text.trim().is_empty();
    let Some(start) = runs.iter().position(|run| !blank(run)) else {
        runs.truncate(1);
        return runs.into_iter().map(|run| run.with_text("")).collect();
    };
    let end = runs.iter().rposition(|run| !blank(run)).unwrap_or(start);
    runs.truncate(end + 1);
    runs.drain(..start);
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::dom::{find_first_element, parse_tree};
    use crate::ir::plain_text;
    use crate::style::{BlockKind, Color, FontFamily};

    /// Builds runs for the first `name` element while its tree is alive.
    fn runs_of(html: &str, name: &str, builder: InlineBuilder) -> Vec<StyledRun> {
        let dom = parse_tree(html);
        let element = find_first_element(&dom.document, name).unwrap();
        builder.build(&element)
    }

    fn paragraph_runs(html: &str) -> Vec<StyledRun> {
        runs_of(
            html,
            "p",
            InlineBuilder::new(StyleContext::new(BlockKind::Paragraph)),
        )
    }

    #[test]
    fn nested_formatting_is_additive() {
        let runs = paragraph_runs("<p><strong>a<em>b</em></strong></p>");
        assert_eq!(runs.len(), 2);
        assert!(runs[0].style.bold && !runs[0].style.italic);
        assert!(runs[1].style.bold && runs[1].style.italic);
    }

    #[test]
    fn whitespace_between_inline_elements_is_kept() {
        let runs = paragraph_runs("<p><strong>a</strong> <em>b</em></p>");
        assert_eq!(plain_text(&runs), "a b");
        assert_eq!(runs.len(), 3);
    }

    #[test]
    fn link_recolours_but_keeps_bold() {
        let runs = paragraph_runs(r#"<p><strong><a href="https://x.test">site</a></strong></p>"#);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].style.color, Color::Accent);
        assert!(runs[0].style.underline);
        assert!(runs[0].style.bold);
        assert_eq!(runs[0].link.as_deref(), Some("https://x.test"));
    }

    #[test]
    fn empty_link_falls_back_to_href() {
        let runs = paragraph_runs(r#"<p><a href="https://x.test"></a></p>"#);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "https://x.test");
        assert_eq!(runs[0].link.as_deref(), Some("https://x.test"));
    }

    #[test]
    fn code_keeps_ancestor_emphasis() {
        let runs = paragraph_runs("<p><em><code>x</code></em></p>");
        assert_eq!(runs[0].style.font, FontFamily::CourierNew);
        assert_eq!(runs[0].style.color, Color::Code);
        assert!(runs[0].style.italic);
    }

    #[test]
    fn br_is_a_break_marker() {
        let runs = paragraph_runs("<p>a<br>b</p>");
        assert_eq!(runs.len(), 3);
        assert!(runs[1].line_break);
        assert_eq!(runs[1].text, "");
    }

    #[test]
    fn empty_element_yields_one_empty_run() {
        let runs = paragraph_runs("<p></p>");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "");
    }

    #[test]
    fn unknown_inline_tags_recurse() {
        let runs = paragraph_runs("<p><mark>hi <kbd>k</kbd></mark></p>");
        assert_eq!(plain_text(&runs), "hi k");
    }

    #[test]
    fn h2_text_is_upper_cased() {
        let runs = runs_of(
            "<h2>skills <em>and</em> tools</h2>",
            "h2",
            InlineBuilder::new(StyleContext::new(BlockKind::Heading(2))),
        );
        assert_eq!(plain_text(&runs), "SKILLS AND TOOLS");
    }

    #[test]
    fn lists_are_skipped_on_request() {
        let html = "<ul><li>outer<ul><li>inner</li></ul></li></ul>";
        let ctx = StyleContext::new(BlockKind::ListItem);
        assert_eq!(
            plain_text(&runs_of(html, "li", InlineBuilder::new(ctx))),
            "outerinner"
        );
        assert_eq!(
            plain_text(&runs_of(html, "li", InlineBuilder::new(ctx).skipping_lists())),
            "outer"
        );
    }

    #[test]
    fn trim_drops_blank_edges_only() {
        let style = crate::style::document_defaults();
        let runs = vec![
            StyledRun::new("\n", style),
            StyledRun::new("a", style),
            StyledRun::new(" ", style),
            StyledRun::new("b", style),
            StyledRun::new("  ", style),
        ];
        assert_eq!(plain_text(&trim_blank_edges(runs)), "a b");

        let blank = trim_blank_edges(vec![StyledRun::new(" ", style), StyledRun::new("\n", style)]);
        assert_eq!(blank.len(), 1);
        assert_eq!(blank[0].text, "");
    }
}
