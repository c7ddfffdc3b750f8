//! The block assembler: dispatches top-level nodes to the specialised builders.
//!
//! Dispatch is total. Structural wrappers and unknown elements contribute no block of
//! their own and are walked for their descendants; nothing in the input tree can make
//! assembly fail.

use super::dom::{
    alignment, attr, children, find_first_element, is_element, tag, text_content, text_of,
};
use super::emphasis::parse_emphasis;
use super::inline::{trim_blank_edges, InlineBuilder};
use super::lists::{nest, ListPosition};
use super::tables::extract_table;
use super::tag::Tag;
use crate::ir::{
    Alignment, Block, CodeBlock, Heading, ImagePlaceholder, InlineCode, Paragraph, Quote, Rule,
    StyledRun,
};
use crate::style::{resolve, BlockKind, StyleContext};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

/// Convert an ordered node list into blocks.
pub fn assemble(nodes: &[Handle]) -> Vec<Block> {
    let mut assembler = Assembler {
        blocks: Vec::new(),
        first_h2: nodes
            .iter()
            .find_map(|node| find_first_element(node, "h2")),
        lists: 0,
    };
    assembler.visit_all(nodes);
    assembler.blocks
}

struct Assembler {
    blocks: Vec<Block>,
    first_h2: Option<Handle>,
    /// Outermost lists seen so far.
    lists: usize,
}

impl Assembler {
    fn visit_all(&mut self, nodes: &[Handle]) {
        let mut previous: Option<&Handle> = None;
        for node in nodes {
            self.visit(node, previous);
            if is_element(node) {
                previous = Some(node);
            }
        }
    }

    fn visit(&mut self, node: &Handle, previous: Option<&Handle>) {
        if let Some(text) = text_of(node) {
            self.bare_text(&text);
            return;
        }
        let Some(tag) = tag(node) else {
            return;
        };
        match tag {
            Tag::Heading(level) => {
                let ctx = StyleContext::new(BlockKind::Heading(level));
                let record = resolve(&ctx);
                self.blocks.push(Block::Heading(Heading {
                    level,
                    runs: runs(ctx, node),
                    base: record.run,
                    style: record.paragraph,
                }));
            }
            Tag::Paragraph => {
                let ctx = StyleContext::new(BlockKind::Paragraph);
                let record = resolve(&ctx);
                self.blocks.push(Block::Paragraph(Paragraph {
                    runs: runs(ctx, node),
                    alignment: alignment(node),
                    base: record.run,
                    style: record.paragraph,
                }));
            }
            Tag::UnorderedList | Tag::OrderedList => {
                let position = ListPosition {
                    list: self.lists,
                    flat: self.follows_first_h2(previous),
                };
                self.lists += 1;
                self.blocks.extend(nest(node, position));
            }
            Tag::Blockquote => {
                let ctx = StyleContext::new(BlockKind::Quote);
                let record = resolve(&ctx);
                self.blocks.push(Block::Quote(Quote {
                    runs: runs(ctx, node),
                    base: record.run,
                    style: record.paragraph,
                }));
            }
            Tag::Pre => self.code_block(node),
            Tag::Code => {
                let ctx = StyleContext::new(BlockKind::InlineCode);
                let record = resolve(&ctx);
                self.blocks.push(Block::InlineCode(InlineCode {
                    runs: runs(ctx, node),
                    base: record.run,
                    style: record.paragraph,
                }));
            }
            Tag::Table => match extract_table(node) {
                Ok(Some(table)) => self.blocks.push(Block::Table(table)),
                Ok(None) => log::debug!("skipping table without rows"),
                Err(err) => log::warn!("dropping table: {err}"),
            },
            Tag::Rule | Tag::LineBreak => self.blocks.push(Block::Rule(Rule {
                style: resolve(&StyleContext::new(BlockKind::Rule)).paragraph,
            })),
            Tag::Image => self.image(node),
            inline if inline.is_inline_wrapper() => {
                let ctx = StyleContext::new(BlockKind::Fragment);
                let runs = InlineBuilder::new(ctx).build_including(node);
                let record = resolve(&ctx);
                self.blocks.push(Block::Paragraph(Paragraph {
                    runs: trim_blank_edges(runs),
                    alignment: Alignment::Left,
                    base: record.run,
                    style: record.paragraph,
                }));
            }
            _ => self.visit_all(&children(node)),
        }
    }

    fn bare_text(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        let ctx = StyleContext::new(BlockKind::BareText);
        let record = resolve(&ctx);
        self.blocks.push(Block::Paragraph(Paragraph {
            runs: parse_emphasis(trimmed, &ctx),
            alignment: Alignment::Left,
            base: record.run,
            style: record.paragraph,
        }));
    }

    fn code_block(&mut self, pre: &Handle) {
        let language = children(pre)
            .iter()
            .find(|child| tag(child) == Some(Tag::Code))
            .and_then(|code| attr(code, "class"))
            .and_then(|class| {
                class
                    .split_whitespace()
                    .find_map(|name| name.strip_prefix("language-").map(str::to_string))
            });
        let record = resolve(&StyleContext::new(BlockKind::CodeBlock));
        self.blocks.push(Block::CodeBlock(CodeBlock {
            text: text_content(pre),
            language,
            run: record.run,
            style: record.paragraph,
        }));
    }

    fn image(&mut self, img: &Handle) {
        let alt = attr(img, "alt")
            .filter(|alt| !alt.is_empty())
            .or_else(|| attr(img, "src"))
            .unwrap_or_default();
        if alt.is_empty() {
            return;
        }
        let record = resolve(&StyleContext::new(BlockKind::ImagePlaceholder));
        self.blocks.push(Block::ImagePlaceholder(ImagePlaceholder {
            alt_text: alt,
            run: record.run,
            style: record.paragraph,
        }));
    }

    fn follows_first_h2(&self, previous: Option<&Handle>) -> bool {
        match (previous, &self.first_h2) {
            (Some(previous), Some(h2)) => Rc::ptr_eq(previous, h2),
            _ => false,
        }
    }
}

fn runs(ctx: StyleContext, node: &Handle) -> Vec<StyledRun> {
    trim_blank_edges(InlineBuilder::new(ctx).build(node))
}
