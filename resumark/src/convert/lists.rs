//! Flattening of `ul`/`ol` trees into list item blocks.
//!
//! Depth counts the list containers strictly between an item and the outermost list,
//! whatever their kind, so a `ul` inside an `ol` still adds a level. The `ordered` flag
//! comes from the nearest enclosing list only.

use super::dom::{children, is_element, tag};
use super::inline::{trim_blank_edges, InlineBuilder};
use super::tag::Tag;
use crate::ir::{Block, ListItem};
use crate::style::{resolve, BlockKind, StyleContext};
use markup5ever_rcdom::Handle;

/// Where a list sits in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListPosition {
    /// Ordinal of the outermost list in the document.
    pub list: usize,
    /// The list follows the document's first `h2` and renders without indentation.
    pub flat: bool,
}

/// One [`ListItem`] block per `li` under `list`, in document order.
pub fn nest(list: &Handle, position: ListPosition) -> Vec<Block> {
    let mut nester = Nester {
        position,
        items: Vec::new(),
    };
    let ordered = tag(list) == Some(Tag::OrderedList);
    nester.walk(list, 0, ordered);
    nester.items
}

struct Nester {
    position: ListPosition,
    items: Vec<Block>,
}

impl Nester {
    fn walk(&mut self, node: &Handle, depth: usize, ordered: bool) {
        for child in children(node).iter().filter(|child| is_element(child)) {
            match tag(child) {
                Some(Tag::ListItem) => {
                    self.item(child, depth, ordered);
                    self.walk(child, depth, ordered);
                }
                Some(nested) if nested.is_list() => {
                    self.walk(child, depth + 1, nested == Tag::OrderedList)
                }
                _ => self.walk(child, depth, ordered),
            }
        }
    }

    fn item(&mut self, li: &Handle, depth: usize, ordered: bool) {
        let ctx = StyleContext::new(BlockKind::ListItem).in_list(depth, self.position.flat);
        let runs = InlineBuilder::new(ctx).skipping_lists().build(li);
        let record = resolve(&ctx);
        self.items.push(Block::ListItem(ListItem {
            runs: trim_blank_edges(runs),
            ordered,
            depth,
            list: self.position.list,
            flat: self.position.flat,
            base: record.run,
            style: record.paragraph,
        }));
    }
}
