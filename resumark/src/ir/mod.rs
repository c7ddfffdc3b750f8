//! The block model: the output of conversion and the input of every serializer.
//!
//! A [`Document`] is a flat, ordered sequence of [`Block`]s. Nesting that matters for
//! rendering (list depth, header cells) is recorded on the blocks themselves, so a
//! serializer can walk the sequence once without tracking any tree state.

pub mod nodes;

pub use nodes::{
    plain_text, Alignment, Block, Cell, CodeBlock, Document, Heading, ImagePlaceholder,
    InlineCode, ListItem, Paragraph, Quote, Row, Rule, StyledRun, Table,
};
