//! HTML → block model conversion
//!
//!     The converter turns an HTML tree (usually produced from Markdown) into the flat
//!     block sequence in [`crate::ir`]. It is one synchronous pass with no shared state:
//!     every call owns its input tree and output blocks.
//!
//!     - dom.rs: parsing and read-only node helpers
//!     - tag.rs: the closed tag set
//!     - assembler.rs: top-level dispatch
//!     - inline.rs: runs for the children of one block element
//!     - emphasis.rs: literal `**` / `*` markup in bare text
//!     - lists.rs: list depth and ordering
//!     - tables.rs: rows, cells and header detection
//!
//!     Every run and block is styled through [`crate::style::resolve`] at the moment it is
//!     created.

pub mod assembler;
pub mod dom;
pub mod emphasis;
pub mod inline;
pub mod lists;
pub mod tables;
pub mod tag;

pub use assembler::assemble;
pub use dom::parse_html;
pub use emphasis::parse_emphasis;
pub use inline::InlineBuilder;
pub use lists::{nest, ListPosition};
pub use tables::{extract_table, TableError, MAX_COLUMNS};
pub use tag::Tag;
