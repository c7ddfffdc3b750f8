//! The design system
//!
//!     One fixed style system drives both outputs. The converter asks [`resolve`] for a
//!     [`StyleRecord`] at every block and run it creates and stores the answer on the
//!     model; the DOCX writer copies those values into WordprocessingML and the HTML
//!     serializer turns them into CSS through [`css`]. Neither serializer owns a style
//!     table of its own, so the packaged document and the printed page cannot drift.
//!
//!     - palette.rs: colours and font families
//!     - resolver.rs: (block kind, inline flags, list context) → style record
//!     - page.rs: page sizes and margins
//!     - css.rs: style record → CSS declarations

pub mod css;
pub mod page;
pub mod palette;
pub mod resolver;

pub use page::{PageSetup, PageSize};
pub use palette::{Color, FontFamily};
pub use resolver::{
    document_defaults, resolve, BlockKind, Border, InlineFlags, ParagraphStyle, RunStyle,
    StyleContext, StyleRecord,
};
