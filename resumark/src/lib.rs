//! Markdown to styled DOCX and PDF for CV-style documents
//!
//!     This crate turns a Markdown document into two artifacts that must look alike: a Word
//!     package and a printed page. Markdown is rendered to HTML by comrak, the HTML tree is
//!     converted into a flat sequence of typed blocks with fully resolved styles, and each
//!     output is a plain mapping of those blocks.
//!
//!     TLDR: For format authors:
//!         - Never resolve a style in a serializer. Read it from the block.
//!         - New inputs produce HTML (or a block sequence directly); new outputs consume blocks.
//!         - Text outputs return strings, binary outputs return bytes through SerializedDocument.
//!
//!     This is a pure lib, that is, it powers the resumark CLI but is shell agnostic: no code
//!     here prints, reads the environment for configuration, or exits. The one exception is the
//!     PDF exporter, which has to launch a browser.
//!
//! Architecture
//!
//!     Data flows one way:
//!
//!         Markdown ──comrak──▶ HTML ──convert──▶ ir::Document ──formats──▶ DOCX / HTML / PDF
//!                                                      ▲
//!                                                  style::resolve
//!
//!     The converter (./convert) is the interesting part: a total, recursive walk of the HTML
//!     tree that dispatches on a closed tag set, builds styled runs with inherited formatting,
//!     flattens nested lists with their depth, and extracts tables. Every block and run it
//!     creates asks the style resolver (./style) for its values and stores the answer.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── publish.rs              # serialize + write to disk
//!     ├── convert                 # HTML tree → blocks
//!     ├── ir                      # the block model
//!     ├── style                   # palette, resolver, page geometry, CSS
//!     ├── formats
//!     │   ├── <format>
//!     │   │   └── mod.rs
//!     │   └── common              # option parsing and list markers shared by outputs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <area>.rs, fixtures/
//!
//!     Unit tests sit next to the code; the integration tests run whole documents through
//!     the public API.
//!
//! Conversion is deterministic: the same input always yields the same blocks and the same
//! text outputs. There is no shared state, so conversions can run in parallel freely.

pub mod convert;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod publish;
pub mod registry;
pub mod style;

pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use formats::markdown::{parse_markdown, MarkdownOptions};
pub use publish::{publish, publish_all, PublishArtifact, PublishResult, PublishSpec};
pub use registry::FormatRegistry;
