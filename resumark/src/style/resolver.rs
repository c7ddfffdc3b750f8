//! The style resolver: a pure mapping from semantic context to concrete style.
//!
//! Both output paths (the DOCX package and the HTML page that is printed to PDF) read
//! their visual values from [`resolve`] and nothing else. The converter calls it while
//! building runs and blocks and stores the result on the model, so serializers never
//! re-derive style.
//!
//! Units follow WordprocessingML, the stricter of the two targets:
//! - font sizes in half-points (`21` = 10.5pt)
//! - spacing and indentation in twips (1/20 pt)
//! - border widths in eighths of a point

use super::palette::{Color, FontFamily};
use serde::Serialize;

/// Body text size (10.5pt).
pub const BODY_SIZE: u32 = 21;
/// Strong emphasis inside running text (12pt).
pub const STRONG_SIZE: u32 = 24;
/// Monospace text (9.5pt).
pub const CODE_SIZE: u32 = 19;
/// 1.5 line spacing in the `auto` line rule (240 = single).
pub const LINE_SPACING: u32 = 360;
/// Indentation step per list nesting level.
pub const LIST_INDENT: u32 = 720;
/// Hanging indent that leaves room for the list marker.
pub const LIST_HANGING: u32 = 360;
/// Inner cell padding for table cells.
pub const CELL_MARGIN: u32 = 120;

/// Structural role of the block a run lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    /// Bare text node found between blocks, parsed for literal emphasis markers. Its runs
    /// keep body size and colour whatever emphasis they carry.
    BareText,
    /// Formatting element found at block level without a paragraph around it.
    Fragment,
    ListItem,
    Quote,
    CodeBlock,
    InlineCode,
    TableCell { header: bool },
    ImagePlaceholder,
    Rule,
}

/// Inline formatting accumulated from ancestor elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InlineFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub code: bool,
    pub link: bool,
}

impl InlineFlags {
    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    pub fn underline(self) -> Self {
        Self {
            underline: true,
            ..self
        }
    }

    pub fn strike(self) -> Self {
        Self {
            strike: true,
            ..self
        }
    }

    pub fn code(self) -> Self {
        Self { code: true, ..self }
    }

    pub fn link(self) -> Self {
        Self { link: true, ..self }
    }
}

/// Everything the resolver needs to know about a position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleContext {
    pub block: BlockKind,
    pub inline: InlineFlags,
    /// List nesting depth, 0 outside lists.
    pub depth: usize,
    /// The list directly follows the document's first `h2` and renders without indentation.
    pub flat_list: bool,
}

impl StyleContext {
    pub fn new(block: BlockKind) -> Self {
        Self {
            block,
            inline: InlineFlags::default(),
            depth: 0,
            flat_list: false,
        }
    }

    pub fn with_inline(self, inline: InlineFlags) -> Self {
        Self { inline, ..self }
    }

    pub fn in_list(self, depth: usize, flat_list: bool) -> Self {
        Self {
            depth,
            flat_list,
            ..self
        }
    }
}

/// Character-level style of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStyle {
    pub font: FontFamily,
    pub size: u32,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
}

/// A single border edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Border {
    pub color: Color,
    pub size: u32,
}

/// Paragraph-level style of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParagraphStyle {
    pub spacing_before: u32,
    pub spacing_after: u32,
    pub line: Option<u32>,
    pub indent_left: u32,
    pub hanging: u32,
    pub border_left: Option<Border>,
    pub border_bottom: Option<Border>,
    pub shading: Option<Color>,
}

/// Resolved style for one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRecord {
    pub run: RunStyle,
    pub paragraph: ParagraphStyle,
    /// Run text is upper-cased after formatting (section banner headings).
    pub uppercase: bool,
}

/// Style every run starts from before block context applies.
pub fn document_defaults() -> RunStyle {
    RunStyle {
        font: FontFamily::Inter,
        size: BODY_SIZE,
        color: Color::Text,
        bold: false,
        italic: false,
        underline: false,
        strike: false,
    }
}

/// Resolve the style for a context. Pure and deterministic.
pub fn resolve(ctx: &StyleContext) -> StyleRecord {
    let flags = ctx.inline;
    let fixed = is_fixed_heading(ctx.block);
    let mut run = base_run(ctx.block);

    if flags.bold {
        run.bold = true;
        if strong_emphasis_applies(ctx.block) {
            run.size = STRONG_SIZE;
            run.color = Color::Ink;
        }
    }
    if flags.italic {
        run.italic = true;
        if !flags.bold && italic_tint_applies(ctx.block) {
            run.color = Color::Muted;
        }
    }
    run.underline |= flags.underline;
    run.strike |= flags.strike;

    if flags.code {
        run.font = FontFamily::CourierNew;
        run.color = Color::Code;
        if !fixed {
            run.size = CODE_SIZE;
        }
    }

    // Links win over everything an ancestor set.
    if flags.link {
        run.color = Color::Accent;
        run.underline = true;
    }

    StyleRecord {
        run,
        paragraph: paragraph_style(ctx),
        uppercase: ctx.block == BlockKind::Heading(2),
    }
}

fn is_fixed_heading(block: BlockKind) -> bool {
    matches!(block, BlockKind::Heading(1..=3))
}

fn strong_emphasis_applies(block: BlockKind) -> bool {
    matches!(
        block,
        BlockKind::Paragraph | BlockKind::Fragment | BlockKind::Heading(4..)
    )
}

fn italic_tint_applies(block: BlockKind) -> bool {
    matches!(
        block,
        BlockKind::Paragraph
            | BlockKind::Fragment
            | BlockKind::ListItem
            | BlockKind::TableCell { header: false }
    )
}

fn base_run(block: BlockKind) -> RunStyle {
    let defaults = document_defaults();
    match block {
        BlockKind::Heading(level) => {
            let size = match level {
                0 | 1 => 56,
                2 => 30,
                3 => 28,
                4 => 24,
                5 => 22,
                _ => BODY_SIZE,
            };
            RunStyle {
                size,
                color: Color::Ink,
                bold: true,
                ..defaults
            }
        }
        BlockKind::Paragraph
        | BlockKind::BareText
        | BlockKind::Fragment
        | BlockKind::ListItem
        | BlockKind::TableCell { header: false } => RunStyle {
            color: Color::Body,
            ..defaults
        },
        BlockKind::TableCell { header: true } => RunStyle {
            size: STRONG_SIZE,
            color: Color::Ink,
            bold: true,
            ..defaults
        },
        BlockKind::Quote => RunStyle {
            color: Color::Muted,
            italic: true,
            ..defaults
        },
        BlockKind::CodeBlock | BlockKind::InlineCode => RunStyle {
            font: FontFamily::CourierNew,
            size: CODE_SIZE,
            color: Color::Code,
            ..defaults
        },
        BlockKind::ImagePlaceholder => RunStyle {
            color: Color::Subtle,
            italic: true,
            ..defaults
        },
        BlockKind::Rule => defaults,
    }
}

fn paragraph_style(ctx: &StyleContext) -> ParagraphStyle {
    let accent_bar = Some(Border {
        color: Color::Accent,
        size: 32,
    });
    match ctx.block {
        BlockKind::Heading(level) => match level {
            0 | 1 => ParagraphStyle {
                spacing_after: 360,
                border_bottom: Some(Border {
                    color: Color::Accent,
                    size: 24,
                }),
                ..Default::default()
            },
            2 => ParagraphStyle {
                spacing_before: 480,
                spacing_after: 240,
                indent_left: 360,
                border_left: accent_bar,
                border_bottom: Some(Border {
                    color: Color::Rule,
                    size: 8,
                }),
                ..Default::default()
            },
            3 => spacing(360, 180),
            4 => spacing(200, 100),
            5 => spacing(150, 100),
            _ => spacing(100, 100),
        },
        BlockKind::Paragraph => ParagraphStyle {
            spacing_after: 240,
            line: Some(LINE_SPACING),
            ..Default::default()
        },
        BlockKind::BareText
        | BlockKind::Fragment
        | BlockKind::InlineCode
        | BlockKind::ImagePlaceholder => spacing(0, 150),
        BlockKind::ListItem => {
            let (indent_left, hanging) = if ctx.flat_list {
                (0, 0)
            } else {
                let step = u32::try_from(ctx.depth).unwrap_or(u32::MAX / LIST_INDENT);
                (LIST_INDENT.saturating_mul(step + 1), LIST_HANGING)
            };
            ParagraphStyle {
                spacing_after: 200,
                line: Some(LINE_SPACING),
                indent_left,
                hanging,
                ..Default::default()
            }
        }
        BlockKind::Quote => ParagraphStyle {
            spacing_before: 240,
            spacing_after: 240,
            line: Some(LINE_SPACING),
            indent_left: 720,
            border_left: accent_bar,
            shading: Some(Color::Shade),
            ..Default::default()
        },
        BlockKind::CodeBlock => ParagraphStyle {
            spacing_before: 200,
            spacing_after: 200,
            border_left: accent_bar,
            shading: Some(Color::CodeShade),
            ..Default::default()
        },
        BlockKind::TableCell { header } => ParagraphStyle {
            spacing_after: 120,
            line: Some(LINE_SPACING),
            shading: header.then_some(Color::Shade),
            ..Default::default()
        },
        BlockKind::Rule => spacing(0, 240),
    }
}

fn spacing(before: u32, after: u32) -> ParagraphStyle {
    ParagraphStyle {
        spacing_before: before,
        spacing_after: after,
        ..Default::default()
    }
}
