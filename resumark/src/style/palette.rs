//! Fixed colour palette and font families of the design system.

use serde::{Serialize, Serializer};

/// Every colour the design system uses. Nothing outside this palette is ever emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Document default text (`#1f2937`)
    Text,
    /// Headings and strong emphasis (`#111827`)
    Ink,
    /// Body copy in paragraphs, lists and table cells (`#374151`)
    Body,
    /// Quotes and italic emphasis (`#4b5563`)
    Muted,
    /// Captions and placeholders (`#6b7280`)
    Subtle,
    /// Links, heading rules, quote bars (`#2563eb`)
    Accent,
    /// Inline and block code (`#dc2626`)
    Code,
    /// Hairline rules (`#e5e7eb`)
    Rule,
    /// Quote and header-cell background (`#f9fafb`)
    Shade,
    /// Code block background (`#f3f4f6`)
    CodeShade,
}

impl Color {
    /// Hex triplet without the leading `#`, as WordprocessingML expects it.
    pub fn hex(self) -> &'static str {
        match self {
            Color::Text => "1f2937",
            Color::Ink => "111827",
            Color::Body => "374151",
            Color::Muted => "4b5563",
            Color::Subtle => "6b7280",
            Color::Accent => "2563eb",
            Color::Code => "dc2626",
            Color::Rule => "e5e7eb",
            Color::Shade => "f9fafb",
            Color::CodeShade => "f3f4f6",
        }
    }

    /// CSS form (`#rrggbb`).
    pub fn css(self) -> String {
        format!("#{}", self.hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

/// Font families used by runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Inter,
    CourierNew,
}

impl FontFamily {
    /// Family name as written into the package.
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::CourierNew => "Courier New",
        }
    }

    /// CSS font stack with fallbacks for the page renderer.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Inter => {
                "\"Inter\", system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif"
            }
            FontFamily::CourierNew => {
                "\"SF Mono\", Monaco, Inconsolata, \"Fira Code\", \"Courier New\", monospace"
            }
        }
    }
}

impl Serialize for FontFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
