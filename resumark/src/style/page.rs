//! Page geometry shared by the DOCX section properties and the printed page.

use serde::Serialize;

/// Supported paper sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" | "us-letter" => Some(PageSize::Letter),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
        }
    }

    /// Portrait geometry with the design system's 18mm/20mm margins.
    pub fn setup(self) -> PageSetup {
        let (width, height) = match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        };
        PageSetup {
            width,
            height,
            margin_top: 1021,
            margin_right: 1134,
            margin_bottom: 1021,
            margin_left: 1134,
        }
    }
}

/// Page dimensions and margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
}

impl Default for PageSetup {
    fn default() -> Self {
        PageSize::default().setup()
    }
}

/// Twips to millimetres, rounded to a tenth.
pub fn twips_to_mm(twips: u32) -> f64 {
    (f64::from(twips) * 25.4 / 1440.0 * 10.0).round() / 10.0
}
