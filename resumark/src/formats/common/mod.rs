//! Helpers shared by the output formats: option parsing and list markers.

use crate::error::FormatError;
use crate::ir::ListItem;
use crate::style::PageSize;
use std::collections::HashMap;

/// The `page-size` option, A4 when absent.
pub fn page_size_option(options: &HashMap<String, String>) -> Result<PageSize, FormatError> {
    match options.get("page-size") {
        None => Ok(PageSize::default()),
        Some(name) => PageSize::from_name(name).ok_or_else(|| {
            FormatError::NotSupported(format!(
                "Unknown page size '{name}' (expected a4 or letter)"
            ))
        }),
    }
}

/// Parse a boolean option. A bare flag (empty value) counts as `true`.
pub fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    let Some(value) = options.get(key) else {
        return Ok(default);
    };
    if value.is_empty() {
        return Ok(true);
    }
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::SerializationError(format!(
            "Invalid boolean value '{other}' for --extra-{key}"
        ))),
    }
}

/// Glyph for unordered items at the top level.
pub const TOP_BULLET: &str = "▸";
/// Glyph for unordered items below the top level.
pub const NESTED_BULLET: &str = "▪";

/// Computes list markers while walking a block sequence in order.
///
/// Numbering restarts for every outermost list and for every nested list run below
/// an item of a shallower depth.
#[derive(Debug, Default)]
pub struct Markers {
    list: Option<usize>,
    counters: Vec<usize>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker for the next item, `None` for personal-info lists.
    pub fn next(&mut self, item: &ListItem) -> Option<String> {
        if self.list != Some(item.list) {
            self.list = Some(item.list);
            self.counters.clear();
        }
        self.counters.resize(item.depth + 1, 0);
        self.counters[item.depth] += 1;

        if item.flat {
            return None;
        }
        Some(if item.ordered {
            format!("{}.", self.counters[item.depth])
        } else if item.depth == 0 {
            TOP_BULLET.to_string()
        } else {
            NESTED_BULLET.to_string()
        })
    }
}
