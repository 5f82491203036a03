//! Per-run composition state.

use super::{FillCache, FontCache, FontName};
use crate::table::FontRole;

/// Distance of the table from the viewport's top-left corner.
pub const DEFAULT_OFFSET: (f64, f64) = (100.0, 100.0);

/// Caches and placement settings owned by a single table-generation run.
///
/// Each run gets a fresh session, so fonts and paints never leak between
/// runs.
#[derive(Debug, Clone)]
pub struct CompositionSession {
    pub fonts: FontCache,
    pub fills: FillCache,
    pub offset: (f64, f64),
}

impl Default for CompositionSession {
    fn default() -> Self {
        Self {
            fonts: FontCache::new(),
            fills: FillCache::new(),
            offset: DEFAULT_OFFSET,
        }
    }
}

impl CompositionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = (x, y);
        self
    }

    #[must_use]
    pub fn with_font(mut self, role: FontRole, font: FontName) -> Self {
        self.fonts = self.fonts.with_override(role, font);
        self
    }
}
