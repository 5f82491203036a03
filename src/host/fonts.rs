//! Font selection with per-role fallback chains.

use super::{Canvas, CanvasError};
use crate::table::FontRole;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A concrete font face.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    #[must_use]
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl std::fmt::Display for FontName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

const PRIMARY: &[(&str, &str)] = &[
    ("Inter", "Regular"),
    ("Roboto", "Regular"),
    ("Arial", "Regular"),
];
const SECONDARY: &[(&str, &str)] = &[
    ("Roboto Mono", "Regular"),
    ("Source Code Pro", "Regular"),
    ("Courier New", "Regular"),
    ("Inter", "Regular"),
];
const HEADER: &[(&str, &str)] = &[
    ("Inter", "Semi Bold"),
    ("Inter", "Bold"),
    ("Roboto", "Medium"),
    ("Arial", "Bold"),
];
const FALLBACK: &[(&str, &str)] = &[("Inter", "Regular"), ("Roboto", "Regular")];

impl FontRole {
    /// Fonts to try for this role, most preferred first.
    #[must_use]
    pub fn fallbacks(&self) -> Vec<FontName> {
        let chain = match self {
            Self::Primary => PRIMARY,
            Self::Secondary => SECONDARY,
            Self::Header => HEADER,
            Self::Fallback => FALLBACK,
        };
        chain
            .iter()
            .map(|(family, style)| FontName::new(*family, *style))
            .collect()
    }
}

/// Fonts resolved for one composition session, one lookup per role.
#[derive(Debug, Clone, Default)]
pub struct FontCache {
    resolved: HashMap<FontRole, FontName>,
    overrides: HashMap<FontRole, FontName>,
}

impl FontCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Try `font` before the built-in chain for `role`.
    #[must_use]
    pub fn with_override(mut self, role: FontRole, font: FontName) -> Self {
        self.overrides.insert(role, font);
        self
    }

    fn chain(&self, role: FontRole) -> Vec<FontName> {
        let mut chain: Vec<FontName> = self.overrides.get(&role).cloned().into_iter().collect();
        chain.extend(role.fallbacks());
        chain
    }

    /// Font to use for `role`, loading it on first use.
    ///
    /// Walks the role's chain and keeps the first font the canvas can load.
    /// When none loads, the last entry is used anyway; this never fails.
    pub fn resolve<C: Canvas + ?Sized>(&mut self, role: FontRole, canvas: &mut C) -> FontName {
        if let Some(font) = self.resolved.get(&role) {
            return font.clone();
        }

        let chain = self.chain(role);
        let mut last_error: Option<CanvasError> = None;
        let mut chosen = None;
        for font in &chain {
            match canvas.load_font(font) {
                Ok(()) => {
                    chosen = Some(font.clone());
                    break;
                }
                Err(err) => {
                    tracing::debug!(font = %font, error = %err, "font not available");
                    last_error = Some(err);
                }
            }
        }

        let font = chosen.unwrap_or_else(|| {
            let last = chain
                .last()
                .cloned()
                .unwrap_or_else(|| FontName::new("Inter", "Regular"));
            tracing::warn!(
                role = ?role,
                font = %last,
                error = ?last_error,
                "no font in fallback chain loaded, using last fallback"
            );
            last
        });

        self.resolved.insert(role, font.clone());
        font
    }

    #[must_use]
    pub fn loaded(&self) -> usize {
        self.resolved.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryCanvas;

    #[test]
    fn test_first_available_font_wins() {
        let mut canvas = MemoryCanvas::new();
        let mut fonts = FontCache::new();
        assert_eq!(
            fonts.resolve(FontRole::Header, &mut canvas),
            FontName::new("Inter", "Semi Bold")
        );
    }

    #[test]
    fn test_falls_through_unavailable_fonts() {
        let mut canvas = MemoryCanvas::new().with_unavailable_font("Inter");
        let mut fonts = FontCache::new();
        assert_eq!(
            fonts.resolve(FontRole::Primary, &mut canvas),
            FontName::new("Roboto", "Regular")
        );
    }

    #[test]
    fn test_exhausted_chain_uses_last_fallback() {
        let mut canvas = MemoryCanvas::new()
            .with_unavailable_font("Inter")
            .with_unavailable_font("Roboto");
        let mut fonts = FontCache::new();
        assert_eq!(
            fonts.resolve(FontRole::Fallback, &mut canvas),
            FontName::new("Roboto", "Regular")
        );
    }

    #[test]
    fn test_resolves_once_per_role() {
        let mut canvas = MemoryCanvas::new();
        let mut fonts = FontCache::new();
        fonts.resolve(FontRole::Primary, &mut canvas);
        fonts.resolve(FontRole::Primary, &mut canvas);
        assert_eq!(canvas.loaded_fonts().len(), 1);
        assert_eq!(fonts.loaded(), 1);
    }

    #[test]
    fn test_override_is_tried_first() {
        let mut canvas = MemoryCanvas::new();
        let mut fonts =
            FontCache::new().with_override(FontRole::Primary, FontName::new("IBM Plex Sans", "Regular"));
        assert_eq!(
            fonts.resolve(FontRole::Primary, &mut canvas).family,
            "IBM Plex Sans"
        );
    }
}
