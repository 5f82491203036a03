//! Configuration types.

use crate::host::{CompositionSession, FontName};
use crate::reports::ReportFormat;
use crate::table::{FontRole, TableOptions, TableTheme};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// User Preferences
// ============================================================================

/// Table settings remembered between runs.
///
/// Serialized in camelCase, the shape the UI panel exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    /// Colour scheme: "light" or "dark"
    pub table_theme: TableTheme,
    /// Show the dev-token column
    pub show_dev_token: bool,
    /// Show colour swatches next to colour values
    pub show_swatches: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            table_theme: TableTheme::Dark,
            show_dev_token: true,
            show_swatches: true,
        }
    }
}

impl Preferences {
    /// Apply per-request overrides on top of these preferences.
    #[must_use]
    pub fn with_overrides(
        self,
        theme: Option<TableTheme>,
        show_dev_token: Option<bool>,
        show_swatches: Option<bool>,
    ) -> Self {
        Self {
            table_theme: theme.unwrap_or(self.table_theme),
            show_dev_token: show_dev_token.unwrap_or(self.show_dev_token),
            show_swatches: show_swatches.unwrap_or(self.show_swatches),
        }
    }

    #[must_use]
    pub const fn table_options(&self) -> TableOptions {
        TableOptions {
            theme: self.table_theme,
            show_dev_token: self.show_dev_token,
            show_swatches: self.show_swatches,
        }
    }
}

impl From<Preferences> for TableOptions {
    fn from(prefs: Preferences) -> Self {
        prefs.table_options()
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Top-level configuration loaded from `.vartable.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Default table preferences
    pub preferences: Preferences,
    /// Report output settings
    pub output: OutputConfig,
    /// Canvas placement and fonts
    pub layout: LayoutConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Placement of the table on the canvas and font overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance from the viewport's left edge
    pub offset_x: f64,
    /// Vertical distance from the viewport's top edge
    pub offset_y: f64,
    /// Fonts tried before the built-in fallback chains
    pub fonts: FontOverrides,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let (offset_x, offset_y) = crate::host::DEFAULT_OFFSET;
        Self {
            offset_x,
            offset_y,
            fonts: FontOverrides::default(),
        }
    }
}

impl LayoutConfig {
    /// A fresh composition session using this layout.
    #[must_use]
    pub fn session(&self) -> CompositionSession {
        let mut session = CompositionSession::new().with_offset(self.offset_x, self.offset_y);
        for (role, font) in self.fonts.iter() {
            session = session.with_font(role, font.clone());
        }
        session
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FontOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<FontName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<FontName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<FontName>,
}

impl FontOverrides {
    /// Configured overrides with their roles.
    pub fn iter(&self) -> impl Iterator<Item = (FontRole, &FontName)> {
        [
            (FontRole::Primary, self.primary.as_ref()),
            (FontRole::Secondary, self.secondary.as_ref()),
            (FontRole::Header, self.header.as_ref()),
        ]
        .into_iter()
        .filter_map(|(role, font)| font.map(|f| (role, f)))
    }
}
