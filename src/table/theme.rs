//! Table themes and rendering options.

use crate::model::Rgba;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Colour scheme of the generated table
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TableTheme {
    Light,
    #[default]
    Dark,
}

impl TableTheme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        match self {
            Self::Light => Palette {
                background: hex(0xFFFFFF),
                header_fill: hex(0xF5F5F5),
                row_fill: hex(0xFFFFFF),
                border: hex(0xE6E6E6),
                text_primary: hex(0x1E1E1E),
                text_secondary: hex(0x757575),
                header_text: hex(0x1E1E1E),
                swatch_border: Rgba::rgba(0.0, 0.0, 0.0, 0.1),
            },
            Self::Dark => Palette {
                background: hex(0x141414),
                header_fill: hex(0x2C2C2C),
                row_fill: hex(0x1E1E1E),
                border: hex(0x3D3D3D),
                text_primary: hex(0xFFFFFF),
                text_secondary: hex(0xB3B3B3),
                header_text: hex(0xFFFFFF),
                swatch_border: Rgba::rgba(1.0, 1.0, 1.0, 0.2),
            },
        }
    }
}

impl std::fmt::Display for TableTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colours used by a theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub background: Rgba,
    pub header_fill: Rgba,
    pub row_fill: Rgba,
    pub border: Rgba,
    pub text_primary: Rgba,
    pub text_secondary: Rgba,
    pub header_text: Rgba,
    pub swatch_border: Rgba,
}

fn hex(rgb: u32) -> Rgba {
    let channel = |shift: u32| f64::from((rgb >> shift) & 0xFF) / 255.0;
    Rgba::rgb(channel(16), channel(8), channel(0))
}

/// Options controlling what the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub theme: TableTheme,
    pub show_dev_token: bool,
    pub show_swatches: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            theme: TableTheme::Dark,
            show_dev_token: true,
            show_swatches: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_channels() {
        let c = hex(0x336699);
        assert_eq!(c.to_bytes(), [0x33, 0x66, 0x99, 0xFF]);
    }

    #[test]
    fn test_theme_serde_names() {
        assert_eq!(serde_json::to_string(&TableTheme::Light).unwrap(), "\"light\"");
        let theme: TableTheme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(theme, TableTheme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(TableTheme::Light.palette(), TableTheme::Dark.palette());
    }
}
