//! Configuration validation.

use super::types::{AppConfig, FontOverrides, LayoutConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.layout.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }
        errors
    }
}

impl Validatable for LayoutConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (field, value) in [("layout.offset_x", self.offset_x), ("layout.offset_y", self.offset_y)] {
            if !value.is_finite() {
                errors.push(ConfigError::new(field, format!("Offset must be a finite number, got {value}")));
            }
        }
        errors.extend(self.fonts.validate());
        errors
    }
}

impl Validatable for FontOverrides {
    fn validate(&self) -> Vec<ConfigError> {
        self.iter()
            .filter(|(_, font)| font.family.trim().is_empty() || font.style.trim().is_empty())
            .map(|(role, _)| {
                ConfigError::new(
                    format!("layout.fonts.{}", format!("{role:?}").to_lowercase()),
                    "Font family and style must not be empty",
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FontName;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_missing_output_dir() {
        let output = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/table.md")),
            ..OutputConfig::default()
        };
        let errors = output.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "output.file");
    }

    #[test]
    fn test_non_finite_offset() {
        let layout = LayoutConfig {
            offset_x: f64::NAN,
            ..LayoutConfig::default()
        };
        assert_eq!(layout.validate()[0].field, "layout.offset_x");
    }

    #[test]
    fn test_empty_font_family() {
        let fonts = FontOverrides {
            primary: Some(FontName::new("", "Regular")),
            ..FontOverrides::default()
        };
        assert_eq!(fonts.validate()[0].field, "layout.fonts.primary");
    }
}
