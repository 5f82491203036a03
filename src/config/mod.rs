//! Configuration for vartable.
//!
//! This module provides:
//! - User [`Preferences`] (theme, dev-token column, swatches) and the
//!   [`PreferencesStore`] they are persisted through
//! - [`AppConfig`], loaded from YAML with automatic discovery and merged
//!   with CLI arguments
//! - Validation for all configuration values
//!
//! # Configuration File
//!
//! Place a `.vartable.yaml` file in your project root or `~/.config/vartable/`:
//!
//! ```yaml
//! preferences:
//!   tableTheme: light
//!   showDevToken: false
//! output:
//!   format: Markdown
//! ```

pub mod file;
mod preferences;
mod types;
mod validation;

pub use preferences::{FilePreferencesStore, MemoryPreferencesStore, PreferencesStore};
pub use types::{AppConfig, FontOverrides, LayoutConfig, OutputConfig, Preferences};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, CliOverrides, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.vartable.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
