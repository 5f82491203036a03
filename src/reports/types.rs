//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
pub enum ReportFormat {
    /// Auto-detect: table if TTY, summary otherwise
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Markdown tables, one per group
    Markdown,
    /// Aligned terminal table
    Table,
    /// Brief summary output
    Summary,
}

impl ReportFormat {
    /// Replace `Auto` with a concrete format for the current output.
    #[must_use]
    pub const fn resolve(self, is_tty: bool) -> Self {
        match self {
            Self::Auto if is_tty => Self::Table,
            Self::Auto => Self::Summary,
            other => other,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Table => write!(f, "table"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report; defaults to the collection name
    pub title: Option<String>,
    /// Maximum rows rendered per group
    pub max_rows: Option<usize>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Snapshot file the table was built from
    pub snapshot_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Custom properties
    pub custom: std::collections::HashMap<String, String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_resolution() {
        assert_eq!(ReportFormat::Auto.resolve(true), ReportFormat::Table);
        assert_eq!(ReportFormat::Auto.resolve(false), ReportFormat::Summary);
        assert_eq!(ReportFormat::Json.resolve(true), ReportFormat::Json);
    }
}
