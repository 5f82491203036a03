//! JSON report generator.

use super::{report_title, ReportConfig, ReportError, ReportFormat, ReportMetadata, TableReporter};
use crate::model::Mode;
use crate::table::{LayoutGroup, TableLayout, TableOptions};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator. Always includes every row; `max_rows` only
/// applies to the human-readable formats.
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    generated_at: String,
    metadata: &'a ReportMetadata,
    summary: JsonSummary,
    options: &'a TableOptions,
    modes: &'a [Mode],
    groups: &'a [LayoutGroup],
}

#[derive(Serialize)]
struct JsonSummary {
    groups: usize,
    variables: usize,
    modes: usize,
    skipped_rows: usize,
}

impl TableReporter for JsonReporter {
    fn render(&self, layout: &TableLayout, config: &ReportConfig) -> Result<String, ReportError> {
        let report = JsonReport {
            title: report_title(layout, config),
            generated_at: Utc::now().to_rfc3339(),
            metadata: &config.metadata,
            summary: JsonSummary {
                groups: layout.groups.len(),
                variables: layout.row_count(),
                modes: layout.modes.len(),
                skipped_rows: layout.skipped_rows,
            },
            options: &layout.options,
            modes: &layout.modes,
            groups: &layout.groups,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures;

    #[test]
    fn test_json_report_structure() {
        let json = JsonReporter::new()
            .render(&fixtures::layout(), &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Core");
        assert_eq!(value["summary"]["variables"], 3);
        assert_eq!(value["summary"]["groups"], 2);
        assert_eq!(value["modes"][0]["modeId"], "m1");
        assert_eq!(value["groups"][0]["label"], "color");
        assert_eq!(value["groups"][0]["rows"][0]["cells"][0]["text"], "#FF0000");
        assert!(value["generated_at"].as_str().is_some());
    }

    #[test]
    fn test_compact_output() {
        let json = JsonReporter::new()
            .pretty(false)
            .render(&fixtures::layout(), &ReportConfig::default())
            .unwrap();
        assert!(!json.contains('\n'));
    }
}
