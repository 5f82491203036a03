//! Report generation for composed tables.
//!
//! Besides being placed on a canvas, a [`TableLayout`] can be rendered as:
//! - JSON: structured data for programmatic integration
//! - Markdown: one table per group, for documentation
//! - Table: aligned terminal output
//! - Summary: compact shell-friendly output

pub mod escape;
mod json;
mod markdown;
mod summary;
mod text;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use text::TextReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::table::TableLayout;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Renders a [`TableLayout`] in one output format.
pub trait TableReporter {
    fn render(&self, layout: &TableLayout, config: &ReportConfig) -> Result<String, ReportError>;

    /// Write the rendered report to a writer
    fn write(
        &self,
        layout: &TableLayout,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.render(layout, config)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this reporter produces
    fn format(&self) -> ReportFormat;
}

/// Reporter for `format`. `Auto` must be resolved first; it falls back to
/// the summary reporter.
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn TableReporter> {
    match format {
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Table => Box::new(TextReporter::new()),
        ReportFormat::Summary | ReportFormat::Auto => Box::new(SummaryReporter::new()),
    }
}

/// Title of a report: the configured one, else the collection name.
pub(crate) fn report_title<'a>(layout: &'a TableLayout, config: &'a ReportConfig) -> &'a str {
    config.title.as_deref().unwrap_or(&layout.title)
}

/// Rows of a group honoring `max_rows`, plus how many were cut.
pub(crate) fn visible_rows<'a>(
    rows: &'a [crate::table::LayoutRow],
    config: &ReportConfig,
) -> (&'a [crate::table::LayoutRow], usize) {
    let shown = config.max_rows.map_or(rows.len(), |max| rows.len().min(max));
    (&rows[..shown], rows.len() - shown)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{Mode, Rgba, VariableType};
    use crate::table::{
        Cell, LayoutGroup, LayoutRow, Rounding, Swatch, TableLayout, TableOptions,
    };

    fn row(name: &str, var_type: VariableType, cells: &[&str]) -> LayoutRow {
        LayoutRow {
            variable_id: format!("id-{name}"),
            name: name.to_string(),
            dev_token: crate::records::dev_token(name),
            var_type,
            cells: cells
                .iter()
                .map(|text| Cell {
                    text: (*text).to_string(),
                    swatch: (var_type == VariableType::Color).then(|| Swatch {
                        color: Rgba::rgb(1.0, 0.0, 0.0),
                        binding: None,
                    }),
                })
                .collect(),
            rounding: Rounding::NONE,
        }
    }

    pub fn layout() -> TableLayout {
        TableLayout {
            title: "Core".into(),
            modes: vec![Mode::new("m1", "Light"), Mode::new("m2", "Dark")],
            groups: vec![
                LayoutGroup {
                    id: "color".into(),
                    label: "color".into(),
                    individual: false,
                    rows: vec![
                        row("color/red", VariableType::Color, &["#FF0000", "#CC0000"]),
                        row("color/link", VariableType::Color, &["color-red", "color-red"]),
                    ],
                },
                LayoutGroup {
                    id: "radius".into(),
                    label: "radius".into(),
                    individual: true,
                    rows: vec![row("radius", VariableType::Number, &["4", "4.5"])],
                },
            ],
            options: TableOptions::default(),
            skipped_rows: 0,
        }
    }
}
