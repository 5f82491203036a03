//! Summary report generator.

use super::{report_title, ReportConfig, ReportError, ReportFormat, TableReporter};
use crate::table::TableLayout;
use std::fmt::Write;

/// Compact one-line-per-group summary.
pub struct SummaryReporter;

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReporter for SummaryReporter {
    fn render(&self, layout: &TableLayout, config: &ReportConfig) -> Result<String, ReportError> {
        let mut out = String::new();
        let modes: Vec<&str> = layout.modes.iter().map(|m| m.name.as_str()).collect();

        writeln!(
            out,
            "{}: {} variables, {} groups, modes: {}",
            report_title(layout, config),
            layout.row_count(),
            layout.groups.len(),
            modes.join(", ")
        )?;
        if layout.skipped_rows > 0 {
            writeln!(out, "  skipped rows: {}", layout.skipped_rows)?;
        }
        for group in &layout.groups {
            let kind = if group.individual { " (individual)" } else { "" };
            writeln!(out, "  {} [{}]{kind}", group.label, group.rows.len())?;
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures;

    #[test]
    fn test_summary_output() {
        let out = SummaryReporter::new()
            .render(&fixtures::layout(), &ReportConfig::default())
            .unwrap();
        insta::assert_snapshot!(out, @r"
        Core: 3 variables, 2 groups, modes: Light, Dark
          color [2]
          radius [1] (individual)
        ");
    }

    #[test]
    fn test_summary_reports_skipped_rows() {
        let mut layout = fixtures::layout();
        layout.skipped_rows = 2;
        let out = SummaryReporter::new()
            .render(&layout, &ReportConfig::default().with_title("Brand"))
            .unwrap();
        assert!(out.starts_with("Brand:"));
        assert!(out.contains("skipped rows: 2"));
    }
}
