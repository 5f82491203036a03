//! Report rendering stage.

use super::{auto_detect_format, write_output, OutputTarget};
use crate::reports::{create_reporter, ReportConfig, ReportFormat};
use crate::table::TableLayout;
use anyhow::Result;

/// Render `layout` in `format` and write it to `target`.
pub fn output_report(
    layout: &TableLayout,
    format: ReportFormat,
    config: &ReportConfig,
    target: &OutputTarget,
    quiet: bool,
) -> Result<()> {
    let format = auto_detect_format(format, target);
    tracing::debug!(%format, rows = layout.row_count(), "rendering report");
    let reporter = create_reporter(format);
    let content = reporter.render(layout, config)?;
    write_output(&content, target, quiet)
}
