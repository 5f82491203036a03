//! Markdown report generator.

use super::escape::{escape_markdown_inline, escape_markdown_table};
use super::{report_title, visible_rows, ReportConfig, ReportError, ReportFormat, TableReporter};
use crate::table::TableLayout;
use std::fmt::Write;

/// Markdown report generator: one table per group.
pub struct MarkdownReporter;

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReporter for MarkdownReporter {
    fn render(&self, layout: &TableLayout, config: &ReportConfig) -> Result<String, ReportError> {
        let mut md = String::new();
        let show_dev_token = layout.options.show_dev_token;

        writeln!(md, "# {}", escape_markdown_inline(report_title(layout, config)))?;
        writeln!(md)?;
        writeln!(
            md,
            "{} variables in {} groups across {} modes.",
            layout.row_count(),
            layout.groups.len(),
            layout.modes.len()
        )?;

        let mut header = vec!["Name".to_string()];
        if show_dev_token {
            header.push("Dev token".to_string());
        }
        header.extend(layout.modes.iter().map(|m| escape_markdown_table(&m.name)));
        let separator = vec!["---"; header.len()].join(" | ");

        for group in &layout.groups {
            writeln!(md)?;
            writeln!(md, "## {}", escape_markdown_inline(&group.label))?;
            writeln!(md)?;
            writeln!(md, "| {} |", header.join(" | "))?;
            writeln!(md, "| {separator} |")?;

            let (rows, hidden) = visible_rows(&group.rows, config);
            for row in rows {
                let mut cells = vec![escape_markdown_table(&row.name)];
                if show_dev_token {
                    cells.push(format!("`{}`", row.dev_token));
                }
                cells.extend(row.cells.iter().map(|c| escape_markdown_table(&c.text)));
                writeln!(md, "| {} |", cells.join(" | "))?;
            }
            if hidden > 0 {
                writeln!(md)?;
                writeln!(md, "*{hidden} more not shown*")?;
            }
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
