//! Aligned terminal table output.

use super::{report_title, visible_rows, ReportConfig, ReportError, ReportFormat, TableReporter};
use crate::table::TableLayout;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: usize = 2;

/// Plain-text table with columns aligned by display width.
pub struct TextReporter;

impl TextReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

impl TableReporter for TextReporter {
    fn render(&self, layout: &TableLayout, config: &ReportConfig) -> Result<String, ReportError> {
        let show_dev_token = layout.options.show_dev_token;

        let mut header = vec!["Name".to_string()];
        if show_dev_token {
            header.push("Dev token".to_string());
        }
        header.extend(layout.modes.iter().map(|m| m.name.clone()));

        // widths are shared by every group so columns line up across groups
        let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
        let mut body: Vec<(String, Vec<Vec<String>>, usize)> = Vec::new();
        for group in &layout.groups {
            let (rows, hidden) = visible_rows(&group.rows, config);
            let lines: Vec<Vec<String>> = rows
                .iter()
                .map(|row| {
                    let mut cells = vec![row.name.clone()];
                    if show_dev_token {
                        cells.push(row.dev_token.clone());
                    }
                    cells.extend(row.cells.iter().map(|c| {
                        if c.swatch.is_some() {
                            format!("● {}", c.text)
                        } else {
                            c.text.clone()
                        }
                    }));
                    cells
                })
                .collect();
            for line in &lines {
                for (width, cell) in widths.iter_mut().zip(line) {
                    *width = (*width).max(cell.width());
                }
            }
            body.push((group.label.clone(), lines, hidden));
        }

        let render_line = |cells: &[String]| -> String {
            let last = cells.len().saturating_sub(1);
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, width))| {
                    if i == last {
                        cell.clone()
                    } else {
                        pad(cell, width + COLUMN_GAP)
                    }
                })
                .collect()
        };

        let mut out = String::new();
        writeln!(out, "{}", report_title(layout, config))?;
        let rule_width: usize =
            widths.iter().sum::<usize>() + COLUMN_GAP * widths.len().saturating_sub(1);

        for (label, lines, hidden) in &body {
            writeln!(out)?;
            writeln!(out, "[{label}]")?;
            writeln!(out, "{}", render_line(&header))?;
            writeln!(out, "{}", "-".repeat(rule_width))?;
            for line in lines {
                writeln!(out, "{}", render_line(line))?;
            }
            if *hidden > 0 {
                writeln!(out, "... {hidden} more")?;
            }
        }

        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}
