//! Logical table layout: groups, rows and cells before any styling.

use super::TableOptions;
use crate::format::{format_value, swatch_color};
use crate::grouping::classify;
use crate::model::{Mode, Rgba, VariableRecord, VariableRef, VariableType};
use serde::Serialize;
use thiserror::Error;

/// Corner rounding flags of a row within its group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rounding {
    pub top: bool,
    pub bottom: bool,
}

impl Rounding {
    pub const NONE: Self = Self {
        top: false,
        bottom: false,
    };
    pub const ALL: Self = Self {
        top: true,
        bottom: true,
    };
}

/// Rounding for row `index` of a group holding `len` rows.
///
/// The first row is rounded on top and the last on the bottom; a single row
/// is both.
#[must_use]
pub const fn row_rounding(index: usize, len: usize) -> Rounding {
    Rounding {
        top: index == 0,
        bottom: index + 1 == len,
    }
}

/// Colour chip shown in a value cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swatch {
    pub color: Rgba,
    /// Variable the swatch paint should be bound to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<VariableRef>,
}

/// One value cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swatch: Option<Swatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRow {
    pub variable_id: String,
    pub name: String,
    pub dev_token: String,
    pub var_type: VariableType,
    /// One cell per mode column, in column order
    pub cells: Vec<Cell>,
    pub rounding: Rounding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutGroup {
    pub id: String,
    pub label: String,
    pub individual: bool,
    pub rows: Vec<LayoutRow>,
}

impl LayoutGroup {
    /// Rounding for the group's header: top always, bottom only when the
    /// group has no rows below it.
    #[must_use]
    pub fn header_rounding(&self) -> Rounding {
        Rounding {
            top: true,
            bottom: self.rows.is_empty(),
        }
    }
}

/// Complete logical table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableLayout {
    pub title: String,
    pub modes: Vec<Mode>,
    pub groups: Vec<LayoutGroup>,
    pub options: TableOptions,
    /// Rows dropped because they could not be built
    pub skipped_rows: usize,
}

impl TableLayout {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }

    pub fn rows(&self) -> impl Iterator<Item = &LayoutRow> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Failure to build a single row. Rows failing this way are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("variable '{variable}' has no value slot for mode '{mode}'")]
    MissingMode { variable: String, mode: String },
}

/// Builds the logical layout from sorted records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableComposer {
    options: TableOptions,
}

impl TableComposer {
    #[must_use]
    pub const fn new(options: TableOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Group `records` and build one row per record.
    ///
    /// Records are expected in sorted order; rows keep that order within a
    /// group. Rows that fail are logged and left out, and rounding is
    /// computed over the rows that remain. A group losing every row is
    /// dropped.
    pub fn compose(&self, title: &str, records: &[VariableRecord], modes: &[Mode]) -> TableLayout {
        let mut skipped_rows = 0;
        let mut groups = Vec::new();

        for group in classify(records) {
            let mut rows = Vec::with_capacity(group.len());
            for record in &group.members {
                match self.build_row(record, modes) {
                    Ok(row) => rows.push(row),
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping table row");
                        skipped_rows += 1;
                    }
                }
            }

            if rows.is_empty() {
                tracing::warn!(group = group.label(), "group has no renderable rows");
                continue;
            }

            let len = rows.len();
            for (index, row) in rows.iter_mut().enumerate() {
                row.rounding = row_rounding(index, len);
            }

            groups.push(LayoutGroup {
                id: group.key.id().to_string(),
                label: group.label().to_string(),
                individual: group.is_individual(),
                rows,
            });
        }

        tracing::debug!(
            groups = groups.len(),
            skipped = skipped_rows,
            "composed table layout"
        );

        TableLayout {
            title: title.to_string(),
            modes: modes.to_vec(),
            groups,
            options: self.options,
            skipped_rows,
        }
    }

    fn build_row(&self, record: &VariableRecord, modes: &[Mode]) -> Result<LayoutRow, RowError> {
        let cells = modes
            .iter()
            .map(|mode| self.build_cell(record, mode))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LayoutRow {
            variable_id: record.variable_id.clone(),
            name: record.name.clone(),
            dev_token: record.dev_token.clone(),
            var_type: record.var_type,
            cells,
            rounding: Rounding::NONE,
        })
    }

    fn build_cell(&self, record: &VariableRecord, mode: &Mode) -> Result<Cell, RowError> {
        let value = record
            .display_value(&mode.mode_id)
            .ok_or_else(|| RowError::MissingMode {
                variable: record.name.clone(),
                mode: mode.mode_id.clone(),
            })?;

        let swatch = if self.options.show_swatches {
            swatch_color(value, record.var_type, record.resolved_color(&mode.mode_id)).map(
                |color| Swatch {
                    color,
                    binding: record.alias_binding(&mode.mode_id).cloned(),
                },
            )
        } else {
            None
        };

        Ok(Cell {
            text: format_value(value, record.var_type),
            swatch,
        })
    }
}
