//! Builds one [`VariableRecord`] per variable across the requested modes.

use super::dev_token;
use crate::model::{Mode, Variable, VariableRecord};
use crate::resolve::ValueResolver;
use crate::store::VariableStore;
use indexmap::IndexMap;
use rayon::prelude::*;

/// Combines resolver output for every requested mode into a record.
pub struct RecordBuilder<'s, S: ?Sized> {
    resolver: ValueResolver<'s, S>,
}

impl<'s, S: VariableStore + ?Sized> RecordBuilder<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self {
            resolver: ValueResolver::new(store),
        }
    }

    /// Build the record for one variable.
    ///
    /// Modes are processed in the given order and each per-mode map gets
    /// exactly one entry per mode. Never fails: resolution problems become
    /// placeholder values.
    pub fn build(&self, variable: &Variable, modes: &[Mode]) -> VariableRecord {
        let is_color = variable.is_color();
        let mut display_values = IndexMap::with_capacity(modes.len());
        let mut resolved_colors = is_color.then(|| IndexMap::with_capacity(modes.len()));
        let mut alias_bindings = is_color.then(|| IndexMap::with_capacity(modes.len()));

        for mode in modes {
            let raw = variable.value_for(&mode.mode_id);
            display_values.insert(
                mode.mode_id.clone(),
                self.resolver.display_value(variable, &mode.mode_id, raw),
            );

            if let Some(colors) = resolved_colors.as_mut() {
                colors.insert(
                    mode.mode_id.clone(),
                    self.resolver.resolve_color(variable, &mode.mode_id, raw),
                );
            }
            if let Some(bindings) = alias_bindings.as_mut() {
                bindings.insert(
                    mode.mode_id.clone(),
                    self.resolver.alias_binding(variable, &mode.mode_id),
                );
            }
        }

        VariableRecord {
            variable_id: variable.id.clone(),
            name: variable.name.clone(),
            dev_token: dev_token(&variable.name),
            var_type: variable.resolved_type,
            display_values,
            resolved_colors,
            alias_bindings,
        }
    }
}

/// Build records for all variables.
///
/// Variables are independent, so they are built in parallel; the output
/// keeps the input order.
pub fn build_records<S: VariableStore + ?Sized>(
    store: &S,
    variables: &[&Variable],
    modes: &[Mode],
) -> Vec<VariableRecord> {
    let builder = RecordBuilder::new(store);
    let records: Vec<VariableRecord> = variables
        .par_iter()
        .map(|variable| builder.build(variable, modes))
        .collect();
    tracing::debug!(
        records = records.len(),
        modes = modes.len(),
        "built variable records"
    );
    records
}
