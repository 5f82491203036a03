//! Table command handler.
//!
//! Builds the table for one collection and renders it as a report. With
//! `canvas_dump` set, the table is also placed on an in-memory canvas whose
//! recorded nodes are written out as JSON.

use crate::config::AppConfig;
use crate::error::OptionContext;
use crate::grouping::group_summaries;
use crate::host::MemoryCanvas;
use crate::pipeline::{
    create_table, exit_codes, load_snapshot_with_context, output_report, prepare_table,
    write_output, CreateTableRequest, OutputTarget, PipelineError,
};
use crate::reports::{ReportConfig, ReportMetadata};
use crate::store::VariableStore;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Everything the `table` subcommand needs.
#[derive(Debug, Clone, Default)]
pub struct TableConfig {
    pub snapshot: PathBuf,
    pub collection: String,
    /// Title override; the collection name when unset
    pub title: Option<String>,
    /// Mode ids; all modes of the collection when empty
    pub modes: Vec<String>,
    /// Group ids; every group of the collection when empty
    pub groups: Vec<String>,
    /// Effective configuration, CLI overrides already applied
    pub app: AppConfig,
    pub max_rows: Option<usize>,
    pub canvas_dump: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the table command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_table(config: TableConfig) -> Result<i32> {
    let loaded =
        load_snapshot_with_context(&config.snapshot).map_err(|source| PipelineError::LoadFailed {
            path: config.snapshot.display().to_string(),
            source,
        })?;
    let request = build_request(&loaded.store, &config)?;
    let options = config.app.preferences.table_options();

    let layout = match &config.canvas_dump {
        Some(path) => {
            let mut canvas = MemoryCanvas::new();
            let mut session = config.app.layout.session();
            let outcome = create_table(&loaded.store, &request, options, &mut canvas, &mut session)
                .map_err(|source| PipelineError::CreateFailed { source })?;
            let json =
                serde_json::to_string_pretty(&canvas).context("failed to serialize canvas")?;
            write_output(&json, &OutputTarget::File(path.clone()), config.quiet)?;
            outcome.layout
        }
        None => prepare_table(&loaded.store, &request, options)
            .map_err(|source| PipelineError::CreateFailed { source })?,
    };

    if !config.quiet && layout.skipped_rows > 0 {
        tracing::warn!("{} variables could not be laid out", layout.skipped_rows);
    }

    let report_config = ReportConfig {
        title: config.title.clone(),
        max_rows: config.max_rows,
        metadata: ReportMetadata {
            snapshot_path: Some(loaded.path.display().to_string()),
            ..ReportMetadata::new()
        },
    };
    let target = OutputTarget::from_option(config.app.output.file.clone());
    output_report(
        &layout,
        config.app.output.format,
        &report_config,
        &target,
        config.quiet,
    )
    .map_err(|source| PipelineError::ReportFailed { source })?;

    Ok(exit_codes::SUCCESS)
}

/// Request for `config`, filling in all modes and all groups when none
/// were given.
fn build_request<S: VariableStore + ?Sized>(
    store: &S,
    config: &TableConfig,
) -> Result<CreateTableRequest> {
    let collection = store
        .collection_by_id(&config.collection)
        .context("looking up collection")?
        .or_not_found("collection", &config.collection)?;

    let modes = if config.modes.is_empty() {
        collection.modes.iter().map(|m| m.mode_id.clone()).collect()
    } else {
        config.modes.clone()
    };

    let groups = if config.groups.is_empty() {
        let variables = store
            .list_variables(Some(&collection.id))
            .context("listing variables")?;
        group_summaries(&variables)
            .into_iter()
            .map(|g| g.id)
            .collect()
    } else {
        config.groups.clone()
    };

    Ok(CreateTableRequest {
        collection_name: config.title.clone().unwrap_or_default(),
        ..CreateTableRequest::new(collection.id.clone())
            .with_modes(modes)
            .with_groups(groups)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Collection, Mode, RawValue, Variable, VariableType};
    use crate::store::InMemoryStore;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_collection(Collection::new(
                "c1",
                "Core",
                vec![Mode::new("m1", "Light"), Mode::new("m2", "Dark")],
            ))
            .with_variable(
                Variable::new("v1", "space/sm", "c1", VariableType::Number)
                    .with_value("m1", RawValue::Number(4.0)),
            )
            .with_variable(
                Variable::new("v2", "opacity", "c1", VariableType::Number)
                    .with_value("m1", RawValue::Number(0.5)),
            )
    }

    #[test]
    fn test_defaults_to_all_modes_and_groups() {
        let config = TableConfig {
            collection: "c1".into(),
            ..TableConfig::default()
        };
        let request = build_request(&store(), &config).unwrap();
        assert_eq!(request.modes, vec!["m1", "m2"]);
        assert_eq!(request.groups, vec!["space", "opacity"]);
        assert!(request.collection_name.is_empty());
    }

    #[test]
    fn test_explicit_selection_is_kept() {
        let config = TableConfig {
            collection: "c1".into(),
            title: Some("Spacing".into()),
            modes: vec!["m2".into()],
            groups: vec!["space".into()],
            ..TableConfig::default()
        };
        let request = build_request(&store(), &config).unwrap();
        assert_eq!(request.modes, vec!["m2"]);
        assert_eq!(request.groups, vec!["space"]);
        assert_eq!(request.collection_name, "Spacing");
    }

    #[test]
    fn test_unknown_collection() {
        let config = TableConfig {
            collection: "nope".into(),
            ..TableConfig::default()
        };
        let err = build_request(&store(), &config).unwrap_err();
        assert_eq!(err.to_string(), "collection not found: nope");
    }
}
