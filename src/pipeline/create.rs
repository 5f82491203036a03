//! Table creation: lookup, selection, record building, sorting, composition.

use super::CreateTableRequest;
use crate::error::{ErrorContext, OptionContext, Result};
use crate::grouping::{filter_by_groups, sort_records};
use crate::host::{materialize, Canvas, CompositionSession, Materialized};
use crate::model::{Collection, Mode};
use crate::records::build_records;
use crate::store::VariableStore;
use crate::table::{build_tree, TableComposer, TableLayout, TableOptions, TableTree};

/// A table that was composed and placed on a canvas.
#[derive(Debug, Clone)]
pub struct TableOutcome {
    pub layout: TableLayout,
    pub tree: TableTree,
    pub placed: Materialized,
}

/// Requested modes looked up in the collection, in request order.
fn resolve_modes(collection: &Collection, mode_ids: &[String]) -> Result<Vec<Mode>> {
    mode_ids
        .iter()
        .map(|id| collection.mode(id).cloned().or_not_found("mode", id))
        .collect()
}

/// Build the logical table for `request` without touching any canvas.
///
/// Fails when the request is incomplete, the collection or a mode is
/// unknown, or the selected groups match no variables.
pub fn prepare_table<S: VariableStore + ?Sized>(
    store: &S,
    request: &CreateTableRequest,
    options: TableOptions,
) -> Result<TableLayout> {
    request.validate()?;

    let collection = store
        .collection_by_id(&request.collection_id)
        .with_context(|| format!("looking up collection {}", request.collection_id))?
        .or_not_found("collection", &request.collection_id)?;
    let modes = resolve_modes(collection, &request.modes)?;

    let variables = store
        .list_variables(Some(&collection.id))
        .with_context(|| format!("listing variables of {}", collection.name))?;
    let selected = filter_by_groups(variables, &request.groups)?;

    tracing::info!(
        collection = %collection.name,
        variables = selected.len(),
        modes = modes.len(),
        "building table"
    );

    let mut records = build_records(store, &selected, &modes);
    sort_records(&mut records);

    let title = if request.collection_name.trim().is_empty() {
        collection.name.as_str()
    } else {
        request.collection_name.as_str()
    };
    Ok(TableComposer::new(options).compose(title, &records, &modes))
}

/// Prepare the table, build its visual tree and place it on `canvas`.
///
/// Nothing is created on the canvas unless preparation succeeded.
pub fn create_table<S, C>(
    store: &S,
    request: &CreateTableRequest,
    options: TableOptions,
    canvas: &mut C,
    session: &mut CompositionSession,
) -> Result<TableOutcome>
where
    S: VariableStore + ?Sized,
    C: Canvas + ?Sized,
{
    let layout = prepare_table(store, request, options)?;
    let tree = build_tree(&layout);
    let placed = materialize(&tree, canvas, session).context("placing table on canvas")?;
    Ok(TableOutcome {
        layout,
        tree,
        placed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VarTableError;
    use crate::host::MemoryCanvas;
    use crate::model::{RawValue, Rgba, Variable, VariableType};
    use crate::store::InMemoryStore;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_collection(Collection::new(
                "c1",
                "Core",
                vec![Mode::new("m1", "Light"), Mode::new("m2", "Dark")],
            ))
            .with_variable(
                Variable::new("v1", "color/red", "c1", VariableType::Color)
                    .with_value("m1", RawValue::Color(Rgba::rgb(1.0, 0.0, 0.0)))
                    .with_value("m2", RawValue::Color(Rgba::rgb(0.5, 0.0, 0.0))),
            )
            .with_variable(
                Variable::new("v2", "color/accent", "c1", VariableType::Color)
                    .with_value("m1", RawValue::alias("v1")),
            )
            .with_variable(
                Variable::new("v3", "radius", "c1", VariableType::Number)
                    .with_value("m1", RawValue::Number(4.0)),
            )
    }

    fn request() -> CreateTableRequest {
        CreateTableRequest::new("c1")
            .with_modes(["m1", "m2"])
            .with_groups(["color", "radius"])
    }

    #[test]
    fn test_prepare_table_sorts_and_groups() {
        let layout = prepare_table(&store(), &request(), TableOptions::default()).unwrap();
        assert_eq!(layout.title, "Core");
        let names: Vec<&str> = layout.rows().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["color/accent", "color/red", "radius"]);
        assert_eq!(layout.groups[0].rows[0].cells[0].text, "color-red");
        assert_eq!(layout.groups[1].rows[0].cells[1].text, "");
    }

    #[test]
    fn test_collection_name_overrides_title() {
        let mut request = request();
        request.collection_name = "Brand tokens".into();
        let layout = prepare_table(&store(), &request, TableOptions::default()).unwrap();
        assert_eq!(layout.title, "Brand tokens");
    }

    #[test]
    fn test_unknown_collection() {
        let request = CreateTableRequest::new("nope")
            .with_modes(["m1"])
            .with_groups(["color"]);
        let err = prepare_table(&store(), &request, TableOptions::default()).unwrap_err();
        assert!(matches!(err, VarTableError::NotFound { kind: "collection", .. }));
    }

    #[test]
    fn test_unknown_mode() {
        let request = request().with_modes(["m9"]);
        let err = prepare_table(&store(), &request, TableOptions::default()).unwrap_err();
        assert!(matches!(err, VarTableError::NotFound { kind: "mode", .. }));
    }

    #[test]
    fn test_empty_selection_creates_nothing() {
        let request = request().with_groups(["spacing"]);
        let mut canvas = MemoryCanvas::new();
        let err = create_table(
            &store(),
            &request,
            TableOptions::default(),
            &mut canvas,
            &mut CompositionSession::new(),
        )
        .unwrap_err();
        assert!(matches!(err, VarTableError::NoSelection { .. }));
        assert_eq!(canvas.node_count(), 0);
    }

    #[test]
    fn test_create_table_places_root() {
        let mut canvas = MemoryCanvas::new();
        let outcome = create_table(
            &store(),
            &request(),
            TableOptions::default(),
            &mut canvas,
            &mut CompositionSession::new(),
        )
        .unwrap();
        assert_eq!(canvas.selection(), &[outcome.placed.root]);
        assert_eq!(canvas.node_count(), outcome.tree.node_count());
    }
}
