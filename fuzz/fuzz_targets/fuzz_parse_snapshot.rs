#![no_main]
use libfuzzer_sys::fuzz_target;
use vartable::pipeline::{prepare_table, CreateTableRequest};
use vartable::store::{SnapshotParser, VariableStore};
use vartable::table::TableOptions;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the snapshot parser, then compose a table for every collection that
/// parsed.
///
/// Also wraps the input as a variables array so malformed variables reach
/// value decoding instead of failing on the envelope.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let parser = SnapshotParser::new();

    let mut inputs = vec![s.to_string()];
    if s.len() < MAX_WRAPPED_INPUT_LEN {
        inputs.push(format!(
            r#"{{"collections":[{{"id":"c","name":"C","modes":[{{"modeId":"m","name":"M"}}]}}],"variables":[{s}]}}"#,
        ));
    }

    for input in inputs {
        let Ok(store) = parser.parse_str(&input) else {
            continue;
        };
        let Ok(collections) = store.list_collections() else {
            continue;
        };
        for collection in collections {
            let mut request = CreateTableRequest::new(&collection.id)
                .with_modes(collection.modes.iter().map(|m| m.mode_id.clone()));
            let Ok(variables) = store.list_variables(Some(&collection.id)) else {
                continue;
            };
            let mut groups: Vec<String> = variables
                .iter()
                .map(|v| vartable::grouping::GroupKey::of(&v.name).id().to_string())
                .collect();
            groups.dedup();
            request = request.with_groups(groups);
            let _ = prepare_table(&store, &request, TableOptions::default());
        }
    }
});
