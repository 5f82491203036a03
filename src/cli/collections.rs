//! Collections command handler.

use crate::pipeline::{exit_codes, load_snapshot_with_context, write_output, OutputTarget};
use crate::protocol::{collection_summaries, CollectionSummary};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// List the collections of a snapshot.
pub fn run_collections(snapshot: &Path, json: bool) -> Result<i32> {
    let loaded = load_snapshot_with_context(snapshot)?;
    let collections = collection_summaries(&loaded.store)?;
    let content = if json {
        serde_json::to_string_pretty(&collections).context("failed to serialize collections")?
    } else {
        render_collections(&collections)
    };
    write_output(&content, &OutputTarget::Stdout, true)?;
    Ok(exit_codes::SUCCESS)
}

fn render_collections(collections: &[CollectionSummary]) -> String {
    if collections.is_empty() {
        return "No collections found".to_string();
    }
    let mut out = String::new();
    for collection in collections {
        let modes: Vec<&str> = collection.modes.iter().map(|m| m.name.as_str()).collect();
        let _ = writeln!(
            out,
            "{} ({})\n  {} variables, modes: {}",
            collection.name,
            collection.id,
            collection.variable_count,
            modes.join(", ")
        );
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mode;

    #[test]
    fn test_render_collections() {
        let out = render_collections(&[CollectionSummary {
            id: "c1".into(),
            name: "Core".into(),
            modes: vec![Mode::new("m1", "Light"), Mode::new("m2", "Dark")],
            variable_count: 12,
        }]);
        assert_eq!(out, "Core (c1)\n  12 variables, modes: Light, Dark");
    }

    #[test]
    fn test_render_no_collections() {
        assert_eq!(render_collections(&[]), "No collections found");
    }
}
