//! Groups command handler.

use crate::error::OptionContext;
use crate::grouping::{group_summaries, GroupSummary};
use crate::pipeline::{exit_codes, load_snapshot_with_context, write_output, OutputTarget};
use crate::store::VariableStore;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// List the selectable groups of one collection.
pub fn run_groups(snapshot: &Path, collection_id: &str, json: bool) -> Result<i32> {
    let loaded = load_snapshot_with_context(snapshot)?;
    loaded
        .store
        .collection_by_id(collection_id)
        .context("looking up collection")?
        .or_not_found("collection", collection_id)?;
    let variables = loaded
        .store
        .list_variables(Some(collection_id))
        .context("listing variables")?;
    let groups = group_summaries(&variables);

    let content = if json {
        serde_json::to_string_pretty(&groups).context("failed to serialize groups")?
    } else {
        render_groups(&groups, variables.len())
    };
    write_output(&content, &OutputTarget::Stdout, true)?;
    Ok(exit_codes::SUCCESS)
}

fn render_groups(groups: &[GroupSummary], total: usize) -> String {
    let width = groups
        .iter()
        .map(|g| UnicodeWidthStr::width(g.label.as_str()))
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for group in groups {
        let pad = width.saturating_sub(UnicodeWidthStr::width(group.label.as_str()));
        let marker = if group.is_individual { "  (individual)" } else { "" };
        let _ = writeln!(
            out,
            "{}{}  {:>4}{}",
            group.label,
            " ".repeat(pad),
            group.count,
            marker
        );
    }
    let _ = write!(out, "{} groups, {} variables", groups.len(), total);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, count: usize, is_individual: bool) -> GroupSummary {
        GroupSummary {
            id: id.into(),
            label: id.into(),
            count,
            is_individual,
        }
    }

    #[test]
    fn test_render_groups_aligns_counts() {
        let out = render_groups(
            &[summary("color", 12, false), summary("radius", 1, true)],
            13,
        );
        insta::assert_snapshot!(out, @r"
        color     12
        radius     1  (individual)
        2 groups, 13 variables
        ");
    }
}
