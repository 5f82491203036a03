//! Grouping of variables by name prefix.
//!
//! A variable's group is the path segment before the first `/` of its name.
//! Names without a separator (or with an empty first segment) are
//! *individual*: each forms its own singleton group keyed by the full name.

mod sort;

pub use sort::{compare_ci, compare_names, compare_records, sort_records};

use crate::error::{Result, VarTableError};
use crate::model::{Variable, VariableRecord, PATH_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Anything that carries a variable name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Variable {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for VariableRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Grouping key derived from a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Shared first path segment
    Prefix(String),
    /// Ungrouped variable, keyed by its full name
    Individual(String),
}

impl GroupKey {
    #[must_use]
    pub fn of(name: &str) -> Self {
        match name.split_once(PATH_SEPARATOR) {
            Some((prefix, _)) if !prefix.is_empty() => Self::Prefix(prefix.to_string()),
            _ => Self::Individual(name.to_string()),
        }
    }

    /// Identifier exchanged with the UI when selecting groups.
    ///
    /// This is the prefix, or the full name for an individual variable. An
    /// individual variable named `color` therefore shares its identifier
    /// with the `color/…` prefix group, and selecting `color` selects both.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Prefix(s) | Self::Individual(s) => s,
        }
    }

    #[must_use]
    pub const fn is_individual(&self) -> bool {
        matches!(self, Self::Individual(_))
    }
}

/// Group prefix used for ordering: text before the first `/`, or the full
/// name for individual variables.
#[must_use]
pub fn prefix_of(name: &str) -> &str {
    match name.split_once(PATH_SEPARATOR) {
        Some((prefix, _)) if !prefix.is_empty() => prefix,
        _ => name,
    }
}

/// A group of items sharing a [`GroupKey`], members in input order.
#[derive(Debug, Clone)]
pub struct Group<'a, T> {
    pub key: GroupKey,
    pub members: Vec<&'a T>,
}

impl<T> Group<'_, T> {
    #[must_use]
    pub fn label(&self) -> &str {
        self.key.id()
    }

    #[must_use]
    pub const fn is_individual(&self) -> bool {
        self.key.is_individual()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition items into groups.
///
/// Prefix groups come first, sorted case-insensitively by prefix, followed
/// by individual groups sorted case-insensitively by full name. Every input
/// item lands in exactly one group.
pub fn classify<T: Named>(items: &[T]) -> Vec<Group<'_, T>> {
    let mut groups: Vec<Group<'_, T>> = Vec::new();
    let mut index: std::collections::HashMap<GroupKey, usize> = std::collections::HashMap::new();

    for item in items {
        let key = GroupKey::of(item.name());
        match index.get(&key) {
            Some(&i) => groups[i].members.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    members: vec![item],
                });
            }
        }
    }

    groups.sort_by(|a, b| {
        a.is_individual()
            .cmp(&b.is_individual())
            .then_with(|| compare_ci(a.key.id(), b.key.id()))
    });
    groups
}

/// Group summary reported to the UI for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: String,
    pub label: String,
    pub count: usize,
    pub is_individual: bool,
}

/// Summaries for every group in `items`, in classification order.
pub fn group_summaries<T: Named>(items: &[T]) -> Vec<GroupSummary> {
    classify(items)
        .into_iter()
        .map(|group| GroupSummary {
            id: group.key.id().to_string(),
            label: group.key.id().to_string(),
            count: group.len(),
            is_individual: group.is_individual(),
        })
        .collect()
}

/// Keep only items whose group identifier is in `selected`.
///
/// An identifier is a prefix, or the exact name of an individual variable;
/// see [`GroupKey::id`] for names that collide with a prefix. Fails with [`VarTableError::NoSelection`] when nothing matches.
pub fn filter_by_groups<T: Named>(items: Vec<T>, selected: &[String]) -> Result<Vec<T>> {
    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let matched: Vec<T> = items
        .into_iter()
        .filter(|item| wanted.contains(GroupKey::of(item.name()).id()))
        .collect();

    if matched.is_empty() {
        return Err(VarTableError::no_selection(selected.iter().cloned()));
    }

    tracing::debug!(
        matched = matched.len(),
        groups = selected.len(),
        "filtered variables by group"
    );
    Ok(matched)
}
