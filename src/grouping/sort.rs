//! Deterministic ordering of variable records.

use super::prefix_of;
use crate::model::VariableRecord;
use std::cmp::Ordering;

/// Case-insensitive comparison with the exact string as tie-breaker, so
/// the order stays total for names differing only in case.
///
/// Lowercase forms compare by code point, not locale collation: `a-b` <
/// `a1` < `a_b`, and `é` sorts after `z`.
#[must_use]
pub fn compare_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Order names by group prefix, then by full path.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    compare_ci(prefix_of(a), prefix_of(b)).then_with(|| compare_ci(a, b))
}

#[must_use]
pub fn compare_records(a: &VariableRecord, b: &VariableRecord) -> Ordering {
    compare_names(&a.name, &b.name)
}

/// Sort records in place: groups cluster together, alphabetical inside.
pub fn sort_records(records: &mut [VariableRecord]) {
    records.sort_by(compare_records);
}
