//! Normalized per-variable records built for one table-generation run.

use super::{Rgba, VariableRef, VariableType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A resolved value ready for text rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayValue {
    /// No value stored for the mode
    Empty,
    /// Alias target name, already dashed for display
    Alias(String),
    Text(String),
    Number(f64),
    Boolean(bool),
    Color(Rgba),
}

impl DisplayValue {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Direct colour carried by this value, if any
    #[must_use]
    pub const fn as_color(&self) -> Option<&Rgba> {
        match self {
            Self::Color(color) => Some(color),
            _ => None,
        }
    }
}

/// One row of the table: everything needed to render a variable.
///
/// Every per-mode map holds exactly one entry per requested mode, in the
/// requested order, even when the entry is a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRecord {
    pub variable_id: String,
    pub name: String,
    pub dev_token: String,
    pub var_type: VariableType,
    pub display_values: IndexMap<String, DisplayValue>,
    /// Present only for colour variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_colors: Option<IndexMap<String, Option<Rgba>>>,
    /// Present only for colour variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_bindings: Option<IndexMap<String, Option<VariableRef>>>,
}

impl VariableRecord {
    #[must_use]
    pub fn display_value(&self, mode_id: &str) -> Option<&DisplayValue> {
        self.display_values.get(mode_id)
    }

    /// Resolved colour for the mode, flattening "not a colour variable"
    /// and "unresolvable" into `None`.
    #[must_use]
    pub fn resolved_color(&self, mode_id: &str) -> Option<Rgba> {
        self.resolved_colors
            .as_ref()
            .and_then(|colors| colors.get(mode_id).copied().flatten())
    }

    #[must_use]
    pub fn alias_binding(&self, mode_id: &str) -> Option<&VariableRef> {
        self.alias_bindings
            .as_ref()
            .and_then(|bindings| bindings.get(mode_id))
            .and_then(Option::as_ref)
    }

    /// Group prefix: text before the first `/`, or the full name
    #[must_use]
    pub fn group_prefix(&self) -> &str {
        crate::grouping::prefix_of(&self.name)
    }
}
