//! Table creation request.

use crate::error::{Result, VarTableError};
use crate::table::TableTheme;
use serde::{Deserialize, Serialize};

/// Everything needed to create one table, as sent by the UI.
///
/// Missing fields deserialize to empty values so that [`validate`]
/// can report them instead of failing at the JSON layer.
///
/// [`validate`]: CreateTableRequest::validate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub collection_id: String,
    /// Title shown on the table; the collection's own name when empty
    pub collection_name: String,
    /// Mode ids, in column order
    pub modes: Vec<String>,
    /// Group identifiers: prefixes, or full names of individual variables
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_theme: Option<TableTheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_dev_token: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_swatches: Option<bool>,
}

impl CreateTableRequest {
    #[must_use]
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes = modes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Fail with `MissingParameters` naming every empty required field.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.collection_id.trim().is_empty() {
            missing.push("collectionId");
        }
        if self.modes.is_empty() {
            missing.push("modes");
        }
        if self.groups.is_empty() {
            missing.push("groups");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(VarTableError::missing_parameters(missing.join(", ")))
        }
    }
}
