//! Read-only access to the host's variables.
//!
//! The resolution algorithms never own variable identity; everything goes
//! through the [`VariableStore`] trait. [`InMemoryStore`] implements it for
//! snapshots exported from the host and for tests.
//!
//! ```no_run
//! use vartable::store::{load_snapshot, VariableStore};
//! use std::path::Path;
//!
//! let store = load_snapshot(Path::new("variables.json")).unwrap();
//! for collection in store.list_collections().unwrap() {
//!     println!("{} ({} modes)", collection.name, collection.modes.len());
//! }
//! ```

mod memory;
mod snapshot;

pub use memory::InMemoryStore;
pub use snapshot::{
    decode_raw_value, load_snapshot, FormatConfidence, ParseError, SnapshotDetection,
    SnapshotParser, MAX_SNAPSHOT_SIZE,
};

use crate::model::{Collection, Variable, VariableType};
use thiserror::Error;

/// Failure of a store query itself (as opposed to a lookup miss).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("lookup of '{id}' failed: {reason}")]
    LookupFailed { id: String, reason: String },
}

/// Query interface over the host's variable graph.
///
/// Lookups distinguish a miss (`Ok(None)`) from a failed query (`Err`), since
/// the two degrade to different placeholder text when resolving aliases.
pub trait VariableStore: Sync {
    /// All collections, in host order
    fn list_collections(&self) -> Result<Vec<&Collection>, StoreError>;

    /// Variables, optionally restricted to one collection
    fn list_variables(&self, collection_id: Option<&str>) -> Result<Vec<&Variable>, StoreError>;

    fn variable_by_id(&self, id: &str) -> Result<Option<&Variable>, StoreError>;

    fn collection_by_id(&self, id: &str) -> Result<Option<&Collection>, StoreError>;

    /// First variable (across all collections) whose name matches exactly
    /// and whose type is `var_type`.
    fn find_variable_by_name(
        &self,
        name: &str,
        var_type: VariableType,
    ) -> Result<Option<&Variable>, StoreError> {
        Ok(self
            .list_variables(None)?
            .into_iter()
            .find(|v| v.name == name && v.resolved_type == var_type))
    }
}
