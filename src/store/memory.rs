//! In-memory [`VariableStore`].

use super::{StoreError, VariableStore};
use crate::model::{Collection, Variable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Variables and collections held in memory, keyed by id in host order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    collections: IndexMap<String, Collection>,
    variables: IndexMap<String, Variable>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection, replacing any collection with the same id.
    pub fn add_collection(&mut self, collection: Collection) -> &mut Self {
        self.collections.insert(collection.id.clone(), collection);
        self
    }

    /// Add a variable. Returns `false` if a variable with that id was already
    /// present (the existing entry is kept).
    pub fn add_variable(&mut self, variable: Variable) -> bool {
        if self.variables.contains_key(&variable.id) {
            return false;
        }
        self.variables.insert(variable.id.clone(), variable);
        true
    }

    #[must_use]
    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.add_collection(collection);
        self
    }

    #[must_use]
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.add_variable(variable);
        self
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }
}

impl VariableStore for InMemoryStore {
    fn list_collections(&self) -> Result<Vec<&Collection>, StoreError> {
        Ok(self.collections.values().collect())
    }

    fn list_variables(&self, collection_id: Option<&str>) -> Result<Vec<&Variable>, StoreError> {
        Ok(self
            .variables
            .values()
            .filter(|v| collection_id.map_or(true, |id| v.collection_id == id))
            .collect())
    }

    fn variable_by_id(&self, id: &str) -> Result<Option<&Variable>, StoreError> {
        Ok(self.variables.get(id))
    }

    fn collection_by_id(&self, id: &str) -> Result<Option<&Collection>, StoreError> {
        Ok(self.collections.get(id))
    }
}
