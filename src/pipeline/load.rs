//! Snapshot loading for command handlers.

use crate::store::{load_snapshot, InMemoryStore};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A variables snapshot loaded from disk, with where it came from.
#[derive(Debug)]
pub struct LoadedSnapshot {
    pub store: InMemoryStore,
    pub path: PathBuf,
}

/// Load a snapshot file, logging what it contains.
pub fn load_snapshot_with_context(path: &Path) -> Result<LoadedSnapshot> {
    let store = load_snapshot(path)
        .with_context(|| format!("Failed to load snapshot: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        collections = store.collection_count(),
        variables = store.variable_count(),
        "snapshot loaded"
    );
    Ok(LoadedSnapshot {
        store,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_has_path_in_error() {
        let err = load_snapshot_with_context(Path::new("/nonexistent/vars.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/vars.json"));
    }

    #[test]
    fn test_loads_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"collections":[{{"id":"c1","name":"Core","modes":[{{"modeId":"m1","name":"Light"}}]}}],"variables":[]}}"#
        )
        .unwrap();
        let loaded = load_snapshot_with_context(file.path()).unwrap();
        assert_eq!(loaded.store.collection_count(), 1);
        assert_eq!(loaded.path, file.path());
    }
}
