//! Snapshot ingestion: decoding the host's variables export into an
//! [`InMemoryStore`].
//!
//! The host exposes raw per-mode values as untyped JSON whose shape is only
//! known by property presence. They are decoded exactly once, here, into
//! [`RawValue`]; nothing downstream inspects JSON.

use super::InMemoryStore;
use crate::model::{Collection, RawValue, Rgba, Variable, VariableType};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Marker the host uses for alias values.
const ALIAS_MARKER: &str = "VARIABLE_ALIAS";

/// Maximum snapshot file size (64 MB).
pub const MAX_SNAPSHOT_SIZE: u64 = 64 * 1024 * 1024;

/// Errors that can occur while reading a snapshot
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("Invalid snapshot structure: {0}")]
    InvalidStructure(String),

    #[error("Not a variables snapshot: {0}")]
    UnknownFormat(String),

    #[error("Invalid value for variable '{variable}' in mode '{mode}': {message}")]
    InvalidValue {
        variable: String,
        mode: String,
        message: String,
    },

    #[error("Duplicate variable id: {0}")]
    DuplicateVariable(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

/// Confidence level for snapshot detection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    /// Definitely not a snapshot
    pub const NONE: Self = Self(0.0);
    /// Might be a snapshot
    pub const LOW: Self = Self(0.25);
    /// Almost certainly a snapshot
    pub const HIGH: Self = Self(0.75);

    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn can_parse(&self) -> bool {
        self.0 >= 0.25
    }
}

impl Default for FormatConfidence {
    fn default() -> Self {
        Self::NONE
    }
}

/// Result of lightweight snapshot detection
#[derive(Debug, Clone, Default)]
pub struct SnapshotDetection {
    pub confidence: FormatConfidence,
    pub warnings: Vec<String>,
}

impl SnapshotDetection {
    const fn with_confidence(confidence: FormatConfidence) -> Self {
        Self {
            confidence,
            warnings: Vec::new(),
        }
    }

    fn warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }
}

#[derive(Deserialize)]
struct WireSnapshot {
    #[serde(default, alias = "variableCollections")]
    collections: Vec<Collection>,
    #[serde(default)]
    variables: Vec<WireVariable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVariable {
    id: String,
    name: String,
    #[serde(alias = "collectionId")]
    variable_collection_id: String,
    resolved_type: String,
    #[serde(default)]
    values_by_mode: IndexMap<String, Value>,
}

/// Parser for the host's variables export.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapshotParser;

impl SnapshotParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Detect whether `content` looks like a variables snapshot without
    /// fully parsing it.
    #[must_use]
    pub fn detect(&self, content: &str) -> SnapshotDetection {
        let trimmed = content.trim_start();
        if !trimmed.starts_with('{') {
            return SnapshotDetection::default();
        }

        let has_variables = content.contains("\"variables\"");
        let has_values = content.contains("\"valuesByMode\"");
        let has_collections =
            content.contains("\"collections\"") || content.contains("\"variableCollections\"");

        match (has_variables, has_values, has_collections) {
            (true, true, true) => SnapshotDetection::with_confidence(FormatConfidence::HIGH),
            (true, true, false) => SnapshotDetection::with_confidence(FormatConfidence::HIGH)
                .warning("snapshot has no collections; mode names will be unavailable"),
            (true, false, _) | (false, _, true) => {
                SnapshotDetection::with_confidence(FormatConfidence::LOW)
            }
            _ => SnapshotDetection::default(),
        }
    }

    /// Parse a snapshot from a file path
    pub fn parse(&self, path: &Path) -> Result<InMemoryStore, ParseError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Parse a snapshot from string content
    pub fn parse_str(&self, content: &str) -> Result<InMemoryStore, ParseError> {
        let detection = self.detect(content);
        if !detection.confidence.can_parse() {
            return Err(ParseError::UnknownFormat(
                "expected an object with 'variables' and 'collections'".to_string(),
            ));
        }
        for warning in &detection.warnings {
            tracing::warn!("{}", warning);
        }

        let wire: WireSnapshot = serde_json::from_str(content)?;
        let mut store = InMemoryStore::new();

        for collection in wire.collections {
            store.add_collection(collection);
        }

        for wire_var in wire.variables {
            let variable = decode_variable(wire_var)?;
            let id = variable.id.clone();
            if !store.add_variable(variable) {
                return Err(ParseError::DuplicateVariable(id));
            }
        }

        tracing::debug!(
            collections = store.collection_count(),
            variables = store.variable_count(),
            "decoded variables snapshot"
        );

        Ok(store)
    }
}

fn decode_variable(wire: WireVariable) -> Result<Variable, ParseError> {
    let resolved_type =
        VariableType::parse(&wire.resolved_type).ok_or_else(|| ParseError::InvalidValue {
            variable: wire.name.clone(),
            mode: "*".to_string(),
            message: format!("unsupported type '{}'", wire.resolved_type),
        })?;

    let mut variable = Variable::new(wire.id, wire.name, wire.variable_collection_id, resolved_type);
    for (mode_id, value) in wire.values_by_mode {
        let raw = decode_raw_value(&value).ok_or_else(|| ParseError::InvalidValue {
            variable: variable.name.clone(),
            mode: mode_id.clone(),
            message: format!("unrecognized value shape: {value}"),
        })?;
        variable.values_by_mode.insert(mode_id, raw);
    }
    Ok(variable)
}

/// Decode one untyped host value.
///
/// Precedence: alias marker, RGBA object, number, string, boolean. Returns
/// `None` for any other shape.
#[must_use]
pub fn decode_raw_value(value: &Value) -> Option<RawValue> {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some(ALIAS_MARKER) {
                return map
                    .get("id")
                    .and_then(Value::as_str)
                    .map(RawValue::alias);
            }
            let channel = |key: &str| map.get(key).and_then(Value::as_f64);
            match (channel("r"), channel("g"), channel("b")) {
                (Some(r), Some(g), Some(b)) => Some(RawValue::Color(Rgba {
                    r,
                    g,
                    b,
                    a: channel("a"),
                })),
                _ => None,
            }
        }
        Value::Number(n) => n.as_f64().map(RawValue::Number),
        Value::String(s) => Some(RawValue::String(s.clone())),
        Value::Bool(b) => Some(RawValue::Boolean(*b)),
        Value::Null | Value::Array(_) => None,
    }
}

/// Load a snapshot file, refusing files above [`MAX_SNAPSHOT_SIZE`].
pub fn load_snapshot(path: &Path) -> Result<InMemoryStore, ParseError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_SNAPSHOT_SIZE {
        return Err(ParseError::IoError(format!(
            "snapshot is {} MB, exceeding the {} MB limit",
            metadata.len() / (1024 * 1024),
            MAX_SNAPSHOT_SIZE / (1024 * 1024),
        )));
    }
    SnapshotParser::new().parse(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::VariableStore;
    use serde_json::json;

    const SNAPSHOT: &str = r#"{
        "collections": [
            {"id": "c1", "name": "Tokens", "modes": [
                {"modeId": "m1", "name": "Light"},
                {"modeId": "m2", "name": "Dark"}
            ]}
        ],
        "variables": [
            {"id": "v1", "name": "color/bg", "variableCollectionId": "c1",
             "resolvedType": "COLOR",
             "valuesByMode": {
                "m1": {"r": 1, "g": 1, "b": 1, "a": 1},
                "m2": {"type": "VARIABLE_ALIAS", "id": "v2"}
             }},
            {"id": "v2", "name": "color/black", "variableCollectionId": "c1",
             "resolvedType": "COLOR",
             "valuesByMode": {"m1": {"r": 0, "g": 0, "b": 0}}}
        ]
    }"#;

    #[test]
    fn test_detect_snapshot() {
        let detection = SnapshotParser::new().detect(SNAPSHOT);
        assert!(detection.confidence.value() >= 0.75);
        assert!(detection.warnings.is_empty());
    }

    #[test]
    fn test_detect_rejects_non_object() {
        let detection = SnapshotParser::new().detect("[1, 2, 3]");
        assert!(!detection.confidence.can_parse());
    }

    #[test]
    fn test_parse_snapshot() {
        let store = SnapshotParser::new().parse_str(SNAPSHOT).unwrap();
        assert_eq!(store.collection_count(), 1);
        assert_eq!(store.variable_count(), 2);

        let bg = store.variable_by_id("v1").unwrap().unwrap();
        assert_eq!(bg.value_for("m2"), Some(&RawValue::alias("v2")));
        assert_eq!(
            bg.value_for("m1"),
            Some(&RawValue::Color(Rgba::rgba(1.0, 1.0, 1.0, 1.0)))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let result = SnapshotParser::new().parse_str(r#"{"some": "thing"}"#);
        assert!(matches!(result, Err(ParseError::UnknownFormat(_))));
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let content = r#"{"collections": [], "variables": [
            {"id": "v1", "name": "a", "variableCollectionId": "c1", "resolvedType": "STRING", "valuesByMode": {}},
            {"id": "v1", "name": "b", "variableCollectionId": "c1", "resolvedType": "STRING", "valuesByMode": {}}
        ]}"#;
        let result = SnapshotParser::new().parse_str(content);
        assert!(matches!(result, Err(ParseError::DuplicateVariable(id)) if id == "v1"));
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let content = r#"{"collections": [], "variables": [
            {"id": "v1", "name": "a", "variableCollectionId": "c1", "resolvedType": "VECTOR", "valuesByMode": {}}
        ]}"#;
        let result = SnapshotParser::new().parse_str(content);
        assert!(matches!(result, Err(ParseError::InvalidValue { .. })));
    }

    #[test]
    fn test_decode_raw_value_shapes() {
        assert_eq!(
            decode_raw_value(&json!({"type": "VARIABLE_ALIAS", "id": "x"})),
            Some(RawValue::alias("x"))
        );
        assert_eq!(
            decode_raw_value(&json!({"r": 0.5, "g": 0, "b": 1, "a": 0.25})),
            Some(RawValue::Color(Rgba::rgba(0.5, 0.0, 1.0, 0.25)))
        );
        assert_eq!(decode_raw_value(&json!(12.5)), Some(RawValue::Number(12.5)));
        assert_eq!(
            decode_raw_value(&json!("Inter")),
            Some(RawValue::String("Inter".to_string()))
        );
        assert_eq!(decode_raw_value(&json!(true)), Some(RawValue::Boolean(true)));
        assert_eq!(decode_raw_value(&json!(null)), None);
        assert_eq!(decode_raw_value(&json!({"r": 1})), None);
        assert_eq!(decode_raw_value(&json!({"type": "VARIABLE_ALIAS"})), None);
    }
}
