//! Host-owned variable data: collections, modes, variables and raw values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path separator used in variable names to express grouping.
pub const PATH_SEPARATOR: char = '/';

/// Resolved scalar type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Color,
    Number,
    String,
    Boolean,
}

impl VariableType {
    /// Wire name used by the host API
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "COLOR",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
        }
    }

    /// Parse the host wire name (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "COLOR" => Some(Self::Color),
            "NUMBER" | "FLOAT" => Some(Self::Number),
            "STRING" => Some(Self::String),
            "BOOLEAN" => Some(Self::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Rgba {
    /// Opaque colour
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// Colour with explicit alpha
    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Alpha channel, treating an absent alpha as fully opaque
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(1.0)
    }

    /// Same colour without the alpha channel
    #[must_use]
    pub const fn opaque(&self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// Components quantized to 8 bits, used for content keys and hex output
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 4] {
        [
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b),
            channel_to_byte(self.alpha()),
        ]
    }
}

fn channel_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A raw value stored on a variable for one mode.
///
/// Decoded once at ingestion; nothing downstream inspects untyped JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    /// Reference to another variable, possibly in a different collection
    Alias { target_id: String },
    Color(Rgba),
    Number(f64),
    String(String),
    Boolean(bool),
}

impl RawValue {
    /// Alias target id when this value is an alias marker
    #[must_use]
    pub fn alias_target(&self) -> Option<&str> {
        match self {
            Self::Alias { target_id } => Some(target_id),
            _ => None,
        }
    }

    /// Build an alias marker
    pub fn alias(target_id: impl Into<String>) -> Self {
        Self::Alias {
            target_id: target_id.into(),
        }
    }
}

/// A theme/variant axis of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

impl Mode {
    pub fn new(mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode_id: mode_id.into(),
            name: name.into(),
        }
    }
}

/// A variable collection with its ordered modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
}

impl Collection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, modes: Vec<Mode>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modes,
        }
    }

    /// Look up one of this collection's modes
    #[must_use]
    pub fn mode(&self, mode_id: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.mode_id == mode_id)
    }
}

/// A named design token with per-mode values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub collection_id: String,
    pub resolved_type: VariableType,
    /// Raw values keyed by mode id, in the host's iteration order
    pub values_by_mode: IndexMap<String, RawValue>,
}

impl Variable {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        collection_id: impl Into<String>,
        resolved_type: VariableType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            collection_id: collection_id.into(),
            resolved_type,
            values_by_mode: IndexMap::new(),
        }
    }

    /// Builder-style helper to attach a value for a mode
    #[must_use]
    pub fn with_value(mut self, mode_id: impl Into<String>, value: RawValue) -> Self {
        self.values_by_mode.insert(mode_id.into(), value);
        self
    }

    /// Raw value stored for exactly this mode
    #[must_use]
    pub fn value_for(&self, mode_id: &str) -> Option<&RawValue> {
        self.values_by_mode.get(mode_id)
    }

    /// Raw value for this mode, falling back to the first mode this
    /// variable has a value for.
    #[must_use]
    pub fn value_or_first(&self, mode_id: &str) -> Option<&RawValue> {
        self.value_for(mode_id)
            .or_else(|| self.values_by_mode.values().next())
    }

    /// Name with path separators rewritten to dashes, as shown for aliases
    #[must_use]
    pub fn display_name(&self) -> String {
        dashed_path(&self.name)
    }

    #[must_use]
    pub const fn is_color(&self) -> bool {
        matches!(self.resolved_type, VariableType::Color)
    }
}

/// Rewrite `/` path separators to `-`.
#[must_use]
pub fn dashed_path(name: &str) -> String {
    name.replace(PATH_SEPARATOR, "-")
}

/// Lightweight reference to a variable, used for swatch binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableRef {
    pub id: String,
    pub name: String,
}

impl From<&Variable> for VariableRef {
    fn from(variable: &Variable) -> Self {
        Self {
            id: variable.id.clone(),
            name: variable.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_or_first_falls_back_in_insertion_order() {
        let var = Variable::new("v1", "color/bg", "c1", VariableType::Color)
            .with_value("m2", RawValue::Color(Rgba::rgb(0.0, 0.0, 1.0)))
            .with_value("m1", RawValue::Color(Rgba::rgb(1.0, 0.0, 0.0)));

        assert_eq!(
            var.value_or_first("m3"),
            Some(&RawValue::Color(Rgba::rgb(0.0, 0.0, 1.0)))
        );
        assert_eq!(
            var.value_or_first("m1"),
            Some(&RawValue::Color(Rgba::rgb(1.0, 0.0, 0.0)))
        );
    }

    #[test]
    fn test_display_name_dashes_path() {
        let var = Variable::new("v1", "color/primary/500", "c1", VariableType::Color);
        assert_eq!(var.display_name(), "color-primary-500");
    }

    #[test]
    fn test_variable_type_parse() {
        assert_eq!(VariableType::parse("color"), Some(VariableType::Color));
        assert_eq!(VariableType::parse("FLOAT"), Some(VariableType::Number));
        assert_eq!(VariableType::parse("vector"), None);
    }

    #[test]
    fn test_rgba_bytes_clamp() {
        let color = Rgba::rgba(1.2, 0.5, -0.1, 0.5);
        assert_eq!(color.to_bytes(), [255, 128, 0, 128]);
        assert!((Rgba::rgb(0.0, 0.0, 0.0).alpha() - 1.0).abs() < f64::EPSILON);
    }
}
