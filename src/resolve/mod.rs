//! Value resolution: raw stored values to display-ready values and colours.
//!
//! Every failure here is absorbed. A dangling alias, a failed lookup or an
//! alias cycle degrades to a placeholder string or to `None`, and is logged
//! at `debug`; nothing propagates past this layer.

use crate::model::{
    DisplayValue, RawValue, Rgba, Variable, VariableRef, VariableType, PATH_SEPARATOR,
};
use crate::store::{StoreError, VariableStore};
use std::collections::HashSet;
use thiserror::Error;

/// Shown when an alias points at a variable the store does not know.
pub const UNKNOWN_VARIABLE: &str = "Unknown variable";

/// Shown when the store failed while looking up an alias target.
pub const ALIAS_ERROR: &str = "Error resolving alias";

/// Reasons a colour could not be resolved. Internal to resolution; callers
/// only ever see `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("alias cycle through '{0}'")]
    Cycle(String),

    #[error("alias target '{0}' does not exist")]
    Dangling(String),

    #[error(transparent)]
    Lookup(#[from] StoreError),

    #[error("alias target '{0}' is not a colour variable")]
    NotColor(String),

    #[error("'{0}' has no value to follow")]
    MissingValue(String),

    #[error("value is not a colour")]
    Unresolvable,
}

/// Resolves raw values against a [`VariableStore`].
#[derive(Debug)]
pub struct ValueResolver<'s, S: ?Sized> {
    store: &'s S,
}

impl<S: ?Sized> Clone for ValueResolver<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for ValueResolver<'_, S> {}

impl<'s, S: VariableStore + ?Sized> ValueResolver<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Resolve the value shown in a table cell.
    ///
    /// Aliases show the target's name with `/` rewritten to `-`; colours and
    /// scalars pass through for the formatter.
    pub fn display_value(
        &self,
        variable: &Variable,
        mode_id: &str,
        raw: Option<&RawValue>,
    ) -> DisplayValue {
        let Some(raw) = raw else {
            return DisplayValue::Empty;
        };

        match raw {
            RawValue::Alias { target_id } => match self.store.variable_by_id(target_id) {
                Ok(Some(target)) => DisplayValue::Alias(target.display_name()),
                Ok(None) => {
                    tracing::debug!(
                        variable = %variable.name,
                        mode = mode_id,
                        target = %target_id,
                        "alias target not found"
                    );
                    DisplayValue::Text(UNKNOWN_VARIABLE.to_string())
                }
                Err(e) => {
                    tracing::debug!(
                        variable = %variable.name,
                        mode = mode_id,
                        "alias lookup failed: {}",
                        e
                    );
                    DisplayValue::Text(ALIAS_ERROR.to_string())
                }
            },
            RawValue::Color(color) => DisplayValue::Color(*color),
            RawValue::Number(n) => DisplayValue::Number(*n),
            RawValue::String(s) => DisplayValue::Text(s.clone()),
            RawValue::Boolean(b) => DisplayValue::Boolean(*b),
        }
    }

    /// Resolve the concrete colour of a colour variable for a mode, walking
    /// alias chains of any depth.
    ///
    /// Returns `None` for non-colour variables and for anything that cannot
    /// be resolved, including cycles.
    pub fn resolve_color(
        &self,
        variable: &Variable,
        mode_id: &str,
        raw: Option<&RawValue>,
    ) -> Option<Rgba> {
        if !variable.is_color() {
            return None;
        }
        match self.try_resolve_color(variable, mode_id, raw?) {
            Ok(color) => Some(color),
            Err(e) => {
                tracing::debug!(
                    variable = %variable.name,
                    mode = mode_id,
                    "colour unresolved: {}",
                    e
                );
                None
            }
        }
    }

    /// Fallible form of [`resolve_color`](Self::resolve_color).
    ///
    /// Each step looks up the target's value for the *same* mode and falls
    /// back to the target's first mode when absent. A visited set scoped to
    /// this call turns cycles into [`AliasError::Cycle`].
    pub fn try_resolve_color(
        &self,
        variable: &Variable,
        mode_id: &str,
        raw: &RawValue,
    ) -> Result<Rgba, AliasError> {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(variable.id.as_str());

        let mut current: &RawValue = raw;
        loop {
            let target: &'s Variable = match current {
                RawValue::Color(color) => return Ok(*color),
                RawValue::Alias { target_id } => self
                    .store
                    .variable_by_id(target_id)?
                    .ok_or_else(|| AliasError::Dangling(target_id.clone()))?,
                RawValue::String(name) if name.contains(PATH_SEPARATOR) => self
                    .store
                    .find_variable_by_name(name, VariableType::Color)?
                    .ok_or_else(|| AliasError::Dangling(name.clone()))?,
                _ => return Err(AliasError::Unresolvable),
            };

            if !target.is_color() {
                return Err(AliasError::NotColor(target.name.clone()));
            }
            if !visited.insert(target.id.as_str()) {
                return Err(AliasError::Cycle(target.name.clone()));
            }

            current = target
                .value_or_first(mode_id)
                .ok_or_else(|| AliasError::MissingValue(target.name.clone()))?;
        }
    }

    /// Variable a swatch should be bound to for this mode.
    ///
    /// Only one hop is followed: an alias binds to its direct target, not to
    /// the end of the chain, so the swatch tracks the token the designer
    /// actually referenced. A non-alias value binds to the variable itself.
    pub fn alias_binding(&self, variable: &Variable, mode_id: &str) -> Option<VariableRef> {
        match variable.value_for(mode_id)? {
            RawValue::Alias { target_id } => match self.store.variable_by_id(target_id) {
                Ok(Some(target)) => Some(VariableRef::from(target)),
                Ok(None) => None,
                Err(e) => {
                    tracing::debug!(variable = %variable.name, "binding lookup failed: {}", e);
                    None
                }
            },
            _ => Some(VariableRef::from(variable)),
        }
    }
}
