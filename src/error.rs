//! Unified error types for vartable.
//!
//! Only the fatal taxonomy lives here: lookup misses, empty selections and
//! malformed requests abort table creation and surface to the user. Alias
//! resolution failures, missing fonts and broken rows are absorbed by the
//! layers that produce them and never reach this type.

use crate::host::CanvasError;
use crate::reports::ReportError;
use crate::store::{ParseError, StoreError};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vartable operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum VarTableError {
    /// A collection, mode or variable lookup missed
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The selected groups matched zero variables
    #[error("No variables found in the selected groups ({})", .groups.join(", "))]
    NoSelection { groups: Vec<String> },

    /// The creation request is missing required fields
    #[error("Missing required parameters: {0}")]
    MissingParameters(String),

    /// The host store failed while answering a query
    #[error("Variable store query failed: {context}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    /// Errors while reading a variables snapshot
    #[error("Failed to parse snapshot: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseError,
    },

    /// Errors while materializing the table onto the canvas
    #[error("Canvas operation failed: {context}")]
    Canvas {
        context: String,
        #[source]
        source: CanvasError,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportError,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for vartable operations
pub type Result<T> = std::result::Result<T, VarTableError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl VarTableError {
    /// Create a not-found error for the given entity kind
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create an empty-selection error listing the requested groups
    pub fn no_selection<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::NoSelection {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a missing-parameters error
    pub fn missing_parameters(message: impl Into<String>) -> Self {
        Self::MissingParameters(message.into())
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error belongs to the user-facing fatal taxonomy
    /// (lookup miss, empty selection, malformed request).
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NoSelection { .. } | Self::MissingParameters(_)
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for VarTableError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<ParseError> for VarTableError {
    fn from(err: ParseError) -> Self {
        Self::Parse {
            context: String::new(),
            source: err,
        }
    }
}

impl From<StoreError> for VarTableError {
    fn from(err: StoreError) -> Self {
        Self::Store {
            context: String::new(),
            source: err,
        }
    }
}

impl From<CanvasError> for VarTableError {
    fn from(err: CanvasError) -> Self {
        Self::Canvas {
            context: String::new(),
            source: err,
        }
    }
}

impl From<ReportError> for VarTableError {
    fn from(err: ReportError) -> Self {
        Self::Report {
            context: String::new(),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so
/// nested calls produce a chain such as `"loading snapshot: variable v1"`.
///
/// ```ignore
/// use vartable::error::ErrorContext;
///
/// let store = load_snapshot(path)
///     .with_context(|| format!("loading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<VarTableError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: VarTableError, new_ctx: &str) -> VarTableError {
    match err {
        VarTableError::Store {
            context: existing,
            source,
        } => VarTableError::Store {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VarTableError::Parse {
            context: existing,
            source,
        } => VarTableError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VarTableError::Canvas {
            context: existing,
            source,
        } => VarTableError::Canvas {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VarTableError::Report {
            context: existing,
            source,
        } => VarTableError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VarTableError::Io {
            path,
            message,
            source,
        } => VarTableError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        VarTableError::Config(msg) => VarTableError::Config(chain_context(new_ctx, &msg)),
        VarTableError::MissingParameters(msg) => {
            VarTableError::MissingParameters(chain_context(new_ctx, &msg))
        }
        // User-facing lookup errors keep their original message
        other @ (VarTableError::NotFound { .. } | VarTableError::NoSelection { .. }) => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a not-found error for the given entity.
    fn or_not_found(self, kind: &'static str, id: &str) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn or_not_found(self, kind: &'static str, id: &str) -> Result<T> {
        self.ok_or_else(|| VarTableError::not_found(kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VarTableError::not_found("Collection", "c-42");
        assert_eq!(err.to_string(), "Collection not found: c-42");

        let err = VarTableError::no_selection(["color", "space"]);
        let display = err.to_string();
        assert!(display.contains("color, space"), "{display}");

        let err = VarTableError::missing_parameters("collectionId");
        assert!(err.to_string().contains("collectionId"));
    }

    #[test]
    fn test_user_error_classification() {
        assert!(VarTableError::not_found("Variable", "v").is_user_error());
        assert!(VarTableError::no_selection(Vec::<String>::new()).is_user_error());
        assert!(VarTableError::missing_parameters("modes").is_user_error());
        assert!(!VarTableError::config("bad").is_user_error());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = VarTableError::io("/path/to/snapshot.json", io_err);

        assert!(err.to_string().contains("/path/to/snapshot.json"));
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(VarTableError::Parse {
            context: "variable v1".to_string(),
            source: ParseError::InvalidStructure("bad".to_string()),
        });

        match initial.context("loading snapshot") {
            Err(VarTableError::Parse { context, .. }) => {
                assert_eq!(context, "loading snapshot: variable v1");
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_context_does_not_rewrite_not_found() {
        let initial: Result<()> = Err(VarTableError::not_found("Collection", "c1"));
        let err = initial.context("creating table").unwrap_err();
        assert_eq!(err.to_string(), "Collection not found: c1");
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(VarTableError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let none_value: Option<i32> = None;
        match none_value.or_not_found("Mode", "m9") {
            Err(VarTableError::NotFound { kind, id }) => {
                assert_eq!(kind, "Mode");
                assert_eq!(id, "m9");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
        assert_eq!(
            chain_context("outer", "middle: inner"),
            "outer: middle: inner"
        );
    }
}
