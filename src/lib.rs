//! **Design-token variables, resolved and laid out as a table.**
//!
//! `vartable` takes the variables of one collection of a design tool, groups
//! them by name prefix, resolves every per-mode value (following alias
//! chains across collections), and composes a themed table with one row per
//! variable and one column per mode. The table can be placed on a canvas
//! through the [`host::Canvas`] trait or rendered as a report.
//!
//! ## Pipeline
//!
//! 1. **[`store`]**: read-only access to variables and collections through
//!    [`VariableStore`]; snapshots exported from the host load into an
//!    [`InMemoryStore`].
//! 2. **[`grouping`]**: groups by first path segment; names without one
//!    form individual groups. Selection by group id.
//! 3. **[`resolve`]** and **[`records`]**: one [`VariableRecord`] per
//!    variable with display values, alias-resolved colours and swatch
//!    bindings per mode.
//! 4. **[`table`]**: sorted records composed into a [`TableLayout`], then a
//!    visual [`TableTree`].
//! 5. **[`host`]**: the tree materialized onto a canvas, with per-session
//!    font and paint caches.
//!
//! [`pipeline`] wires the steps together; [`protocol`] exposes them to the
//! plugin UI as JSON messages.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use vartable::{load_snapshot, prepare_table, CreateTableRequest, TableOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = load_snapshot(Path::new("variables.json"))?;
//!     let request = CreateTableRequest::new("VariableCollectionId:1:2")
//!         .with_modes(["1:0"])
//!         .with_groups(["color", "spacing"]);
//!
//!     let layout = prepare_table(&store, &request, TableOptions::default())?;
//!     for row in layout.rows() {
//!         println!("{} {}", row.name, row.dev_token);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Placing a Table
//!
//! ```
//! use vartable::model::{Collection, Mode, RawValue, Rgba, Variable, VariableType};
//! use vartable::{create_table, CompositionSession, CreateTableRequest, InMemoryStore};
//! use vartable::{MemoryCanvas, TableOptions};
//!
//! let store = InMemoryStore::new()
//!     .with_collection(Collection::new("c1", "Core", vec![Mode::new("m1", "Light")]))
//!     .with_variable(
//!         Variable::new("v1", "color/red", "c1", VariableType::Color)
//!             .with_value("m1", RawValue::Color(Rgba::rgb(1.0, 0.0, 0.0))),
//!     );
//! let request = CreateTableRequest::new("c1").with_modes(["m1"]).with_groups(["color"]);
//!
//! let mut canvas = MemoryCanvas::new();
//! let outcome = create_table(
//!     &store,
//!     &request,
//!     TableOptions::default(),
//!     &mut canvas,
//!     &mut CompositionSession::new(),
//! )
//! .unwrap();
//! assert_eq!(canvas.selection(), &[outcome.placed.root]);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod grouping;
pub mod host;
pub mod model;
pub mod pipeline;
pub mod protocol;
pub mod records;
pub mod reports;
pub mod resolve;
pub mod store;
pub mod table;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, Preferences, PreferencesStore, Validatable};
pub use error::{ErrorContext, OptionContext, Result, VarTableError};
pub use grouping::{classify, filter_by_groups, group_summaries, sort_records, GroupSummary};
pub use host::{materialize, Canvas, CanvasError, CompositionSession, MemoryCanvas};
pub use model::{Collection, DisplayValue, Mode, RawValue, Variable, VariableRecord, VariableType};
pub use pipeline::{create_table, prepare_table, CreateTableRequest, TableOutcome};
pub use protocol::{Controller, CoreMessage, Reply, UiMessage};
pub use records::{build_records, dev_token};
pub use reports::{create_reporter, ReportFormat, TableReporter};
pub use resolve::ValueResolver;
pub use store::{load_snapshot, InMemoryStore, ParseError, StoreError, VariableStore};
pub use table::{build_tree, TableComposer, TableLayout, TableOptions, TableTheme, TableTree};
