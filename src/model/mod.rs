//! Data model for design-token variables.
//!
//! [`Variable`], [`Collection`] and [`Mode`] mirror the host's read-only
//! object graph. [`VariableRecord`] is the pipeline's own entity: built
//! fresh for each table, consumed by the composer, then dropped.

mod record;
mod variable;

pub use record::*;
pub use variable::*;
