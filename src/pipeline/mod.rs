//! Pipeline orchestration for table creation.
//!
//! Shared logic for the load → select → build → sort → compose → place
//! workflow, used by both the CLI handlers and the UI message controller.

mod create;
mod load;
mod output;
mod report;
mod request;

pub use create::{create_table, prepare_table, TableOutcome};
pub use load::{load_snapshot_with_context, LoadedSnapshot};
pub use output::{auto_detect_format, write_output, OutputTarget};
pub use report::output_report;
pub use request::CreateTableRequest;

use crate::error::VarTableError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or decode a snapshot file
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// The table could not be created from the request
    #[error("Table creation failed: {source}")]
    CreateFailed {
        #[source]
        source: VarTableError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for scripting
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// The request named an unknown collection or mode, or selected nothing
    pub const INVALID_SELECTION: i32 = 2;
    pub const ERROR: i32 = 3;
}

/// Exit code for an error returned by a command handler.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    let user_error = err.chain().any(|cause| {
        cause
            .downcast_ref::<VarTableError>()
            .is_some_and(VarTableError::is_user_error)
    });
    if user_error {
        exit_codes::INVALID_SELECTION
    } else {
        exit_codes::ERROR
    }
}
