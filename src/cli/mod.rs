//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs, one per subcommand. Each returns
//! the exit code the process should end with.

mod collections;
mod groups;
mod session;
mod table;

pub use collections::run_collections;
pub use groups::run_groups;
pub use session::{run_session, serve, SessionConfig};
pub use table::{run_table, TableConfig};
