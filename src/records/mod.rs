//! Variable record construction.

mod builder;
mod dev_token;

pub use builder::{build_records, RecordBuilder};
pub use dev_token::{dev_token, token_name};
