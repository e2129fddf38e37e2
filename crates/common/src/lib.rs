//! Pieces shared by every crate in the workspace: logging setup and the
//! small JSON envelopes the HTTP layer returns.

pub mod types;
pub mod utils;
