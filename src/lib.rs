//! Cookie Crunch (workspace facade crate).
//!
//! Re-exports the member crates as `cookie_crunch::{types, core, adapter}` so
//! the runner, integration tests and benches share one import path.

pub use cookie_crunch_adapter as adapter;
pub use cookie_crunch_core as core;
pub use cookie_crunch_types as types;
