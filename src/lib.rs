//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{core,engine,types}` so callers and
//! the integration tests depend on one package while the implementation lives in
//! dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;
