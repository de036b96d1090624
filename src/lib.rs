//! Match-3 puzzle core (workspace facade crate).
//!
//! This package keeps a single `match3::{core,engine,adapter,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.

pub use match3_adapter as adapter;
pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
