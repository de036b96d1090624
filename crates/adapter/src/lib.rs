//! Adapter module - the host-facing boundary of the puzzle core
//!
//! Hosts (a mobile webview bridge, a terminal front end, a test bot) embed
//! a [`GameDriver`] and speak to it through plain function calls:
//!
//! 1. **Input**: `tap(row, col)` feeds one cell-select in. A matching swap
//!    is resolved to completion before the call returns.
//! 2. **State**: `observe()` returns a JSON-serializable [`Observation`]
//!    snapshot (grid, score, moves, phase, selection).
//! 3. **Events**: `poll_event()` drains queued [`EventMessage`]s FIFO, one
//!    `score_changed` per settled cascade step plus a final `game_over`.
//!
//! Messages serialize as line-delimited JSON with snake_case fields, so a
//! host on the other side of any string pipe can replay them verbatim.
//!
//! Errors at this boundary are `anyhow::Result`; the core's `CoreError`
//! values arrive wrapped with context.

pub mod driver;
pub mod protocol;

pub use driver::{GameDriver, TapReport};
pub use protocol::{CellRef, EventMessage, Observation, PhaseName};
