//! Core match-3 logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and cascade
//! simulation. It has **zero dependencies** on UI, networking, or I/O,
//! making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is exercised by unit tests
//! - **Portable**: Runs in any host (mobile webview bridge, terminal, headless)
//!
//! # Module Structure
//!
//! - [`board`]: square tile grid with match-free generation and adjacency swaps
//! - [`detect`]: run scanner and flood-fill grouping of matched cells
//! - [`cascade`]: remove-gravity-refill resolver, exposed as a lazy step sequence
//! - [`scoring`]: per-cell scoring with the escalating chain multiplier
//! - [`session`]: the tap-driven Idle/OneSelected/Resolving state machine
//! - [`snapshot`]: flat per-frame view for renderers and hosts
//! - [`rng`]: injectable seeded LCG
//!
//! # Game Rules
//!
//! - A move is a swap of two four-directionally adjacent tiles.
//! - Three or more equal tiles in a straight row or column match; L and T
//!   clusters merge into one group.
//! - Matched tiles are removed, survivors fall toward the high row index,
//!   fresh tiles fill the holes, and any new matches chain with an
//!   escalating multiplier.
//! - A swap that matches nothing is reverted and (by default) is the only
//!   thing that costs a move.
//!
//! # Example
//!
//! ```
//! use match3_core::Session;
//! use match3_types::{Coord, GameConfig, SelectOutcome};
//!
//! let mut game = Session::new(GameConfig::default(), 12345).unwrap();
//!
//! // Tap two cells; an adjacent pair attempts the swap
//! let first = game.select(Coord::new(0, 0));
//! assert_eq!(first, SelectOutcome::Selected);
//! let second = game.select(Coord::new(0, 1));
//!
//! if second == SelectOutcome::SwapMatched {
//!     // Drain the cascade one step at a time (or all at once)
//!     while let Some(step) = game.step_cascade().unwrap() {
//!         println!("chain {} scored {}", step.chain, step.score_delta);
//!     }
//! }
//! ```

pub mod board;
pub mod cascade;
pub mod detect;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use cascade::{resolve, CascadeOutcome, CascadeState, CascadeStep, CascadeSteps};
pub use detect::{find_matches, MatchGroup, MatchSet};
pub use rng::SimpleRng;
pub use scoring::step_score;
pub use session::Session;
pub use snapshot::SessionSnapshot;
