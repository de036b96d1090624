//! Render snapshot of a session, decoupled from the live state so a front
//! end can hold one across frames and refresh it in place.

use match3_types::{Coord, Phase};

use crate::session::Session;

/// Flat view of everything a renderer or host needs per frame.
/// The grid uses the wire encoding: 0 for empty, otherwise the tile kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub grid: Vec<Vec<u8>>,
    pub score: u32,
    pub moves_remaining: u32,
    pub phase: Phase,
    pub selected: Option<Coord>,
    pub game_over: bool,
    pub seed: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && self.phase != Phase::Resolving
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            grid: Vec::new(),
            score: 0,
            moves_remaining: 0,
            phase: Phase::Idle,
            selected: None,
            game_over: false,
            seed: 0,
        }
    }
}

impl Session {
    /// Refresh an existing snapshot in place
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.grid = self.board().to_rows();
        out.score = self.score();
        out.moves_remaining = self.moves_remaining();
        out.phase = self.phase();
        out.selected = self.selected();
        out.game_over = self.game_over();
        out.seed = self.seed();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
