//! Driver module - owns a session on behalf of a host
//!
//! The driver is the embeddable runtime: the host feeds taps in, and pulls
//! observations and queued events out. A matching swap is resolved to
//! completion inside `tap`, queueing one `ScoreChanged` per settled step,
//! so the host never observes a half-resolved grid.

use std::collections::VecDeque;

use anyhow::{Context, Result};

use match3_core::{Board, Session};
use match3_types::{Coord, GameConfig, SelectOutcome};

use crate::protocol::{EventMessage, Observation};

/// What one tap did, summarized for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapReport {
    pub outcome: SelectOutcome,
    /// Cascade steps settled by this tap (0 unless the swap matched)
    pub steps: u32,
    /// Score gained by this tap
    pub score_delta: u32,
}

/// Headless game runtime for embedding
#[derive(Debug, Clone)]
pub struct GameDriver {
    session: Session,
    events: VecDeque<EventMessage>,
}

impl GameDriver {
    pub fn new(config: GameConfig, seed: u32) -> Result<Self> {
        let session = Session::new(config, seed).context("failed to create game session")?;
        Ok(Self::wrap(session))
    }

    /// Driver over a caller-supplied grid (fixed puzzles, tests)
    pub fn with_board(config: GameConfig, board: Board, seed: u32) -> Result<Self> {
        let session =
            Session::with_board(config, board, seed).context("failed to create game session")?;
        Ok(Self::wrap(session))
    }

    fn wrap(mut session: Session) -> Self {
        let mut events = VecDeque::new();
        // A zero move budget raises GameOver at construction
        if let Some(event) = session.take_last_event() {
            events.push_back(event.into());
        }
        Self { session, events }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply one cell tap. A matching swap drains its whole cascade before
    /// returning, queueing events along the way.
    pub fn tap(&mut self, row: u8, col: u8) -> Result<TapReport> {
        let outcome = self.session.select(Coord::new(row, col));

        let mut steps = 0u32;
        let mut score_delta = 0u32;
        if outcome == SelectOutcome::SwapMatched {
            loop {
                let step = self
                    .session
                    .step_cascade()
                    .context("cascade resolution failed")?;
                // The session sets one event per settled step; drain it
                // before the next step overwrites the slot
                if let Some(event) = self.session.take_last_event() {
                    self.events.push_back(event.into());
                }
                match step {
                    Some(step) => {
                        steps += 1;
                        score_delta = score_delta.saturating_add(step.score_delta);
                    }
                    None => break,
                }
            }
        } else if let Some(event) = self.session.take_last_event() {
            // A failed swap can exhaust the budget and raise GameOver
            self.events.push_back(event.into());
        }

        Ok(TapReport {
            outcome,
            steps,
            score_delta,
        })
    }

    pub fn observe(&self) -> Observation {
        Observation::from_snapshot(&self.session.snapshot())
    }

    /// Pop the oldest queued event, FIFO
    pub fn poll_event(&mut self) -> Option<EventMessage> {
        self.events.pop_front()
    }

    /// Start a fresh game with the same config, dropping queued events
    pub fn restart(&mut self) -> Result<()> {
        self.session.restart().context("failed to restart session")?;
        self.events.clear();
        Ok(())
    }
}
