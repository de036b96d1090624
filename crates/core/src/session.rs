//! Session module - the tap-driven input state machine
//!
//! Ties the core components together: board, detector, cascade resolver,
//! scoring, and RNG. The session is fed one cell-select at a time and moves
//! through Idle -> OneSelected -> Resolving -> Idle. While a cascade is in
//! flight all input is ignored; the caller drains it one step per call so a
//! front end can pace the animation, or all at once via `resolve_pending`.

use match3_types::{
    Coord, CoreError, GameConfig, MovePolicy, Phase, ReselectPolicy, SelectOutcome, SessionEvent,
};

use crate::board::Board;
use crate::cascade::{CascadeState, CascadeStep};
use crate::detect::find_matches;
use crate::rng::SimpleRng;

/// Complete game session state
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: Board,
    rng: SimpleRng,
    /// Seed the session was built from (exported for replay)
    seed: u32,
    score: u32,
    moves_remaining: u32,
    selected: Option<Coord>,
    cascade: Option<CascadeState>,
    game_over: bool,
    /// Last score/game-over event (consumed by observers).
    last_event: Option<SessionEvent>,
}

impl Session {
    /// Create a new session with a freshly generated match-free board
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, CoreError> {
        let mut rng = SimpleRng::new(seed);
        let board = Board::generate(&config, &mut rng)?;
        Ok(Self::assemble(config, board, rng, seed))
    }

    /// Create a session over a caller-supplied grid (fixed puzzles, tests).
    /// The grid must agree with the config on size and kind count.
    pub fn with_board(config: GameConfig, board: Board, seed: u32) -> Result<Self, CoreError> {
        config.validate()?;
        if board.size() != config.size {
            return Err(CoreError::InvalidConfig("board size does not match config"));
        }
        if board.kind_count() != config.kind_count {
            return Err(CoreError::InvalidConfig(
                "board kind count does not match config",
            ));
        }
        let rng = SimpleRng::new(seed);
        Ok(Self::assemble(config, board, rng, seed))
    }

    fn assemble(config: GameConfig, board: Board, rng: SimpleRng, seed: u32) -> Self {
        let mut session = Self {
            config,
            board,
            rng,
            seed,
            score: 0,
            moves_remaining: config.starting_moves,
            selected: None,
            cascade: None,
            game_over: false,
            last_event: None,
        };
        // A zero move budget is over before the first tap
        session.check_exhausted();
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> Phase {
        if self.cascade.is_some() {
            Phase::Resolving
        } else if self.selected.is_some() {
            Phase::OneSelected
        } else {
            Phase::Idle
        }
    }

    /// Feed one cell-select into the state machine.
    ///
    /// Out-of-bounds taps are rejected with no state change; taps during
    /// resolution or after game over are silently ignored. An adjacent
    /// second tap swaps and either arms the cascade (`SwapMatched`, drain
    /// with `step_cascade`) or restores the grid and charges a move
    /// (`SwapReverted`).
    pub fn select(&mut self, coord: Coord) -> SelectOutcome {
        if self.game_over || self.cascade.is_some() {
            return SelectOutcome::Ignored;
        }
        if !self.board.in_bounds(coord) {
            return SelectOutcome::Rejected;
        }

        let Some(anchor) = self.selected else {
            self.selected = Some(coord);
            return SelectOutcome::Selected;
        };

        if anchor == coord {
            self.selected = None;
            return SelectOutcome::Deselected;
        }

        if !anchor.is_adjacent(coord) {
            return match self.config.reselect_policy {
                ReselectPolicy::Reanchor => {
                    self.selected = Some(coord);
                    SelectOutcome::Reanchored
                }
                ReselectPolicy::Deselect => {
                    self.selected = None;
                    SelectOutcome::Deselected
                }
            };
        }

        // Adjacent pair: attempt the swap
        self.selected = None;
        self.board.swap(anchor, coord);

        if find_matches(&self.board).is_empty() {
            self.board.swap(anchor, coord);
            self.charge_move();
            return SelectOutcome::SwapReverted;
        }

        if self.config.move_policy == MovePolicy::EverySwap {
            // Exhaustion is checked after the cascade drains
            self.moves_remaining = self.moves_remaining.saturating_sub(1);
        }
        self.cascade = Some(CascadeState::new());
        SelectOutcome::SwapMatched
    }

    /// Advance the pending cascade by one step, applying its score and
    /// emitting a `ScoreChanged` event. Returns Ok(None) when there is no
    /// pending cascade left (back in `Idle`, or never resolving).
    pub fn step_cascade(&mut self) -> Result<Option<CascadeStep>, CoreError> {
        let Some(state) = self.cascade.as_mut() else {
            return Ok(None);
        };

        match state.step(&mut self.board, &self.config, &mut self.rng) {
            Ok(Some(step)) => {
                self.score = self.score.saturating_add(step.score_delta);
                self.last_event = Some(SessionEvent::ScoreChanged {
                    delta: step.score_delta,
                    total: self.score,
                    chain: step.chain,
                });
                Ok(Some(step))
            }
            Ok(None) => {
                self.cascade = None;
                self.check_exhausted();
                Ok(None)
            }
            Err(err) => {
                self.cascade = None;
                Err(err)
            }
        }
    }

    /// Drain the pending cascade to completion, returning the steps.
    /// The single event slot only retains the last step's `ScoreChanged`
    /// (or the `GameOver` that exhaustion raises); callers needing every
    /// event poll `step_cascade` one step at a time instead.
    pub fn resolve_pending(&mut self) -> Result<Vec<CascadeStep>, CoreError> {
        let mut steps = Vec::new();
        while let Some(step) = self.step_cascade()? {
            steps.push(step);
        }
        Ok(steps)
    }

    /// Take and clear the last score/game-over event.
    pub fn take_last_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }

    /// Rebuild the session from a fresh seed drawn off the current RNG,
    /// keeping the config (the "play again" flow).
    pub fn restart(&mut self) -> Result<(), CoreError> {
        let seed = self.rng.seed().wrapping_add(1);
        *self = Self::new(self.config, seed)?;
        Ok(())
    }

    fn charge_move(&mut self) {
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.check_exhausted();
    }

    /// Raise game over once the budget is spent and nothing is resolving
    fn check_exhausted(&mut self) {
        if !self.game_over && self.moves_remaining == 0 && self.cascade.is_none() {
            self.game_over = true;
            self.last_event = Some(SessionEvent::GameOver {
                final_score: self.score,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Match-free grid where swapping (0,2) and (0,3) lines up three 1s
    /// on row 0 and nothing else
    fn one_swap_away() -> Board {
        Board::from_rows(
            4,
            &[
                vec![1, 1, 2, 1, 3, 4],
                vec![2, 3, 4, 2, 4, 1],
                vec![3, 4, 1, 3, 1, 2],
                vec![4, 1, 2, 4, 2, 3],
                vec![1, 2, 3, 1, 3, 4],
                vec![2, 3, 4, 2, 4, 1],
            ],
        )
        .unwrap()
    }

    fn session_with(board: Board, config: GameConfig) -> Session {
        Session::with_board(config, board, 77).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(GameConfig::default(), 12345).unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves_remaining(), 20);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.game_over());
        assert!(session.selected().is_none());
        assert!(find_matches(session.board()).is_empty());
    }

    #[test]
    fn test_with_board_validates_shape() {
        let board = Board::empty(5, 4);
        assert!(Session::with_board(GameConfig::default(), board, 1).is_err());

        let board = Board::empty(6, 5);
        assert!(Session::with_board(GameConfig::default(), board, 1).is_err());
    }

    #[test]
    fn test_first_select_and_deselect() {
        let mut session = session_with(one_swap_away(), GameConfig::default());

        assert_eq!(session.select(Coord::new(2, 2)), SelectOutcome::Selected);
        assert_eq!(session.phase(), Phase::OneSelected);
        assert_eq!(session.selected(), Some(Coord::new(2, 2)));

        assert_eq!(session.select(Coord::new(2, 2)), SelectOutcome::Deselected);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_out_of_bounds_rejected_without_state_change() {
        let mut session = session_with(one_swap_away(), GameConfig::default());

        assert_eq!(session.select(Coord::new(6, 0)), SelectOutcome::Rejected);
        assert_eq!(session.phase(), Phase::Idle);

        session.select(Coord::new(1, 1));
        assert_eq!(session.select(Coord::new(0, 9)), SelectOutcome::Rejected);
        assert_eq!(session.selected(), Some(Coord::new(1, 1)));
    }

    #[test]
    fn test_non_adjacent_reanchors_by_default() {
        let mut session = session_with(one_swap_away(), GameConfig::default());

        session.select(Coord::new(0, 0));
        assert_eq!(session.select(Coord::new(4, 4)), SelectOutcome::Reanchored);
        assert_eq!(session.selected(), Some(Coord::new(4, 4)));
    }

    #[test]
    fn test_non_adjacent_deselect_policy() {
        let config = GameConfig {
            reselect_policy: ReselectPolicy::Deselect,
            ..GameConfig::default()
        };
        let mut session = session_with(one_swap_away(), config);

        session.select(Coord::new(0, 0));
        assert_eq!(session.select(Coord::new(4, 4)), SelectOutcome::Deselected);
        assert!(session.selected().is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_failed_swap_reverts_and_charges_move() {
        let mut session = session_with(one_swap_away(), GameConfig::default());
        let before = session.board().clone();

        session.select(Coord::new(2, 0));
        assert_eq!(
            session.select(Coord::new(2, 1)),
            SelectOutcome::SwapReverted
        );
        assert_eq!(session.board(), &before);
        assert_eq!(session.moves_remaining(), 19);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_matching_swap_enters_resolving() {
        let mut session = session_with(one_swap_away(), GameConfig::default());

        session.select(Coord::new(0, 2));
        assert_eq!(session.select(Coord::new(0, 3)), SelectOutcome::SwapMatched);
        assert_eq!(session.phase(), Phase::Resolving);
        // Default policy: a successful swap is free
        assert_eq!(session.moves_remaining(), 20);

        // Input is locked while resolving
        assert_eq!(session.select(Coord::new(0, 0)), SelectOutcome::Ignored);
    }

    #[test]
    fn test_cascade_drain_scores_and_returns_to_idle() {
        let mut session = session_with(one_swap_away(), GameConfig::default());
        session.select(Coord::new(0, 2));
        session.select(Coord::new(0, 3));

        let steps = session.resolve_pending().unwrap();
        assert!(!steps.is_empty());
        assert_eq!(steps[0].chain, 1);
        assert!(steps[0].removed.contains(&Coord::new(0, 0)));
        assert!(steps[0].removed.contains(&Coord::new(0, 1)));
        assert!(steps[0].removed.contains(&Coord::new(0, 2)));

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.score() >= 30);
        assert!(find_matches(session.board()).is_empty());
        assert!(session.board().cells().iter().all(|cell| cell.is_some()));
    }

    #[test]
    fn test_score_event_emitted_per_step() {
        let mut session = session_with(one_swap_away(), GameConfig::default());
        session.select(Coord::new(0, 2));
        session.select(Coord::new(0, 3));

        let step = session.step_cascade().unwrap().unwrap();
        match session.take_last_event() {
            Some(SessionEvent::ScoreChanged {
                delta,
                total,
                chain,
            }) => {
                assert_eq!(delta, step.score_delta);
                assert_eq!(total, session.score());
                assert_eq!(chain, 1);
            }
            other => panic!("expected ScoreChanged, got {:?}", other),
        }
        // Slot is cleared after take
        assert!(session.take_last_event().is_none());
    }

    #[test]
    fn test_every_swap_policy_charges_matching_swap() {
        let config = GameConfig {
            move_policy: MovePolicy::EverySwap,
            ..GameConfig::default()
        };
        let mut session = session_with(one_swap_away(), config);

        session.select(Coord::new(0, 2));
        assert_eq!(session.select(Coord::new(0, 3)), SelectOutcome::SwapMatched);
        assert_eq!(session.moves_remaining(), 19);
    }

    #[test]
    fn test_moves_exhausted_raises_game_over_once() {
        let config = GameConfig {
            starting_moves: 1,
            ..GameConfig::default()
        };
        let mut session = session_with(one_swap_away(), config);

        // Burn the only move on a failed swap
        session.select(Coord::new(2, 0));
        session.select(Coord::new(2, 1));

        assert!(session.game_over());
        assert_eq!(session.moves_remaining(), 0);
        assert_eq!(
            session.take_last_event(),
            Some(SessionEvent::GameOver { final_score: 0 })
        );
        assert!(session.take_last_event().is_none());

        // Everything is ignored now
        assert_eq!(session.select(Coord::new(0, 0)), SelectOutcome::Ignored);
    }

    #[test]
    fn test_game_over_waits_for_cascade_drain() {
        let config = GameConfig {
            starting_moves: 1,
            move_policy: MovePolicy::EverySwap,
            ..GameConfig::default()
        };
        let mut session = session_with(one_swap_away(), config);

        session.select(Coord::new(0, 2));
        assert_eq!(session.select(Coord::new(0, 3)), SelectOutcome::SwapMatched);
        assert_eq!(session.moves_remaining(), 0);
        // Still resolving, not over yet
        assert!(!session.game_over());

        session.resolve_pending().unwrap();
        assert!(session.game_over());
        assert_eq!(
            session.take_last_event(),
            Some(SessionEvent::GameOver {
                final_score: session.score()
            })
        );
    }

    #[test]
    fn test_zero_move_budget_is_over_immediately() {
        let config = GameConfig {
            starting_moves: 0,
            ..GameConfig::default()
        };
        let mut session = Session::new(config, 5).unwrap();
        assert!(session.game_over());
        assert_eq!(
            session.take_last_event(),
            Some(SessionEvent::GameOver { final_score: 0 })
        );
    }

    #[test]
    fn test_restart_resets_state() {
        let mut session = session_with(one_swap_away(), GameConfig::default());
        session.select(Coord::new(0, 2));
        session.select(Coord::new(0, 3));
        session.resolve_pending().unwrap();
        assert!(session.score() > 0);

        session.restart().unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves_remaining(), 20);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.game_over());
        assert!(find_matches(session.board()).is_empty());
    }

    #[test]
    fn test_same_seed_replays_same_game() {
        let config = GameConfig::default();
        let a = Session::new(config, 424242).unwrap();
        let b = Session::new(config, 424242).unwrap();
        assert_eq!(a.board(), b.board());
    }
}
