//! Scoring module - per-cell base score with an escalating chain multiplier
//!
//! Every removed cell is worth `base_cell_score` points, multiplied by the
//! chain number of the cascade iteration that removed it (1 for the match
//! triggered by the swap itself, 2 for the first follow-up, and so on).
//! The escalating shape is mandatory behavior; the base value is tuning.

/// Points for one settled cascade step
pub fn step_score(cells_removed: usize, chain: u32, base_cell_score: u32) -> u32 {
    (cells_removed as u32)
        .saturating_mul(base_cell_score)
        .saturating_mul(chain)
}
