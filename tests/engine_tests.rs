//! Engine tests - move scanning against known grids

use match3::core::{Board, Session, SimpleRng};
use match3::engine::{best_swap, find_matching_swaps, has_available_move};
use match3::types::{Coord, GameConfig, SelectOutcome};

fn checkerboard(size: u8) -> Board {
    let rows: Vec<Vec<u8>> = (0..size)
        .map(|row| (0..size).map(|col| 1 + (row + col) % 2).collect())
        .collect();
    Board::from_rows(4, &rows).unwrap()
}

#[test]
fn test_checkerboard_is_dead() {
    // Any swap of a two-kind checkerboard yields another near-checkerboard;
    // no straight run of three can form
    for size in [4u8, 6, 8] {
        let board = checkerboard(size);
        assert!(!has_available_move(&board), "size {}", size);
        assert!(find_matching_swaps(&board).is_empty());
        assert!(best_swap(&board).is_none());
    }
}

#[test]
fn test_every_candidate_actually_matches() {
    let mut rng = SimpleRng::new(321);
    let board = Board::generate(&GameConfig::default(), &mut rng).unwrap();

    for candidate in find_matching_swaps(&board) {
        assert!(candidate.a.is_adjacent(candidate.b));
        assert!(candidate.matched_count() >= 3);

        // Replaying the swap through a session must accept it
        let mut session =
            Session::with_board(GameConfig::default(), board.clone(), 1).unwrap();
        assert_eq!(session.select(candidate.a), SelectOutcome::Selected);
        assert_eq!(session.select(candidate.b), SelectOutcome::SwapMatched);
    }
}

#[test]
fn test_best_swap_prefers_bigger_clusters() {
    // Kinds 5..8 form an inert background. Swapping (2,2) down into (3,2)
    // completes a row of 3s and a column of 3s sharing that cell, a 5-cell
    // cluster; the 1s on row 0 only offer a plain 3-run.
    let board = Board::from_rows(
        8,
        &[
            vec![1, 1, 7, 1, 5, 6],
            vec![7, 8, 5, 6, 7, 8],
            vec![5, 6, 3, 8, 5, 6],
            vec![7, 3, 2, 3, 7, 8],
            vec![5, 6, 3, 8, 5, 6],
            vec![7, 8, 3, 6, 7, 8],
        ],
    )
    .unwrap();

    let candidates = find_matching_swaps(&board);
    let small = candidates
        .iter()
        .find(|c| c.a == Coord::new(0, 2) && c.b == Coord::new(0, 3))
        .expect("the row-0 swap matches");
    assert_eq!(small.matched_count(), 3);

    let best = best_swap(&board).expect("grid has matching swaps");
    assert_eq!((best.a, best.b), (Coord::new(2, 2), Coord::new(3, 2)));
    assert_eq!(best.matched_count(), 5);
}
