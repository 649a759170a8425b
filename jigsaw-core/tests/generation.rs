use std::collections::HashSet;

use jigsaw_core::grid::Tile;
use jigsaw_core::{
    Arc, PieceOrigin, Puzzle, PuzzleConfig, PuzzleError, Rendered, generate, trace_piece,
};
use proptest::prelude::*;

fn config(ncols: u32, nrows: u32, seed: i64, min: u32, max: u32) -> PuzzleConfig {
    PuzzleConfig {
        ncols,
        nrows,
        seed,
        min_piece_len: min,
        max_piece_len: max,
        ..Default::default()
    }
}

fn assert_closed(arcs: &[Arc]) {
    assert!(!arcs.is_empty());
    for pair in arcs.windows(2) {
        assert_eq!(pair[0].anchors().1, pair[1].anchors().0);
    }
    assert_eq!(arcs[arcs.len() - 1].anchors().1, arcs[0].anchors().0);
}

fn check_partition(puzzle: &Puzzle, min: u32) {
    let mut tiles = HashSet::new();
    let mut cells = HashSet::new();
    for piece in puzzle.pieces() {
        for t in piece.tiles() {
            assert!(tiles.insert(t), "tile {t:?} owned twice");
        }
        for c in piece.cells() {
            assert!(cells.insert(c), "cell {c:?} shared between pieces");
        }
        if piece.origin() == PieceOrigin::Grown {
            assert!(piece.tile_count() >= min as usize);
        }
        assert_closed(&trace_piece(piece));
    }
    assert_eq!(tiles.len(), (puzzle.ncols() * puzzle.nrows()) as usize);
}

#[test]
fn example_scenario_is_pinned() {
    let cfg = config(4, 4, 123, 1, 3);
    let puzzle = generate(&cfg).unwrap();
    assert_eq!(puzzle.piece_count(), 11);
    let sizes: Vec<usize> = puzzle.pieces().iter().map(|p| p.tile_count()).collect();
    assert_eq!(sizes, vec![1, 2, 3, 2, 1, 2, 1, 1, 1, 1, 1]);

    let out = Rendered::new(&puzzle, &cfg);
    assert_eq!(
        out.paths[0],
        "M 20 70 A 10 10 0 0 1 30 80 A 10 10 0 0 1 40 70 A 10 10 0 0 1 30 60 \
         A 10 10 0 0 0 20 50 A 10 10 0 0 0 10 60 A 10 10 0 0 0 20 70 Z"
    );
    assert_eq!(
        out.paths[4],
        "M 60 90 A 10 10 0 0 0 70 80 A 10 10 0 0 0 60 70 A 10 10 0 0 0 50 80 \
         A 10 10 0 0 0 60 90 Z"
    );
    assert_eq!(jigsaw_core::export::merged_arcs(&puzzle).len(), 50);
    check_partition(&puzzle, 1);
}

#[test]
fn invalid_inputs_fail_before_generation() {
    assert!(matches!(
        generate(&config(1, 5, 0, 1, 3)),
        Err(PuzzleError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        generate(&config(5, 5, 0, 4, 3)),
        Err(PuzzleError::InvalidPieceBounds { .. })
    ));
}

#[test]
fn narrow_strips_trace_closed() {
    for (ncols, nrows) in [(2, 9), (9, 2), (2, 2)] {
        for seed in 0..5 {
            let puzzle = generate(&config(ncols, nrows, seed, 1, 4)).unwrap();
            check_partition(&puzzle, 1);
        }
    }
}

#[test]
fn corner_singletons_are_full_circles() {
    // Every piece is a single tile; the forced pass may hand a corner a tab.
    let puzzle = generate(&config(3, 3, 11, 1, 1)).unwrap();
    assert_eq!(puzzle.piece_count(), 9);
    for corner in [Tile::new(0, 0), Tile::new(2, 0), Tile::new(0, 2), Tile::new(2, 2)] {
        let piece = puzzle
            .pieces()
            .iter()
            .find(|p| p.seed() == corner || p.tiles().contains(&corner))
            .unwrap();
        let arcs = trace_piece(piece);
        assert_closed(&arcs);
        if piece.connections().is_empty() {
            assert_eq!(arcs.len(), 4);
        }
    }
}

#[test]
fn large_pieces_do_not_need_a_deep_stack() {
    let puzzle = generate(&config(40, 40, 2024, 30, 60)).unwrap();
    check_partition(&puzzle, 30);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn partition_invariants_hold(
        ncols in 2u32..12,
        nrows in 2u32..12,
        seed in any::<i64>(),
        min in 1u32..5,
        extra in 0u32..5,
    ) {
        let puzzle = generate(&config(ncols, nrows, seed, min, min + extra)).unwrap();
        check_partition(&puzzle, min);
    }

    #[test]
    fn generation_is_deterministic(
        ncols in 2u32..10,
        nrows in 2u32..10,
        seed in any::<i64>(),
    ) {
        let cfg = config(ncols, nrows, seed, 2, 5);
        let a = generate(&cfg).unwrap();
        let b = generate(&cfg).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        prop_assert_eq!(Rendered::new(&a, &cfg), Rendered::new(&b, &cfg));
    }
}
