//! Piece growth, hole filling and coverage patching.
//!
//! A run grows pieces from random unvisited tiles until every tile has been
//! visited once. Pieces that end below the minimum length are dropped and
//! their cells released. The grid is then rebuilt from the committed pieces
//! and the dropped tiles are handed to neighbouring pieces by the hole-filling
//! passes. Anything still unreachable is gathered into patch pieces.

use std::collections::HashSet;

use log::debug;

use crate::config::PuzzleConfig;
use crate::error::PuzzleError;
use crate::grid::{DiagonalConnection, Grid, Quadrant, Tile};
use crate::piece::{Piece, PieceOrigin};
use crate::rng::Lcg;
use crate::Puzzle;

/// Owns every bit of mutable state of one generation run.
#[derive(Clone, Debug)]
pub struct Generator {
    config: PuzzleConfig,
    rng: Lcg,
    grid: Grid,
    pieces: Vec<Piece>,
}

impl Generator {
    pub fn new(config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        config.validate()?;
        Ok(Generator {
            config: config.clone(),
            rng: Lcg::new(config.seed),
            grid: Grid::new(config.ncols, config.nrows),
            pieces: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Runs growth, hole filling and patching to completion.
    pub fn generate(mut self) -> Puzzle {
        while self.grid.unvisited_count() > 0 {
            self.grow_piece();
        }
        let grown = self.pieces.len();

        self.grid.reset(&self.pieces);
        let holes = self.grid.unvisited_count();
        let mut passes = 0;
        while passes < self.config.fill_passes && self.fill_holes(false) {
            passes += 1;
        }
        self.fill_holes(true);
        debug!(
            "filled {} dropped tiles in {} passes, {} left for patching",
            holes - self.grid.unvisited_count(),
            passes,
            self.grid.unvisited_count()
        );

        self.patch_remaining();
        log::info!(
            "generated {} pieces ({} grown, {} patch) on a {}x{} grid",
            self.pieces.len(),
            grown,
            self.pieces.len() - grown,
            self.config.ncols,
            self.config.nrows
        );
        Puzzle::new(self.config.ncols, self.config.nrows, self.pieces)
    }

    /// Grows one piece from a random unvisited tile. Returns whether the
    /// piece was long enough to keep.
    ///
    /// # Panics
    ///
    /// Panics when called on a fully visited grid.
    pub fn grow_piece(&mut self) -> bool {
        let (minlen, maxlen) = (self.config.min_piece_len, self.config.max_piece_len);
        let target = self.rng.uniform(minlen as f64, maxlen as f64).round() as usize;
        let piece = self.grow(target, PieceOrigin::Grown);
        if piece.tile_count() >= minlen as usize {
            self.pieces.push(piece);
            true
        } else {
            debug!(
                "dropping piece at {:?}: {} of {} tiles",
                piece.seed(),
                piece.tile_count(),
                minlen
            );
            for cell in piece.cells() {
                self.grid.liberate_cell(cell);
            }
            false
        }
    }

    fn grow(&mut self, target: usize, origin: PieceOrigin) -> Piece {
        let Some(seed) = self.grid.random_empty_tile(&mut self.rng) else {
            unreachable!("piece growth started on a fully visited grid");
        };
        self.grid.visit_tile(seed);
        self.grid.set_open(seed, true);

        let mut piece = match origin {
            PieceOrigin::Grown => Piece::grown(seed, Vec::new()),
            PieceOrigin::Patch => Piece::patch(seed, Vec::new()),
        };
        let mut members = vec![seed];
        let mut member_set = HashSet::from([seed]);

        while members.len() < target && self.grid.unvisited_count() > 0 {
            let mut candidates = Vec::new();
            for &tile in &members {
                if !self.grid.is_open(tile) {
                    continue;
                }
                let before = candidates.len();
                self.push_candidates(tile, &member_set, false, &mut candidates);
                if candidates.len() == before {
                    self.grid.set_open(tile, false);
                }
            }
            if candidates.is_empty() {
                break;
            }
            let conn = candidates[self.rng.index(candidates.len())];
            self.grid.visit_tile(conn.p2);
            self.grid.occupy_cell(conn.cell());
            self.grid.set_open(conn.p2, true);
            members.push(conn.p2);
            member_set.insert(conn.p2);
            piece.push(conn);
        }

        for tile in members {
            self.grid.set_open(tile, false);
        }
        piece
    }

    /// Appends every admissible connection out of `tile`, in quadrant order.
    fn push_candidates(
        &self,
        tile: Tile,
        members: &HashSet<Tile>,
        allow_partial: bool,
        out: &mut Vec<DiagonalConnection>,
    ) {
        for q in Quadrant::ALL {
            let neighbor = tile.diagonal(q);
            if !self.grid.is_tile_valid(neighbor) || members.contains(&neighbor) {
                continue;
            }
            let visited = self.grid.is_tile_visited(neighbor);
            if visited && !allow_partial {
                continue;
            }
            let conn = DiagonalConnection::new(tile, neighbor, !visited);
            if self.grid.is_cell_empty(conn.cell()) {
                out.push(conn);
            }
        }
    }

    /// Gives every piece at most one extra connection, chosen from its whole
    /// member set. With `allow_partial` a piece may also reach into a tile
    /// another piece owns, which claims the cell but not the tile. Returns
    /// whether any piece grew.
    pub fn fill_holes(&mut self, allow_partial: bool) -> bool {
        let mut grew = false;
        for i in 0..self.pieces.len() {
            let members = self.pieces[i].tiles();
            let member_set: HashSet<Tile> = members.iter().copied().collect();
            let mut candidates = Vec::new();
            for &tile in &members {
                self.push_candidates(tile, &member_set, allow_partial, &mut candidates);
            }
            if candidates.is_empty() {
                continue;
            }
            let conn = candidates[self.rng.index(candidates.len())];
            self.grid.visit_tile(conn.p2);
            self.grid.occupy_cell(conn.cell());
            self.pieces[i].push(conn);
            grew = true;
        }
        grew
    }

    /// Collects tiles the fill passes could not reach into patch pieces,
    /// committed regardless of length.
    pub fn patch_remaining(&mut self) {
        while self.grid.unvisited_count() > 0 {
            let maxlen = self.config.max_piece_len as usize;
            let piece = self.grow(maxlen, PieceOrigin::Patch);
            debug!(
                "patch piece at {:?} with {} tiles",
                piece.seed(),
                piece.tile_count()
            );
            self.pieces.push(piece);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn invalid_config_is_rejected() {
        assert!(Generator::new(&config(1, 4, 0, 1, 3)).is_err());
        assert!(Generator::new(&config(4, 4, 0, 4, 3)).is_err());
    }

    #[test]
    fn growth_respects_target_and_cells() {
        let mut generator = Generator::new(&config(6, 6, 9, 1, 1)).unwrap();
        assert!(generator.grow_piece());
        let piece = &generator.pieces()[0];
        assert_eq!(piece.tile_count(), 1);
        assert!(piece.connections().is_empty());
        assert_eq!(generator.grid().unvisited_count(), 35);
    }

    #[test]
    fn dropped_piece_releases_cells_but_keeps_tiles_visited() {
        // A 2x2 grid has one cell, so at most two tiles join one piece.
        let mut generator = Generator::new(&config(2, 2, 5, 3, 3)).unwrap();
        assert!(!generator.grow_piece());
        assert!(generator.pieces().is_empty());
        assert_eq!(generator.grid().unvisited_count(), 2);
        assert!(generator.grid.is_cell_empty(crate::grid::Cell { x: 0, y: 0 }));
    }

    #[test]
    fn fill_holes_claims_unvisited_neighbours() {
        let mut generator = Generator::new(&config(3, 3, 1, 1, 1)).unwrap();
        let seed = Tile::new(1, 1);
        generator.grid.visit_tile(seed);
        generator.pieces.push(Piece::grown(seed, Vec::new()));
        assert!(generator.fill_holes(false));
        let piece = &generator.pieces()[0];
        assert_eq!(piece.tile_count(), 2);
        assert!(piece.connections()[0].p2_taken);
        assert_eq!(generator.grid().unvisited_count(), 7);
    }

    #[test]
    fn forced_fill_creates_tabs_into_other_pieces() {
        let mut generator = Generator::new(&config(2, 2, 3, 1, 1)).unwrap();
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let t = Tile::new(x, y);
            generator.grid.visit_tile(t);
            generator.pieces.push(Piece::grown(t, Vec::new()));
        }
        assert!(!generator.fill_holes(false));
        assert!(generator.fill_holes(true));
        // The only cell goes to the first piece; later pieces find it taken.
        let tabs: Vec<_> = generator
            .pieces()
            .iter()
            .flat_map(|p| p.connections())
            .collect();
        assert_eq!(tabs.len(), 1);
        assert!(!tabs[0].p2_taken);
        assert_eq!(generator.pieces()[0].tile_count(), 1);
    }

    #[test]
    fn generate_covers_every_tile() {
        let puzzle = Generator::new(&config(8, 5, 77, 2, 5)).unwrap().generate();
        let mut seen = HashSet::new();
        for piece in puzzle.pieces() {
            for t in piece.tiles() {
                assert!(seen.insert(t), "tile {t:?} in two pieces");
            }
        }
        assert_eq!(seen.len(), 40);
    }
}
