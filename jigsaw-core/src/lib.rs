//! Procedural jigsaw piece generator.
//!
//! A rectangular grid of tiles is split into pieces by growing random trees
//! of diagonal connections, each cell between four tiles hosting at most one
//! connection. Every piece outline is then traced as a chain of quarter-circle
//! arcs and exported as SVG path data in one of three corner styles.
//!
//! Generation is a pure function of [`PuzzleConfig`]: the same seed, grid and
//! piece bounds always give the same pieces and byte-identical documents.
//!
//! ```
//! use jigsaw_core::{PuzzleConfig, Rendered, generate};
//!
//! let config = PuzzleConfig { ncols: 4, nrows: 4, seed: 123, ..Default::default() };
//! let puzzle = generate(&config).unwrap();
//! let out = Rendered::new(&puzzle, &config);
//! assert_eq!(out.paths.len(), puzzle.piece_count());
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod piece;
pub mod render;
pub mod rng;
pub mod trace;

use serde::{Deserialize, Serialize};

pub use config::{PuzzleConfig, RECOMMENDED_MAX_DIMENSION};
pub use error::PuzzleError;
pub use export::Rendered;
pub use generator::Generator;
pub use piece::{Piece, PieceOrigin};
pub use render::{Layout, Shape};
pub use trace::{Arc, trace_piece};

/// Finished partition of a grid into pieces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    ncols: u32,
    nrows: u32,
    pieces: Vec<Piece>,
}

impl Puzzle {
    pub fn new(ncols: u32, nrows: u32, pieces: Vec<Piece>) -> Self {
        Puzzle {
            ncols,
            nrows,
            pieces,
        }
    }

    pub fn ncols(&self) -> u32 {
        self.ncols
    }

    pub fn nrows(&self) -> u32 {
        self.nrows
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Traced outline of every piece, in piece order.
    pub fn outlines(&self) -> Vec<Vec<Arc>> {
        self.pieces.iter().map(trace_piece).collect()
    }
}

/// Validates `config` and runs a full generation.
pub fn generate(config: &PuzzleConfig) -> Result<Puzzle, PuzzleError> {
    Ok(Generator::new(config)?.generate())
}
