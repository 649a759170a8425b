//! Generator error types.

use thiserror::Error;

/// Errors surfaced before generation starts. A run that passes validation
/// always terminates with every tile covered.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// Either grid dimension is below two tiles.
    #[error("grid must be at least 2x2 tiles, got {ncols}x{nrows}")]
    InvalidDimensions { ncols: u32, nrows: u32 },

    /// Piece length bounds are zero or inverted.
    #[error("invalid piece length bounds: min {min}, max {max}")]
    InvalidPieceBounds { min: u32, max: u32 },

    /// Radius or frame cannot produce a document.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Config JSON failed to parse.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
