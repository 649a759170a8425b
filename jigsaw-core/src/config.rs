use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::render::{Layout, Shape};

/// The generator does no limiting of its own. Front ends warn past this.
pub const RECOMMENDED_MAX_DIMENSION: u32 = 50;

/// Bounded number of non-forced hole-filling passes.
pub const DEFAULT_FILL_PASSES: u32 = 10;

/// Everything a generation run depends on. Missing JSON fields take the
/// defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub ncols: u32,
    pub nrows: u32,
    pub seed: i64,
    /// Minimum tiles per grown piece.
    pub min_piece_len: u32,
    /// Maximum tiles a piece aims for during growth.
    pub max_piece_len: u32,
    /// Margin around the tile area, in output units.
    pub frame: f64,
    /// Tile radius; one tile spans `2 * radius` output units.
    pub radius: f64,
    pub shape: Shape,
    pub fill_passes: u32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            ncols: 10,
            nrows: 10,
            seed: 0,
            min_piece_len: 3,
            max_piece_len: 6,
            frame: 10.0,
            radius: 10.0,
            shape: Shape::Circle,
            fill_passes: DEFAULT_FILL_PASSES,
        }
    }
}

impl PuzzleConfig {
    pub fn from_json(text: &str) -> Result<Self, PuzzleError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn layout(&self) -> Layout {
        Layout {
            radius: self.radius,
            frame: self.frame,
        }
    }

    /// Checks dimensions first so an invalid grid is rejected before any
    /// random draw happens.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.ncols < 2 || self.nrows < 2 {
            return Err(PuzzleError::InvalidDimensions {
                ncols: self.ncols,
                nrows: self.nrows,
            });
        }
        if self.min_piece_len == 0
            || self.max_piece_len == 0
            || self.min_piece_len > self.max_piece_len
        {
            return Err(PuzzleError::InvalidPieceBounds {
                min: self.min_piece_len,
                max: self.max_piece_len,
            });
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(PuzzleError::InvalidLayout(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !self.frame.is_finite() || self.frame < 0.0 {
            return Err(PuzzleError::InvalidLayout(format!(
                "frame must be zero or positive, got {}",
                self.frame
            )));
        }
        Ok(())
    }
}
