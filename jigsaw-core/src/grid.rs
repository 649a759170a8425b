//! Tile lattice, cell occupancy and diagonal connections.
//!
//! Tiles sit on an `ncols x nrows` lattice with `y` growing downward. The
//! square between four tiles is a cell, addressed by its min corner. A cell
//! hosts at most one diagonal connection; that rule keeps pieces from
//! overlapping.

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::rng::Lcg;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Tile { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Tile {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The diagonal neighbour in direction `q`.
    pub const fn diagonal(self, q: Quadrant) -> Self {
        let (dx, dy) = q.direction();
        self.offset(dx, dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

/// Diagonal direction from a tile. Index 0 points down-right and each step
/// turns a quarter counter-clockwise on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quadrant(u8);

/// Unit step toward the diagonal neighbour, by quadrant.
const DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Quadrant of a connection, indexed by `[slope < 0][p2 above p1]`.
const QUADRANT_TABLE: [[Quadrant; 2]; 2] = [
    [Quadrant(0), Quadrant(2)],
    [Quadrant(3), Quadrant(1)],
];

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant(0), Quadrant(1), Quadrant(2), Quadrant(3)];

    pub const fn new(index: u8) -> Self {
        Quadrant(index % 4)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rotates by `steps` quarter turns.
    pub const fn turn(self, steps: u8) -> Self {
        Quadrant((self.0 + steps % 4) % 4)
    }

    pub const fn direction(self) -> (i32, i32) {
        DIRECTIONS[self.0 as usize]
    }

    /// `slope` is `+1` or `-1`; `below` is true when p2 lies below p1.
    pub const fn from_slope(slope: i32, below: bool) -> Self {
        QUADRANT_TABLE[(slope < 0) as usize][(!below) as usize]
    }
}

/// Directed edge between two diagonally adjacent tiles.
///
/// Equality is structural: owning cell, slope and `p2_taken` must all
/// match. Direction is deliberately ignored, so `a -> b` equals `b -> a`
/// with the same flag.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DiagonalConnection {
    pub p1: Tile,
    pub p2: Tile,
    /// Set when the connection claimed `p2` for its piece. Cleared for tabs
    /// that reach into a tile owned by another piece.
    pub p2_taken: bool,
}

impl DiagonalConnection {
    pub fn new(p1: Tile, p2: Tile, p2_taken: bool) -> Self {
        debug_assert!(
            (p2.x - p1.x).abs() == 1 && (p2.y - p1.y).abs() == 1,
            "tiles {p1:?} and {p2:?} are not diagonal neighbours"
        );
        DiagonalConnection { p1, p2, p2_taken }
    }

    pub fn slope(&self) -> i32 {
        (self.p2.x - self.p1.x) * (self.p2.y - self.p1.y)
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::from_slope(self.slope(), self.p2.y > self.p1.y)
    }

    pub fn cell(&self) -> Cell {
        Cell {
            x: self.p1.x.min(self.p2.x),
            y: self.p1.y.min(self.p2.y),
        }
    }
}

impl PartialEq for DiagonalConnection {
    fn eq(&self, other: &Self) -> bool {
        self.cell() == other.cell()
            && self.slope() == other.slope()
            && self.p2_taken == other.p2_taken
    }
}

impl Eq for DiagonalConnection {}

#[derive(Clone, Copy, Debug, Default)]
struct TileState {
    visited: bool,
    open: bool,
}

/// Visited/occupied bookkeeping for one generation run.
#[derive(Clone, Debug)]
pub struct Grid {
    ncols: u32,
    nrows: u32,
    tiles: Vec<TileState>,
    cells: Vec<bool>,
    unvisited: usize,
}

impl Grid {
    pub fn new(ncols: u32, nrows: u32) -> Self {
        let tile_count = ncols as usize * nrows as usize;
        let cell_count = ncols.saturating_sub(1) as usize * nrows.saturating_sub(1) as usize;
        Grid {
            ncols,
            nrows,
            tiles: vec![TileState::default(); tile_count],
            cells: vec![false; cell_count],
            unvisited: tile_count,
        }
    }

    pub fn ncols(&self) -> u32 {
        self.ncols
    }

    pub fn nrows(&self) -> u32 {
        self.nrows
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_tile_valid(&self, t: Tile) -> bool {
        t.x >= 0 && t.y >= 0 && (t.x as u32) < self.ncols && (t.y as u32) < self.nrows
    }

    fn tile_index(&self, t: Tile) -> Option<usize> {
        self.is_tile_valid(t)
            .then(|| t.y as usize * self.ncols as usize + t.x as usize)
    }

    fn cell_index(&self, c: Cell) -> Option<usize> {
        let cols = self.ncols.saturating_sub(1);
        let rows = self.nrows.saturating_sub(1);
        let valid = c.x >= 0 && c.y >= 0 && (c.x as u32) < cols && (c.y as u32) < rows;
        valid.then(|| c.y as usize * cols as usize + c.x as usize)
    }

    /// Tiles outside the grid count as visited so nothing grows into them.
    pub fn is_tile_visited(&self, t: Tile) -> bool {
        self.tile_index(t).is_none_or(|i| self.tiles[i].visited)
    }

    /// Cells outside the grid are never empty.
    pub fn is_cell_empty(&self, c: Cell) -> bool {
        self.cell_index(c).is_some_and(|i| !self.cells[i])
    }

    pub fn visit_tile(&mut self, t: Tile) {
        if let Some(i) = self.tile_index(t)
            && !self.tiles[i].visited
        {
            self.tiles[i].visited = true;
            self.unvisited -= 1;
        }
    }

    pub fn occupy_cell(&mut self, c: Cell) {
        if let Some(i) = self.cell_index(c) {
            self.cells[i] = true;
        }
    }

    pub fn liberate_cell(&mut self, c: Cell) {
        if let Some(i) = self.cell_index(c) {
            self.cells[i] = false;
        }
    }

    pub fn is_open(&self, t: Tile) -> bool {
        self.tile_index(t).is_some_and(|i| self.tiles[i].open)
    }

    pub fn set_open(&mut self, t: Tile, open: bool) {
        if let Some(i) = self.tile_index(t) {
            self.tiles[i].open = open;
        }
    }

    pub fn unvisited_count(&self) -> usize {
        self.unvisited
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let ncols = self.ncols as i32;
        (0..self.nrows as i32).flat_map(move |y| (0..ncols).map(move |x| Tile::new(x, y)))
    }

    /// Uniform pick over the unvisited tiles, enumerated row-major.
    /// Returns `None` once the grid is fully visited.
    pub fn random_empty_tile(&self, rng: &mut Lcg) -> Option<Tile> {
        if self.unvisited == 0 {
            return None;
        }
        let k = rng.index(self.unvisited);
        self.tiles().filter(|t| !self.is_tile_visited(*t)).nth(k)
    }

    /// Clears every flag, then replays `pieces` so that only committed
    /// pieces count as visited/occupied.
    pub fn reset(&mut self, pieces: &[Piece]) {
        self.tiles.fill(TileState::default());
        self.cells.fill(false);
        self.unvisited = self.tiles.len();
        for piece in pieces {
            self.visit_tile(piece.seed());
            for c in piece.connections() {
                self.occupy_cell(c.cell());
                if c.p2_taken {
                    self.visit_tile(c.p2);
                }
            }
        }
    }
}
