//! Boundary tracing.
//!
//! A piece is a tree of diagonal connections over tile circles. Its outline
//! runs counter-clockwise: along each connection it bends around the two
//! off-diagonal tiles, and at each member tile it either follows the tile's
//! own circle or detours down the next connection and back.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::grid::{DiagonalConnection, Quadrant, Tile};
use crate::piece::Piece;
use crate::render::{Anchor, corner_anchors};

/// Off-diagonal tile walked on the way out from p1, by connection quadrant.
/// Its arc uses quadrant `q + 1`.
const FIRST_OFFSET: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Off-diagonal tile walked on the way back to p1, by connection quadrant.
/// Its arc uses quadrant `q + 3`.
const MIRROR_OFFSET: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// Which way an arc wraps its tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bend {
    /// Around a member tile, counter-clockwise. Sign 0.
    Convex,
    /// Around a tile outside the piece, clockwise. Sign 1.
    Concave,
}

impl Bend {
    pub fn sweep_flag(self) -> u8 {
        match self {
            Bend::Convex => 0,
            Bend::Concave => 1,
        }
    }
}

/// One quarter of a tile circle on a piece outline.
///
/// Two arcs are equal when they cover the same quarter of the same tile,
/// whichever way they run. Neighbouring pieces trace their shared border
/// as equal arcs with opposite bends.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Arc {
    pub tile: Tile,
    pub quadrant: Quadrant,
    pub bend: Bend,
}

impl Arc {
    pub fn convex(tile: Tile, quadrant: Quadrant) -> Self {
        Arc {
            tile,
            quadrant,
            bend: Bend::Convex,
        }
    }

    pub fn concave(tile: Tile, quadrant: Quadrant) -> Self {
        Arc {
            tile,
            quadrant,
            bend: Bend::Concave,
        }
    }

    /// Start and end anchors in drawing order.
    pub fn anchors(&self) -> (Anchor, Anchor) {
        let (lo, hi) = corner_anchors(self.tile, self.quadrant);
        match self.bend {
            Bend::Convex => (lo, hi),
            Bend::Concave => (hi, lo),
        }
    }
}

impl PartialEq for Arc {
    fn eq(&self, other: &Self) -> bool {
        self.tile == other.tile && self.quadrant == other.quadrant
    }
}

impl Eq for Arc {}

impl Hash for Arc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tile.hash(state);
        self.quadrant.hash(state);
    }
}

enum Step {
    Walk { index: usize, root: bool },
    Emit(Arc),
}

/// Ordered outline of `piece`. Consecutive arcs share anchors and the last
/// arc ends where the first begins.
pub fn trace_piece(piece: &Piece) -> Vec<Arc> {
    let connections = piece.connections();
    if connections.is_empty() {
        return Quadrant::ALL
            .into_iter()
            .map(|q| Arc::convex(piece.seed(), q))
            .collect();
    }

    let mut arcs = Vec::with_capacity(connections.len() * 6 + 4);
    // Explicit stack: outline length scales with piece size, call depth must not.
    let mut stack = vec![Step::Walk {
        index: 0,
        root: true,
    }];
    let mut steps = Vec::with_capacity(8);
    while let Some(step) = stack.pop() {
        let (index, root) = match step {
            Step::Emit(arc) => {
                arcs.push(arc);
                continue;
            }
            Step::Walk { index, root } => (index, root),
        };
        let conn = &connections[index];
        let q = conn.quadrant();
        let (fx, fy) = FIRST_OFFSET[q.index()];
        let (mx, my) = MIRROR_OFFSET[q.index()];

        steps.push(Step::Emit(Arc::concave(conn.p1.offset(fx, fy), q.turn(1))));
        if conn.p2_taken {
            around(connections, conn.p2, [q.turn(3), q, q.turn(1)], &mut steps);
        } else {
            steps.push(Step::Emit(Arc::concave(conn.p2, q.turn(2))));
        }
        steps.push(Step::Emit(Arc::concave(conn.p1.offset(mx, my), q.turn(3))));
        if root {
            around(
                connections,
                conn.p1,
                [q.turn(1), q.turn(2), q.turn(3)],
                &mut steps,
            );
        }
        stack.extend(steps.drain(..).rev());
    }
    arcs
}

/// For each quadrant of `tile`, walk the piece's connection leaving through
/// it, or follow the tile circle when there is none.
fn around(
    connections: &[DiagonalConnection],
    tile: Tile,
    quadrants: [Quadrant; 3],
    out: &mut Vec<Step>,
) {
    for q in quadrants {
        let neighbor = tile.diagonal(q);
        let taken = DiagonalConnection::new(tile, neighbor, true);
        let tab = DiagonalConnection::new(tile, neighbor, false);
        match connections.iter().position(|c| *c == taken || *c == tab) {
            Some(index) => out.push(Step::Walk { index, root: false }),
            None => out.push(Step::Emit(Arc::convex(tile, q))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_closed(arcs: &[Arc]) {
        assert!(!arcs.is_empty());
        for pair in arcs.windows(2) {
            assert_eq!(pair[0].anchors().1, pair[1].anchors().0, "gap in {arcs:?}");
        }
        let first = arcs[0].anchors().0;
        let last = arcs[arcs.len() - 1].anchors().1;
        assert_eq!(first, last);
    }

    #[test]
    fn single_tile_is_a_full_circle() {
        let piece = Piece::grown(Tile::new(0, 0), Vec::new());
        let arcs = trace_piece(&piece);
        assert_eq!(arcs.len(), 4);
        assert!(arcs.iter().all(|a| a.bend == Bend::Convex));
        assert_closed(&arcs);
    }

    #[test]
    fn two_tile_piece_in_every_direction() {
        for q in Quadrant::ALL {
            let seed = Tile::new(3, 3);
            let piece = Piece::grown(
                seed,
                vec![DiagonalConnection::new(seed, seed.diagonal(q), true)],
            );
            let arcs = trace_piece(&piece);
            // 2 concave arcs along the connection, 3 convex at each end.
            assert_eq!(arcs.len(), 8);
            assert_eq!(arcs.iter().filter(|a| a.bend == Bend::Concave).count(), 2);
            assert_closed(&arcs);
        }
    }

    #[test]
    fn tab_wraps_the_foreign_tile() {
        let seed = Tile::new(1, 1);
        let piece = Piece::grown(
            seed,
            vec![DiagonalConnection::new(seed, Tile::new(2, 2), false)],
        );
        let arcs = trace_piece(&piece);
        assert_eq!(arcs.len(), 6);
        assert_eq!(arcs[1], Arc::concave(Tile::new(2, 2), Quadrant::new(2)));
        assert_closed(&arcs);
    }

    #[test]
    fn branching_piece_visits_every_connection() {
        let seed = Tile::new(2, 2);
        let a = Tile::new(3, 3);
        let b = Tile::new(4, 2);
        let c = Tile::new(1, 1);
        let piece = Piece::grown(
            seed,
            vec![
                DiagonalConnection::new(seed, a, true),
                DiagonalConnection::new(a, b, true),
                DiagonalConnection::new(seed, c, true),
                DiagonalConnection::new(b, Tile::new(5, 3), false),
            ],
        );
        let arcs = trace_piece(&piece);
        let concave = arcs.iter().filter(|a| a.bend == Bend::Concave).count();
        // Two per connection plus one for the tab's foreign tile.
        assert_eq!(concave, 9);
        assert_closed(&arcs);
    }

    #[test]
    fn arc_equality_ignores_bend() {
        let t = Tile::new(1, 0);
        let q = Quadrant::new(3);
        assert_eq!(Arc::convex(t, q), Arc::concave(t, q));
        assert_ne!(Arc::convex(t, q), Arc::convex(t, q.turn(1)));
    }
}
