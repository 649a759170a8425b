use serde::{Deserialize, Serialize};

use crate::grid::{Cell, DiagonalConnection, Tile};

/// How a piece came to exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceOrigin {
    /// Committed by regular growth; always meets the minimum length.
    Grown,
    /// Gathered from tiles that no grown piece could reach.
    Patch,
}

/// A seed tile plus the tree of diagonal connections grown from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    seed: Tile,
    connections: Vec<DiagonalConnection>,
    origin: PieceOrigin,
}

impl Piece {
    pub fn grown(seed: Tile, connections: Vec<DiagonalConnection>) -> Self {
        Piece {
            seed,
            connections,
            origin: PieceOrigin::Grown,
        }
    }

    pub fn patch(seed: Tile, connections: Vec<DiagonalConnection>) -> Self {
        Piece {
            seed,
            connections,
            origin: PieceOrigin::Patch,
        }
    }

    pub fn seed(&self) -> Tile {
        self.seed
    }

    pub fn connections(&self) -> &[DiagonalConnection] {
        &self.connections
    }

    pub fn origin(&self) -> PieceOrigin {
        self.origin
    }

    pub(crate) fn push(&mut self, connection: DiagonalConnection) {
        self.connections.push(connection);
    }

    /// Member tiles: the seed followed by every tile a connection claimed.
    pub fn tiles(&self) -> Vec<Tile> {
        std::iter::once(self.seed)
            .chain(self.connections.iter().filter(|c| c.p2_taken).map(|c| c.p2))
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        1 + self.connections.iter().filter(|c| c.p2_taken).count()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.connections.iter().map(|c| c.cell())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_do_not_count_as_members() {
        let seed = Tile::new(1, 1);
        let piece = Piece::grown(
            seed,
            vec![
                DiagonalConnection::new(seed, Tile::new(2, 2), true),
                DiagonalConnection::new(seed, Tile::new(0, 0), false),
            ],
        );
        assert_eq!(piece.tiles(), vec![seed, Tile::new(2, 2)]);
        assert_eq!(piece.tile_count(), 2);
        assert_eq!(piece.cells().count(), 2);
    }
}
