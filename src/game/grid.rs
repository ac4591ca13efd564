use super::direction::Direction;
use rand::Rng;
use ratatui::layout::Size;

/// A cell coordinate, relative to the top-left corner of the level.
///
/// Coordinates are signed: a position one step past an edge is how a wall
/// collision manifests, so values just outside the grid must be
/// representable.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Position {
    pub(crate) x: i16,
    pub(crate) y: i16,
}

impl Position {
    pub(crate) const fn new(x: i16, y: i16) -> Position {
        Position { x, y }
    }

    /// The position one cell over in the given direction
    pub(crate) fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The dimensions of the level.
///
/// Construction saturates at `i16::MAX` per axis; the configuration layer
/// clamps far below that anyway.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: i16,
    height: i16,
}

impl Grid {
    pub(crate) fn new(width: u16, height: u16) -> Grid {
        Grid {
            width: i16::try_from(width).unwrap_or(i16::MAX),
            height: i16::try_from(height).unwrap_or(i16::MAX),
        }
    }

    // The fields came from u16s, so the casts cannot lose anything.
    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width as u16,
            height: self.height as u16,
        }
    }

    /// Whether `pos` lies within the level
    pub(crate) fn contains(self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// The cell at the middle of the level (rounding towards the top-left)
    pub(crate) fn center(self) -> Position {
        Position {
            x: self.width / 2,
            y: self.height / 2,
        }
    }

    /// A uniformly random cell of the level
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Position {
        Position {
            x: rng.random_range(0..self.width),
            y: rng.random_range(0..self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    #[rstest]
    #[case(Position::new(0, 0), true)]
    #[case(Position::new(9, 14), true)]
    #[case(Position::new(5, 7), true)]
    #[case(Position::new(-1, 7), false)]
    #[case(Position::new(10, 7), false)]
    #[case(Position::new(5, -1), false)]
    #[case(Position::new(5, 15), false)]
    fn test_contains(#[case] pos: Position, #[case] expected: bool) {
        let grid = Grid::new(10, 15);
        assert_eq!(grid.contains(pos), expected);
    }

    #[rstest]
    #[case(Grid::new(20, 20), Position::new(10, 10))]
    #[case(Grid::new(11, 15), Position::new(5, 7))]
    #[case(Grid::new(10, 10), Position::new(5, 5))]
    fn test_center(#[case] grid: Grid, #[case] expected: Position) {
        assert_eq!(grid.center(), expected);
    }

    #[test]
    fn random_cells_in_bounds() {
        let grid = Grid::new(10, 12);
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        for _ in 0..100 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }
}
