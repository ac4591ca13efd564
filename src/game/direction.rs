#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit vector for one step in this direction.  The y axis grows
    /// downwards.
    pub(crate) fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Position;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Position::new(2, 6))]
    #[case(Direction::Down, Position::new(2, 8))]
    #[case(Direction::Left, Position::new(1, 7))]
    #[case(Direction::Right, Position::new(3, 7))]
    fn test_step(#[case] d: Direction, #[case] expected: Position) {
        assert_eq!(Position::new(2, 7).step(d), expected);
    }

    #[rstest]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Right, Direction::Left)]
    fn test_opposite(#[case] d: Direction, #[case] expected: Direction) {
        assert_eq!(d.opposite(), expected);
        assert_eq!(d.opposite().opposite(), d);
    }
}
