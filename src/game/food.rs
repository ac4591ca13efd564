use super::grid::{Grid, Position};
use rand::Rng;
use std::collections::VecDeque;

/// The single piece of food on the level.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Food {
    /// Where the food is.  Only meaningful once `generate` has been called;
    /// a freshly constructed value sits at the origin, possibly under the
    /// snake.
    pub(super) position: Position,
}

impl Food {
    pub(super) fn new() -> Food {
        Food {
            position: Position::default(),
        }
    }

    /// Move the food to a random cell not occupied by the snake, by
    /// sampling until an unoccupied cell comes up.  The retry loop is
    /// unbounded; a snake covering the whole grid would spin forever, but
    /// the grids the configuration allows hold far more cells than any
    /// game's snake reaches.
    pub(super) fn generate<R: Rng>(
        &mut self,
        grid: Grid,
        snake_body: &VecDeque<Position>,
        rng: &mut R,
    ) {
        loop {
            let candidate = grid.random_cell(rng);
            if !Food::is_on_snake(candidate, snake_body) {
                self.position = candidate;
                return;
            }
        }
    }

    pub(super) fn is_on_snake(position: Position, snake_body: &VecDeque<Position>) -> bool {
        snake_body.iter().any(|&segment| segment == position)
    }
}
