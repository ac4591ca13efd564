use super::direction::Direction;
use super::food::Food;
use super::grid::{Grid, Position};
use crate::consts;
use std::collections::VecDeque;

/// The player's segment chain.
///
/// The body is ordered head-first and is never empty.  Requested direction
/// changes are buffered in `next_direction` (one slot, last write wins) and
/// only committed at the start of the next [`advance`][Snake::advance], so a
/// burst of key presses between two ticks cannot turn the snake more than
/// once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The positions of the snake's segments, head first, tail last
    pub(super) body: VecDeque<Position>,

    /// The direction committed by the most recent `advance`
    pub(super) direction: Direction,

    /// The direction to commit at the start of the next `advance`
    pub(super) next_direction: Direction,
}

impl Snake {
    pub(super) fn new(grid: Grid) -> Snake {
        let mut snake = Snake {
            body: VecDeque::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
        };
        snake.reset(grid);
        snake
    }

    /// Put the snake back in its starting state: three segments laid out
    /// leftwards from the center of `grid`, moving right.
    pub(super) fn reset(&mut self, grid: Grid) {
        let center = grid.center();
        self.body.clear();
        for i in 0..consts::INITIAL_SNAKE_LENGTH {
            let offset = i16::try_from(i).unwrap_or(i16::MAX);
            self.body.push_back(Position::new(center.x - offset, center.y));
        }
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
    }

    pub(super) fn head(&self) -> Position {
        self.body[0]
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }

    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Move the snake forwards one cell: commit the buffered direction, grow
    /// a new head out of the old one, and drop the tail.  The removed tail
    /// position is returned so that a caller which decides the snake should
    /// have grown this tick can put it back (see [`grow`][Snake::grow]).
    ///
    /// The new head is *not* bounds-checked here; it may land outside the
    /// grid, which the next [`collided`][Snake::collided] call reports.
    pub(super) fn advance(&mut self) -> Position {
        self.direction = self.next_direction;
        let head = self.head().step(self.direction);
        self.body.push_front(head);
        self.body
            .pop_back()
            .expect("snake body is never empty")
    }

    /// Re-extend the tail after an `advance` that landed on food, making the
    /// net effect of the tick "head advances, tail stays".
    pub(super) fn grow(&mut self) {
        if let Some(&tail) = self.body.back() {
            self.body.push_back(tail);
        }
    }

    /// Buffer a direction change for the next `advance`.  A request to
    /// reverse straight onto the second segment is silently dropped.  The
    /// guard compares against the *committed* direction, not the buffer, so
    /// two rapid presses within a single tick can still buffer a reversal
    /// relative to the first press.
    pub(super) fn change_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.next_direction = direction;
    }

    /// Whether the head has left the grid or run into another segment.  The
    /// two cases are equally fatal, so they are not distinguished.
    pub(super) fn collided(&self, grid: Grid) -> bool {
        let head = self.head();
        if !grid.contains(head) {
            return true;
        }
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    pub(super) fn eats(&self, food: &Food) -> bool {
        self.head() == food.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_snake() -> Snake {
        Snake::new(Grid::new(20, 20))
    }

    #[test]
    fn reset_centers_three_segments() {
        let snake = test_snake();
        assert_eq!(
            snake.body,
            [
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
            ]
        );
        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(snake.next_direction, Direction::Right);
    }

    #[test]
    fn advance_returns_removed_tail() {
        let mut snake = test_snake();
        let removed = snake.advance();
        assert_eq!(removed, Position::new(8, 10));
        assert_eq!(
            snake.body,
            [
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
            ]
        );
    }

    #[test]
    fn advance_preserves_length() {
        let mut snake = test_snake();
        for _ in 0..5 {
            snake.advance();
            assert_eq!(snake.body.len(), 3);
        }
    }

    #[test]
    fn grow_after_advance_keeps_tail() {
        let mut snake = test_snake();
        snake.advance();
        snake.grow();
        assert_eq!(
            snake.body,
            [
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(9, 10),
            ]
        );
        // The duplicated segment unstacks on the next advance.
        snake.advance();
        assert_eq!(
            snake.body,
            [
                Position::new(12, 10),
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
            ]
        );
    }

    #[test]
    fn reversal_is_dropped() {
        let mut snake = test_snake();
        snake.change_direction(Direction::Left);
        assert_eq!(snake.next_direction, Direction::Right);
        snake.change_direction(Direction::Up);
        assert_eq!(snake.next_direction, Direction::Up);
    }

    #[test]
    fn guard_compares_against_committed_direction() {
        // Two opposite presses inside one tick window are both accepted,
        // because only the committed direction is consulted.
        let mut snake = test_snake();
        snake.change_direction(Direction::Up);
        snake.change_direction(Direction::Down);
        assert_eq!(snake.next_direction, Direction::Down);
    }

    #[test]
    fn guard_uses_new_direction_after_advance() {
        let mut snake = test_snake();
        snake.change_direction(Direction::Up);
        snake.advance();
        assert_eq!(snake.direction, Direction::Up);
        snake.change_direction(Direction::Down);
        assert_eq!(snake.next_direction, Direction::Up);
    }

    #[test]
    fn wall_collisions() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::new(grid);
        for head in [
            Position::new(-1, 5),
            Position::new(10, 5),
            Position::new(5, -1),
            Position::new(5, 10),
        ] {
            snake.body[0] = head;
            assert!(snake.collided(grid), "head at {head:?} should collide");
        }
        snake.body[0] = Position::new(0, 0);
        assert!(!snake.collided(grid));
    }

    #[test]
    fn self_collision() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::new(grid);
        snake.body = VecDeque::from([
            Position::new(4, 4),
            Position::new(4, 5),
            Position::new(5, 5),
            Position::new(5, 4),
            Position::new(4, 4),
        ]);
        assert!(snake.collided(grid));
    }

    #[test]
    fn food_collision() {
        let snake = test_snake();
        let mut food = Food::new();
        food.position = Position::new(10, 10);
        assert!(snake.eats(&food));
        food.position = Position::new(9, 10);
        assert!(!snake.eats(&food));
    }
}
