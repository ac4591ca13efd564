use super::direction::Direction;
use super::food::Food;
use super::grid::{Grid, Position};
use super::snake::Snake;
use crate::consts;
use crate::options::Difficulty;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Instant;

/// The phase the game is in.
///
/// `GameOver` is a designed terminal state, not an error; the only way out
/// of it is a reset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum GameState {
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// The simulation proper: the snake, the food, the score, and the state
/// machine driving them.
///
/// The controller owns no I/O and no clock.  Callers feed it the current
/// time through [`tick`][GameController::tick] and ask for
/// [`next_deadline`][GameController::next_deadline] to schedule the next
/// call; once the state leaves `Playing`, `tick` refuses to do any work, so
/// a scheduling loop keyed off the state stops on its own.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct GameController<R = rand::rngs::ThreadRng> {
    pub(super) rng: R,
    pub(super) grid: Grid,
    pub(super) difficulty: Difficulty,
    pub(super) snake: Snake,
    pub(super) food: Food,
    pub(super) score: u32,
    pub(super) high_score: u32,
    pub(super) state: GameState,
    /// When the last simulation step ran; `None` makes the next `tick` step
    /// immediately
    pub(super) last_update: Option<Instant>,
    /// Set when `high_score` changed at a game-over transition and the new
    /// value has not been handed to the persistence layer yet
    fresh_high_score: bool,
}

impl<R: Rng> GameController<R> {
    pub(super) fn with_rng(
        grid: Grid,
        difficulty: Difficulty,
        high_score: u32,
        rng: R,
    ) -> GameController<R> {
        let mut controller = GameController {
            rng,
            grid,
            difficulty,
            snake: Snake::new(grid),
            food: Food::new(),
            score: 0,
            high_score,
            state: GameState::Ready,
            last_update: None,
            fresh_high_score: false,
        };
        controller.reset_game();
        controller
    }

    /// Begin play.  Coming from `Ready` or `GameOver` this starts a fresh
    /// game; the state always ends up `Playing`.
    pub(super) fn start_game(&mut self) {
        if matches!(self.state, GameState::Ready | GameState::GameOver) {
            self.reset_game();
        }
        self.state = GameState::Playing;
    }

    /// Suspend or resume play.  No simulation steps run while paused.  The
    /// step clock is left alone, so after a long pause the first step fires
    /// as soon as play resumes.
    pub(super) fn toggle_pause(&mut self) {
        match self.state {
            GameState::Playing => self.state = GameState::Paused,
            GameState::Paused => self.state = GameState::Playing,
            GameState::Ready | GameState::GameOver => (),
        }
    }

    /// Reset and immediately begin play again, from any state.
    pub(super) fn restart_game(&mut self) {
        self.reset_game();
        self.start_game();
    }

    /// Put the simulation back in its starting state: score cleared, snake
    /// re-centered, food re-rolled.  The grid, difficulty, and high score
    /// survive.
    pub(super) fn reset_game(&mut self) {
        self.score = 0;
        self.snake.reset(self.grid);
        self.food.generate(self.grid, self.snake.body(), &mut self.rng);
        self.state = GameState::Ready;
        self.last_update = None;
    }

    /// Run at most one simulation step, if play is active and the
    /// difficulty's interval has elapsed since the previous step.  Returns
    /// whether a step ran.
    pub(super) fn tick(&mut self, now: Instant) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let due = match self.last_update {
            None => true,
            Some(previous) => now.duration_since(previous) >= self.difficulty.tick_interval(),
        };
        if !due {
            return false;
        }
        self.last_update = Some(now);
        self.step();
        true
    }

    /// One simulation step: move, then check for death, then check for food.
    fn step(&mut self) {
        let _removed_tail = self.snake.advance();
        if self.snake.collided(self.grid) {
            self.game_over();
            return;
        }
        if self.snake.eats(&self.food) {
            self.snake.grow();
            self.food.generate(self.grid, self.snake.body(), &mut self.rng);
            self.score += consts::FOOD_SCORE;
        }
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.fresh_high_score = true;
        }
    }
}

impl<R> GameController<R> {
    /// Buffer a direction change.  Ignored unless play is active.
    pub(super) fn change_direction(&mut self, direction: Direction) {
        if self.state == GameState::Playing {
            self.snake.change_direction(direction);
        }
    }

    /// When the next simulation step is due.  Only meaningful while
    /// `Playing`; with no step taken yet, the answer is "now".
    pub(super) fn next_deadline(&self, now: Instant) -> Instant {
        match self.last_update {
            Some(previous) => previous + self.difficulty.tick_interval(),
            None => now,
        }
    }

    /// Take the high score recorded at the latest game-over transition, if
    /// it has not been taken yet.
    pub(super) fn take_fresh_high_score(&mut self) -> Option<u32> {
        if self.fresh_high_score {
            self.fresh_high_score = false;
            Some(self.high_score)
        } else {
            None
        }
    }

    pub(super) fn state(&self) -> GameState {
        self.state
    }

    pub(super) fn score(&self) -> u32 {
        self.score
    }

    pub(super) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(super) fn grid(&self) -> Grid {
        self.grid
    }

    pub(super) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(super) fn food_position(&self) -> Position {
        self.food.position
    }

    pub(super) fn body(&self) -> &VecDeque<Position> {
        self.snake.body()
    }
}
