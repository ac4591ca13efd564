mod controller;
mod direction;
mod food;
mod grid;
mod overlay;
mod snake;
pub(crate) use self::grid::Grid;

use self::controller::{GameController, GameState};
use self::direction::Direction;
use self::overlay::Overlay;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::highscore::SaveError;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// The gameplay screen: a [`GameController`] plus the event pump, rendering,
/// and high-score persistence around it.
#[derive(Debug)]
pub(crate) struct GameScreen<R = rand::rngs::ThreadRng> {
    globals: Globals,
    controller: GameController<R>,
    /// Whether this game set a new high score when it ended
    new_high_score: bool,
    /// Set when writing the new high score to disk failed
    save_error: Option<SaveError>,
}

impl GameScreen<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        GameScreen::with_rng(globals, rand::rng())
    }
}

impl<R: Rng> GameScreen<R> {
    pub(crate) fn with_rng(globals: Globals, rng: R) -> GameScreen<R> {
        let controller = GameController::with_rng(
            globals.options.grid(),
            globals.options.difficulty,
            globals.high_score.best(),
            rng,
        );
        GameScreen {
            globals,
            controller,
            new_high_score: false,
            save_error: None,
        }
    }

    /// Wait for input, but no longer than the time remaining until the next
    /// simulation step is due.  While the game is not running there is no
    /// deadline and this simply blocks on input, so leaving the `Playing`
    /// state stops the tick chain on its own.
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.controller.state() == GameState::Playing {
            let now = Instant::now();
            let deadline = self.controller.next_deadline(now);
            let wait = deadline.saturating_duration_since(now);
            if wait.is_zero() || !poll(wait)? {
                self.controller.tick(Instant::now());
                self.record_high_score();
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// If the game just ended with a new high score, remember it and write
    /// it to disk.  A failed write is shown on the game-over pop-up rather
    /// than ending the program.
    fn record_high_score(&mut self) {
        let Some(best) = self.controller.take_fresh_high_score() else {
            return;
        };
        self.new_high_score = true;
        self.globals.high_score.record(best);
        if !self.globals.config.files.save_high_score {
            return;
        }
        let result = match self.globals.config.high_score_file() {
            Some(path) => self.globals.high_score.save(&path),
            None => Err(SaveError::no_path()),
        };
        if let Err(e) = result {
            self.save_error = Some(e);
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.controller.state() {
            GameState::Playing => {
                if event == Event::FocusLost {
                    self.controller.toggle_pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.controller.change_direction(Direction::Up),
                        Command::Down => self.controller.change_direction(Direction::Down),
                        Command::Left => self.controller.change_direction(Direction::Left),
                        Command::Right => self.controller.change_direction(Direction::Right),
                        Command::Space | Command::Esc | Command::P => {
                            self.controller.toggle_pause();
                        }
                        _ => (),
                    }
                }
            }
            GameState::Ready => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit | Command::Q => return Some(Screen::Quit),
                    Command::Space | Command::Enter => self.controller.start_game(),
                    Command::M => {
                        return Some(Screen::Main(MainMenu::new(self.globals.clone())));
                    }
                    _ => (),
                }
            }
            GameState::Paused => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit | Command::Q => return Some(Screen::Quit),
                    Command::Space | Command::Esc | Command::P => {
                        self.controller.toggle_pause();
                    }
                    Command::R => self.restart(),
                    Command::M => {
                        return Some(Screen::Main(MainMenu::new(self.globals.clone())));
                    }
                    _ => (),
                }
            }
            GameState::GameOver => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit | Command::Q => return Some(Screen::Quit),
                    Command::R => self.restart(),
                    Command::M => {
                        return Some(Screen::Main(MainMenu::new(self.globals.clone())));
                    }
                    _ => (),
                }
            }
        }
        None
    }

    fn restart(&mut self) {
        self.new_high_score = false;
        self.save_error = None;
        self.controller.restart_game();
    }
}

impl<R> GameScreen<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn overlay(&self) -> Option<Overlay<'_>> {
        match self.controller.state() {
            GameState::Playing => None,
            GameState::Ready => Some(Overlay::new(
                "READY",
                vec![
                    Line::from_iter([
                        Span::raw("Press "),
                        Span::styled("Space", consts::KEY_STYLE),
                        Span::raw(" to start"),
                    ]),
                    Line::raw(""),
                    Line::from("Move with the arrow keys,"),
                    Line::from("wasd, or hjkl"),
                ],
            )),
            GameState::Paused => Some(Overlay::new(
                "PAUSED",
                vec![Line::from_iter([
                    Span::raw("Press "),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(" to resume"),
                ])],
            )),
            GameState::GameOver => {
                let mut lines = vec![Line::from(format!(
                    "Final Score: {}",
                    self.controller.score()
                ))];
                if self.new_high_score {
                    lines.push(Line::from("New High Score!"));
                }
                if self.save_error.is_some() {
                    lines.push(Line::from("(high score could not be saved)"));
                }
                lines.push(Line::raw(""));
                lines.push(Line::from_iter([
                    Span::raw("Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Main Menu ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ]));
                Some(Overlay::new("GAME OVER", lines))
            }
        }
    }
}

impl<R> Widget for &GameScreen<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, level_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        let theme = &self.globals.config.theme;
        Line::styled(
            format!(
                " Score: {}   High Score: {}",
                self.controller.score(),
                self.controller.high_score()
            ),
            theme.score_bar(),
        )
        .render(score_area, buf);

        let mut block_size = self.controller.grid().size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(level_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut level = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf: &mut *buf,
        };
        let snake = self.controller.snake();
        for &p in self.controller.body().iter().skip(1) {
            level.draw_cell(p, consts::SNAKE_BODY_SYMBOL, theme.snake());
        }
        level.draw_cell(
            self.controller.food_position(),
            consts::FOOD_SYMBOL,
            theme.food(),
        );
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.controller.state() == GameState::GameOver {
            level.draw_cell(snake.head(), consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            level.draw_cell(snake.head(), snake.head_symbol(), theme.snake());
        }

        if let Some(overlay) = self.overlay() {
            let overlay_area = center_rect(display, overlay.size());
            (&overlay).render(overlay_area, buf);
        }
    }
}

/// Maps level cells to buffer cells within the level box, dropping anything
/// that falls outside it (a head in a wall, a grid taller than the
/// terminal).
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: grid::Position, symbol: char, style: Style) {
        let Ok(px) = u16::try_from(pos.x) else {
            return;
        };
        let Ok(py) = u16::try_from(pos.y) else {
            return;
        };
        if px >= self.area.width || py >= self.area.height {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((self.area.x + px, self.area.y + py)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Position;
    use crate::options::GridDim;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn test_screen() -> GameScreen<ChaCha12Rng> {
        let mut globals = Globals::default();
        globals.options.grid_width = GridDim::new(10);
        globals.options.grid_height = GridDim::new(10);
        GameScreen::with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn run_into_wall(screen: &mut GameScreen<ChaCha12Rng>) {
        screen.controller.start_game();
        screen.controller.food.position = Position::new(0, 0);
        let t0 = Instant::now();
        for i in 0u32..5 {
            screen.controller.tick(t0 + Duration::from_millis(200) * i);
        }
        screen.record_high_score();
        assert_eq!(screen.controller.state(), GameState::GameOver);
    }

    fn buffer_row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_owned())
            .collect()
    }

    #[test]
    fn render_running_game() {
        let mut screen = test_screen();
        screen.controller.start_game();
        screen.controller.food.position = Position::new(1, 2);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&screen).render(area, &mut buf);
        let margin = " ".repeat(34);
        let mut expected = vec![format!("{:<80}", " Score: 0   High Score: 0")];
        expected.push(" ".repeat(80));
        expected.extend(std::iter::repeat_n(" ".repeat(80), 4));
        expected.push(format!("{margin}{:<46}", format!("┌{}┐", "─".repeat(10))));
        for gy in 0..10 {
            let interior: String = (0..10)
                .map(|gx| match (gx, gy) {
                    (1, 2) => '●',
                    (3, 5) | (4, 5) => '⚬',
                    (5, 5) => '<',
                    _ => ' ',
                })
                .collect();
            expected.push(format!("{margin}{:<46}", format!("│{interior}│")));
        }
        expected.push(format!("{margin}{:<46}", format!("└{}┘", "─".repeat(10))));
        expected.extend(std::iter::repeat_n(" ".repeat(80), 6));
        let actual: Vec<String> = (0..24).map(|y| buffer_row(&buf, y)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn ready_screen_shows_overlay() {
        let screen = test_screen();
        assert_eq!(screen.controller.state(), GameState::Ready);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&screen).render(area, &mut buf);
        let all_rows: String = (0..24).map(|y| buffer_row(&buf, y)).collect();
        assert!(all_rows.contains(" READY "));
        assert!(all_rows.contains("Press Space to start"));
    }

    #[test]
    fn space_starts_and_pauses() {
        let mut screen = test_screen();
        assert!(screen
            .handle_event(Event::Key(KeyCode::Char(' ').into()))
            .is_none());
        assert_eq!(screen.controller.state(), GameState::Playing);
        assert!(screen
            .handle_event(Event::Key(KeyCode::Char(' ').into()))
            .is_none());
        assert_eq!(screen.controller.state(), GameState::Paused);
        assert!(screen
            .handle_event(Event::Key(KeyCode::Char(' ').into()))
            .is_none());
        assert_eq!(screen.controller.state(), GameState::Playing);
    }

    #[test]
    fn focus_lost_pauses() {
        let mut screen = test_screen();
        screen.controller.start_game();
        assert!(screen.handle_event(Event::FocusLost).is_none());
        assert_eq!(screen.controller.state(), GameState::Paused);
    }

    #[test]
    fn arrow_keys_steer_only_while_playing() {
        let mut screen = test_screen();
        assert!(screen.handle_event(Event::Key(KeyCode::Down.into())).is_none());
        assert_eq!(
            screen.controller.snake.next_direction,
            Direction::Right
        );
        screen.controller.start_game();
        assert!(screen.handle_event(Event::Key(KeyCode::Down.into())).is_none());
        assert_eq!(screen.controller.snake.next_direction, Direction::Down);
    }

    #[test]
    fn quit_from_ready() {
        let mut screen = test_screen();
        assert!(matches!(
            screen.handle_event(Event::Key(KeyCode::Char('q').into())),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn restart_after_game_over() {
        let mut screen = test_screen();
        run_into_wall(&mut screen);
        assert!(screen
            .handle_event(Event::Key(KeyCode::Char('r').into()))
            .is_none());
        assert_eq!(screen.controller.state(), GameState::Playing);
        assert_eq!(screen.controller.score(), 0);
        assert!(!screen.new_high_score);
    }

    #[test]
    fn main_menu_from_game_over() {
        let mut screen = test_screen();
        run_into_wall(&mut screen);
        assert!(matches!(
            screen.handle_event(Event::Key(KeyCode::Char('m').into())),
            Some(Screen::Main(_))
        ));
    }

    #[test]
    fn high_score_written_on_game_over() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("highscore.json");
        let mut screen = test_screen();
        screen.globals.config.files.high_score_file = Some(path.clone());
        screen.controller.start_game();
        screen.controller.score = 30;
        run_into_wall(&mut screen);
        assert!(screen.new_high_score);
        assert!(screen.save_error.is_none());
        assert_eq!(screen.globals.high_score.best(), 30);
        let reloaded = crate::highscore::HighScore::load(&path).unwrap();
        assert_eq!(reloaded.best(), 30);
    }

    #[test]
    fn high_score_not_written_when_saving_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("highscore.json");
        let mut screen = test_screen();
        screen.globals.config.files.high_score_file = Some(path.clone());
        screen.globals.config.files.save_high_score = false;
        screen.controller.start_game();
        screen.controller.score = 30;
        run_into_wall(&mut screen);
        assert!(screen.new_high_score);
        assert_eq!(screen.globals.high_score.best(), 30);
        assert!(!path.exists());
    }
}
