use crate::command::Command;
use crate::game::GameScreen;
use crate::menu::MainMenu;
use crate::util::Globals;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::read;
use ratatui::{backend::Backend, Terminal};
use std::io;

/// The application driver: draws whichever screen is active and feeds it
/// input until something asks to quit.
#[derive(Debug)]
pub(crate) struct App {
    screen: Screen,

    /// A pop-up about startup problems, shown over the main menu until the
    /// user dismisses it
    warning: Option<Warning>,
}

impl App {
    pub(crate) fn new(globals: Globals, warning: Option<Warning>) -> App {
        App {
            screen: Screen::Main(MainMenu::new(globals)),
            warning,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Main(ref menu) => {
                terminal.draw(|frame| {
                    menu.draw(frame);
                    if let Some(ref warning) = self.warning {
                        frame.render_widget(warning, frame.area());
                    }
                })?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if let Some(warning) = self.warning.as_mut() {
            if let Some(cmd) = read()?
                .as_key_press_event()
                .and_then(Command::from_key_event)
            {
                match warning.handle_command(cmd) {
                    Some(WarningOutcome::Dismissed) => self.warning = None,
                    Some(WarningOutcome::Quit) => self.screen = Screen::Quit,
                    None => (),
                }
            }
            return Ok(());
        }
        match self.screen {
            Screen::Main(ref mut menu) => {
                if let Some(screen) = menu.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Game(ref mut game) => {
                if let Some(screen) = game.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(GameScreen),
    Quit,
}
