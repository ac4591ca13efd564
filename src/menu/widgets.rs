use crate::consts;
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

static LOGO: &[&str] = &[
    r" ____   _  _  _    _                 ",
    r"/ ___| | |(_)| |_ | |__    ___  _ __ ",
    r"\___ \ | || || __|| '_ \  / _ \| '__|",
    r" ___) || || || |_ | | | ||  __/| |   ",
    r"|____/ |_||_| \__||_| |_| \___||_|   ",
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    pub(super) const WIDTH: u16 = 37;
    #[allow(clippy::cast_possible_truncation)]
    pub(super) const HEIGHT: u16 = LOGO.len() as u16;
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (text, row) in LOGO.iter().zip(area.rows()) {
            Line::styled(*text, consts::SNAKE_STYLE).render(row, buf);
        }
    }
}

static INSTRUCTIONS: &[&str] = &[
    "Move the snake with:",
    "       ← ↓ ↑ →",
    "   or: h j k l",
    "   or: a s w d",
    "Eat the food, but",
    "don't hit the walls",
    "or yourself!",
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const WIDTH: u16 = 20;
    #[allow(clippy::cast_possible_truncation)]
    pub(super) const HEIGHT: u16 = INSTRUCTIONS.len() as u16;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (text, row) in INSTRUCTIONS.iter().zip(area.rows()) {
            Line::raw(*text).render(row, buf);
        }
    }
}
