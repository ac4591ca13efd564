use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A centered pop-up announcing the game's current phase (ready, paused, or
/// over) and the keys that move it along.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Overlay<'a> {
    title: &'a str,
    lines: Vec<Line<'a>>,
}

impl<'a> Overlay<'a> {
    pub(super) fn new(title: &'a str, lines: Vec<Line<'a>>) -> Overlay<'a> {
        Overlay { title, lines }
    }

    /// The size that should be used for the `Rect` passed to
    /// `Overlay::render()`
    pub(super) fn size(&self) -> Size {
        let text_width = self.lines.iter().map(Line::width).max().unwrap_or(0);
        let title_width = self.title.chars().count() + 2;
        let width = u16::try_from(text_width.max(title_width)).unwrap_or(u16::MAX);
        let height = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        Size {
            // Borders plus one cell of horizontal padding on each side
            width: width.saturating_add(4),
            height: height.saturating_add(2),
        }
    }
}

impl Widget for &Overlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in self.lines.iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
