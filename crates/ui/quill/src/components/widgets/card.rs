use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Clear, Widget},
};

/// Rounded, bordered container with an optional background color.
#[derive(Debug, Clone, Default)]
pub struct Card<'a> {
    title: Option<&'a str>,
    background: Option<Color>,
}

impl<'a> Card<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Area left for content inside the border.
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    fn block(&self) -> Block<'a> {
        let mut style = Style::default();
        if let Some(bg) = self.background {
            style = style.bg(bg).fg(Color::White);
        }
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .style(style);
        match self.title {
            Some(title) => block.title(format!(" {title} ")),
            None => block,
        }
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        self.block().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::widgets::buffer_text;

    #[test]
    fn inner_area_excludes_border() {
        let card = Card::new();
        assert_eq!(card.inner(Rect::new(0, 0, 10, 5)), Rect::new(1, 1, 8, 3));
    }

    #[test]
    fn background_fills_the_card() {
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        Card::new()
            .title("Card")
            .background(Color::Magenta)
            .render(area, &mut buf);
        assert_eq!(buf[(5, 1)].bg, Color::Magenta);
        assert!(buffer_text(&buf)[0].contains(" Card "));
    }
}
