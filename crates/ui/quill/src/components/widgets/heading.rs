use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Widget,
};

/// Primary header.
pub struct Heading<'a>(pub &'a str);

/// Secondary header.
pub struct SubHeading<'a>(pub &'a str);

impl Widget for Heading<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::styled(
            self.0,
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .render(area, buf);
    }
}

impl Widget for SubHeading<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::styled(
            self.0,
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )
        .render(area, buf);
    }
}
