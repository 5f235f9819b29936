use forms::FormData;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

/// Read-only listing of one submission: a header, then `label: value` rows.
pub struct UserInfo<'a> {
    data: &'a FormData,
}

impl<'a> UserInfo<'a> {
    pub fn new(data: &'a FormData) -> Self {
        Self { data }
    }

    pub fn height(&self) -> u16 {
        1 + self.data.len() as u16
    }
}

impl Widget for UserInfo<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::styled(
            "User Info",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        lines.extend(self.data.records().iter().map(|record| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", record.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(record.value.to_string()),
            ])
        }));
        Paragraph::new(Text::from(lines)).render(area, buf);
    }
}
