use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};

/// Clickable-looking label with its own colors and horizontal padding.
#[derive(Debug, Clone)]
pub struct Button<'a> {
    text: &'a str,
    background: Option<Color>,
    text_color: Option<Color>,
    padding: u16,
    focused: bool,
    enabled: bool,
}

impl<'a> Button<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            background: None,
            text_color: None,
            padding: 2,
            focused: false,
            enabled: true,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// A disabled-looking button is dimmed but still reacts.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn width(&self) -> u16 {
        self.text.chars().count() as u16 + self.padding * 2
    }

    fn style(&self) -> Style {
        let mut style = Style::default();
        if let Some(bg) = self.background {
            style = style.bg(bg);
        }
        if let Some(fg) = self.text_color {
            style = style.fg(fg);
        }
        if self.focused {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if !self.enabled {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pad = " ".repeat(self.padding as usize);
        Paragraph::new(format!("{pad}{}{pad}", self.text))
            .style(self.style())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::widgets::buffer_text;

    #[test]
    fn renders_padded_text_with_colors() {
        let button = Button::new("Submit")
            .background(Color::Green)
            .text_color(Color::LightYellow)
            .padding(1);
        assert_eq!(button.width(), 8);

        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        button.render(area, &mut buf);
        assert_eq!(buffer_text(&buf), [" Submit"]);
        assert_eq!(buf[(1, 0)].bg, Color::Green);
        assert_eq!(buf[(1, 0)].fg, Color::LightYellow);
    }

    #[test]
    fn focus_and_disabled_modifiers() {
        let style = Button::new("x").focused(true).enabled(false).style();
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::DIM));
    }
}
