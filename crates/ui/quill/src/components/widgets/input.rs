use forms::{FieldDescriptor, FieldKind, FieldState, RadioOption, Validity};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Clone)]
enum Control<'a> {
    Text {
        value: &'a str,
        placeholder: Option<&'a str>,
    },
    Checkbox {
        checked: bool,
    },
    Radio {
        options: &'a [RadioOption],
        selected: &'a str,
    },
}

/// One form row: `Label*: control`, followed by the validation message
/// while the field is invalid.
#[derive(Debug, Clone)]
pub struct LabeledInput<'a> {
    label: &'a str,
    required: bool,
    control: Control<'a>,
    validity: Validity,
    focused: bool,
    message: Option<&'a str>,
}

impl<'a> LabeledInput<'a> {
    pub fn new(descriptor: &'a FieldDescriptor, state: &'a FieldState) -> Self {
        let control = match descriptor.kind {
            FieldKind::Checkbox => Control::Checkbox {
                checked: !state.value.is_empty(),
            },
            FieldKind::RadioGroup => Control::Radio {
                options: &descriptor.options,
                selected: &state.value,
            },
            _ => Control::Text {
                value: &state.value,
                placeholder: descriptor.placeholder.as_deref(),
            },
        };
        Self {
            label: &descriptor.label,
            required: descriptor.required,
            control,
            validity: state.validity,
            focused: false,
            message: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Only shown while the field is invalid.
    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    pub fn label_text(&self) -> String {
        let star = if self.required { "*" } else { "" };
        format!("{}{star}: ", self.label)
    }

    /// Columns between the row start and the first character of the value.
    pub fn value_offset(&self) -> u16 {
        self.label_text().chars().count() as u16
    }

    fn shows_message(&self) -> bool {
        self.validity.is_invalid() && self.message.is_some_and(|m| !m.is_empty())
    }

    pub fn height(&self) -> u16 {
        if self.shows_message() { 2 } else { 1 }
    }

    fn control_spans(&self) -> Vec<Span<'a>> {
        let mut value_style = if self.focused {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::Cyan)
        };
        if self.validity.is_invalid() {
            value_style = value_style.fg(Color::Red);
        }

        match &self.control {
            Control::Text { value, placeholder } if value.is_empty() => {
                let hint = placeholder.unwrap_or("");
                vec![Span::styled(
                    hint,
                    value_style.add_modifier(Modifier::DIM | Modifier::ITALIC),
                )]
            }
            Control::Text { value, .. } => vec![Span::styled(*value, value_style)],
            Control::Checkbox { checked } => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                vec![Span::styled(mark, value_style)]
            }
            Control::Radio { options, selected } => {
                let mut spans = Vec::with_capacity(options.len() * 2);
                for (idx, option) in options.iter().enumerate() {
                    if idx > 0 {
                        spans.push(Span::raw("  "));
                    }
                    let mark = if option.value == *selected { "(•)" } else { "( )" };
                    spans.push(Span::styled(format!("{mark} {}", option.label), value_style));
                }
                spans
            }
        }
    }
}

impl Widget for LabeledInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = if self.validity.is_invalid() {
            Style::default().fg(Color::Red)
        } else if self.focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut first = vec![Span::styled(self.label_text(), label_style)];
        first.extend(self.control_spans());
        let mut lines = vec![Line::from(first)];
        if self.shows_message() {
            if let Some(message) = self.message {
                lines.push(Line::styled(
                    format!("  {message}"),
                    Style::default().fg(Color::Red),
                ));
            }
        }
        Paragraph::new(Text::from(lines)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::widgets::buffer_text;
    use pretty_assertions::assert_eq;

    fn render(widget: LabeledInput<'_>, width: u16) -> (Vec<String>, Buffer) {
        let area = Rect::new(0, 0, width, widget.height());
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (buffer_text(&buf), buf)
    }

    #[test]
    fn required_text_field_shows_star_and_value() {
        let descriptor = FieldDescriptor::new("name", "Name", FieldKind::Text).required();
        let mut state = FieldState::untouched("name");
        state.value = "Anna".into();

        let widget = LabeledInput::new(&descriptor, &state);
        assert_eq!(widget.value_offset(), 7);
        let (lines, _) = render(widget, 20);
        assert_eq!(lines, ["Name*: Anna"]);
    }

    #[test]
    fn invalid_field_adds_message_line_in_red() {
        let descriptor = FieldDescriptor::new("age", "Age", FieldKind::Numeric);
        let mut state = FieldState::untouched("age");
        state.value = "0".into();
        state.validity = Validity::Invalid;

        let widget = LabeledInput::new(&descriptor, &state).message(Some("too small"));
        assert_eq!(widget.height(), 2);
        let (lines, buf) = render(widget, 20);
        assert_eq!(lines, ["Age: 0", "  too small"]);
        assert_eq!(buf[(2, 1)].fg, Color::Red);
    }

    #[test]
    fn message_hidden_until_invalid() {
        let descriptor = FieldDescriptor::new("age", "Age", FieldKind::Numeric);
        let state = FieldState::untouched("age");
        let widget = LabeledInput::new(&descriptor, &state).message(Some("too small"));
        assert_eq!(widget.height(), 1);
    }

    #[test]
    fn checkbox_and_radio_controls() {
        let checkbox = FieldDescriptor::new("n", "Notify", FieldKind::Checkbox);
        let mut state = FieldState::untouched("n");
        state.value = "on".into();
        let (lines, _) = render(LabeledInput::new(&checkbox, &state), 20);
        assert_eq!(lines, ["Notify: [x]"]);

        let radio = FieldDescriptor::new("sex", "Sex", FieldKind::RadioGroup).options([
            RadioOption::new("Male", "male"),
            RadioOption::new("Female", "female"),
        ]);
        let mut state = FieldState::untouched("sex");
        state.value = "female".into();
        let (lines, _) = render(LabeledInput::new(&radio, &state), 40);
        assert_eq!(lines, ["Sex: ( ) Male  (•) Female"]);
    }

    #[test]
    fn empty_text_shows_placeholder() {
        let descriptor =
            FieldDescriptor::new("email", "Email", FieldKind::Email).placeholder("you@example.com");
        let state = FieldState::untouched("email");
        let (lines, _) = render(LabeledInput::new(&descriptor, &state), 30);
        assert_eq!(lines, ["Email: you@example.com"]);
    }
}
