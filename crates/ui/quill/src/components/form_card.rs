use color_eyre::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use forms::{FieldKind, Form, FormSchema, SubmitOutcome};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Color,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use tui_input::{Input, backend::crossterm::EventHandler};

use super::{
    Component,
    widgets::{Button, Card, Heading, LabeledInput, SubHeading},
};
use crate::{
    action::Action,
    tui::{EventResponse, Frame},
};

const CANCEL_BG: Color = Color::Rgb(139, 0, 0);
const CANCEL_FG: Color = Color::White;
const SUBMIT_BG: Color = Color::Rgb(0, 100, 0);
const SUBMIT_FG: Color = Color::Rgb(255, 255, 224);

/// What currently has keyboard focus inside the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Field { name: String, kind: FieldKind },
    Cancel,
    Submit,
}

/// The interactive form: one row per field plus Cancel / Submit.
pub struct FormCard {
    form: Form,
    focus: usize,
    input: Input,
}

impl FormCard {
    pub fn new(schema: FormSchema) -> Self {
        let mut card = Self {
            form: Form::new(schema),
            focus: 0,
            input: Input::default(),
        };
        card.load_input();
        card
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn focus(&self) -> Focus {
        let fields = self.form.schema().fields();
        match fields.get(self.focus) {
            Some(d) => Focus::Field {
                name: d.name.clone(),
                kind: d.kind,
            },
            None if self.focus == fields.len() => Focus::Cancel,
            None => Focus::Submit,
        }
    }

    fn focus_slots(&self) -> usize {
        self.form.schema().field_count() + 2
    }

    fn move_focus(&mut self, step: isize) -> Result<()> {
        if let Focus::Field { name, .. } = self.focus() {
            let validity = self.form.on_blur(&name)?;
            debug!(field = %name, %validity, "blur");
        }
        let slots = self.focus_slots() as isize;
        self.focus = (self.focus as isize + step).rem_euclid(slots) as usize;
        self.load_input();
        Ok(())
    }

    /// Syncs the line editor with the stored value of the focused field.
    fn load_input(&mut self) {
        self.input = match self.focus() {
            Focus::Field { name, kind } if kind.is_textual() => {
                Input::new(self.form.field_state(&name).value)
            }
            _ => Input::default(),
        };
    }

    fn edit(&mut self, name: &str, event: &CrosstermEvent) -> Result<()> {
        let before = self.input.value().to_string();
        self.input.handle_event(event);
        if self.input.value() != before {
            self.form.on_value_change(name, self.input.value())?;
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<Option<Action>> {
        // Leaving the focused field counts as a blur, so it gets checked too.
        if let Focus::Field { name, .. } = self.focus() {
            self.form.on_blur(&name)?;
        }
        match self.form.submit() {
            SubmitOutcome::Accepted(data) => {
                info!(records = data.len(), "form submitted");
                self.focus = 0;
                self.load_input();
                Ok(None)
            }
            SubmitOutcome::Rejected { invalid } => {
                warn!(?invalid, "submit rejected");
                self.load_input();
                Ok(Some(Action::Rejected(invalid.len())))
            }
        }
    }

    fn cancel(&mut self) {
        self.form.on_cancel();
        self.focus = 0;
        self.load_input();
    }

    fn rows(&self) -> Vec<Constraint> {
        let mut rows = vec![
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ];
        for descriptor in self.form.schema().fields() {
            let state = self.form.field_state(&descriptor.name);
            let widget = LabeledInput::new(descriptor, &state)
                .message(self.form.validation_message(&descriptor.name));
            rows.push(Constraint::Length(widget.height()));
        }
        rows.push(Constraint::Length(1));
        rows.push(Constraint::Length(1));
        rows
    }

    pub fn height(&self) -> u16 {
        let content: u16 = self
            .rows()
            .iter()
            .map(|c| match c {
                Constraint::Length(h) => *h,
                _ => 0,
            })
            .sum();
        content + 2
    }
}

impl Component for FormCard {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.form.set_submit_handler(move |data| {
            if tx.send(Action::Submitted(data.clone())).is_err() {
                warn!("action channel closed, submission dropped");
            }
        });
        Ok(())
    }

    fn height_constraint(&self) -> Constraint {
        Constraint::Length(self.height())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        let focus = self.focus();
        let action = match (key.code, key.modifiers) {
            (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => Action::Submit,
            (KeyCode::Tab, _) | (KeyCode::Down, _) => Action::FocusNext,
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => Action::FocusPrev,
            (KeyCode::Esc, _) => Action::Cancel,
            (KeyCode::Enter, _) => match focus {
                Focus::Submit => Action::Submit,
                Focus::Cancel => Action::Cancel,
                Focus::Field { .. } => Action::FocusNext,
            },
            (code, _) => match (focus, code) {
                (Focus::Field { name, kind }, _) if kind.is_textual() => {
                    self.edit(&name, &CrosstermEvent::Key(key))?;
                    Action::Update
                }
                (Focus::Field { kind: FieldKind::Checkbox, .. }, KeyCode::Char(' ')) => {
                    Action::Toggle
                }
                (Focus::Field { kind: FieldKind::RadioGroup, .. }, KeyCode::Left) => {
                    Action::CycleOption(-1)
                }
                (
                    Focus::Field { kind: FieldKind::RadioGroup, .. },
                    KeyCode::Right | KeyCode::Char(' '),
                ) => Action::CycleOption(1),
                (Focus::Cancel | Focus::Submit, KeyCode::Left) => Action::FocusPrev,
                (Focus::Cancel | Focus::Submit, KeyCode::Right) => Action::FocusNext,
                _ => return Ok(None),
            },
        };
        Ok(Some(EventResponse::Stop(action)))
    }

    fn handle_paste(&mut self, text: String) -> Result<Option<EventResponse<Action>>> {
        let Focus::Field { name, kind } = self.focus() else {
            return Ok(None);
        };
        if !kind.is_textual() {
            return Ok(None);
        }
        let text = text.replace(['\r', '\n'], "");
        let cursor = self.input.cursor();
        let mut value: String = self.input.value().chars().take(cursor).collect();
        value.push_str(&text);
        value.extend(self.input.value().chars().skip(cursor));
        self.input = Input::new(value).with_cursor(cursor + text.chars().count());
        self.form.on_value_change(&name, self.input.value())?;
        Ok(Some(EventResponse::Stop(Action::Update)))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::FocusNext => self.move_focus(1)?,
            Action::FocusPrev => self.move_focus(-1)?,
            Action::Toggle => {
                if let Focus::Field { name, .. } = self.focus() {
                    self.form.toggle_checked(&name)?;
                }
            }
            Action::CycleOption(step) => {
                if let Focus::Field { name, .. } = self.focus() {
                    self.form.cycle_option(&name, step)?;
                }
            }
            Action::Submit => return self.submit(),
            Action::Cancel => self.cancel(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let card = Card::new();
        let inner = card.inner(area);
        f.render_widget(card, area);

        let chunks = Layout::vertical(self.rows()).split(inner);
        let schema = self.form.schema();
        f.render_widget(Heading(&schema.title), chunks[0]);
        if let Some(description) = &schema.description {
            f.render_widget(SubHeading(description), chunks[1]);
        }

        for (idx, descriptor) in schema.fields().iter().enumerate() {
            let row = chunks[3 + idx];
            let state = self.form.field_state(&descriptor.name);
            let focused = idx == self.focus;
            let widget = LabeledInput::new(descriptor, &state)
                .focused(focused)
                .message(self.form.validation_message(&descriptor.name));
            if focused && descriptor.kind.is_textual() {
                let col = widget.value_offset() + self.input.visual_cursor() as u16;
                f.set_cursor_position((row.x + col.min(row.width.saturating_sub(1)), row.y));
            }
            f.render_widget(widget, row);
        }

        let focus = self.focus();
        let cancel = Button::new("Cancel")
            .background(CANCEL_BG)
            .text_color(CANCEL_FG)
            .focused(focus == Focus::Cancel);
        let submit = Button::new("Submit")
            .background(SUBMIT_BG)
            .text_color(SUBMIT_FG)
            .focused(focus == Focus::Submit)
            .enabled(self.form.all_required_filled());
        let [cancel_area, _, submit_area, _] = Layout::horizontal([
            Constraint::Length(cancel.width()),
            Constraint::Length(2),
            Constraint::Length(submit.width()),
            Constraint::Min(0),
        ])
        .areas(chunks[chunks.len() - 1]);
        f.render_widget(cancel, cancel_area);
        f.render_widget(submit, submit_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use forms::{RecordValue, Validity, create_user_schema};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn card() -> FormCard {
        FormCard::new(create_user_schema().unwrap())
    }

    /// Feeds a key through the same path the app uses.
    fn press(card: &mut FormCard, code: KeyCode) -> Option<Action> {
        let mut event = key(code);
        event.kind = KeyEventKind::Press;
        match card.handle_key_events(event).unwrap() {
            Some(EventResponse::Stop(action)) | Some(EventResponse::Continue(action)) => {
                card.update(action.clone()).unwrap();
                Some(action)
            }
            None => None,
        }
    }

    fn type_text(card: &mut FormCard, text: &str) {
        for c in text.chars() {
            press(card, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_updates_the_focused_field() {
        let mut card = card();
        type_text(&mut card, "Anna");
        assert_eq!(card.form().field_state("name").value, "Anna");
        press(&mut card, KeyCode::Backspace);
        assert_eq!(card.form().field_state("name").value, "Ann");
    }

    #[test]
    fn leaving_a_field_validates_it() {
        let mut card = card();
        type_text(&mut card, "Anna1");
        press(&mut card, KeyCode::Tab);
        assert_eq!(card.form().field_state("name").validity, Validity::Invalid);
        assert_eq!(
            card.focus(),
            Focus::Field {
                name: "surname".into(),
                kind: FieldKind::SingleLineString
            }
        );

        press(&mut card, KeyCode::BackTab);
        assert_eq!(card.input.value(), "Anna1");
    }

    #[test]
    fn focus_wraps_around_through_buttons() {
        let mut card = card();
        press(&mut card, KeyCode::BackTab);
        assert_eq!(card.focus(), Focus::Submit);
        press(&mut card, KeyCode::BackTab);
        assert_eq!(card.focus(), Focus::Cancel);
        press(&mut card, KeyCode::Tab);
        press(&mut card, KeyCode::Tab);
        assert!(matches!(card.focus(), Focus::Field { name, .. } if name == "name"));
    }

    #[test]
    fn space_toggles_checkbox_and_arrows_cycle_radio() {
        let mut card = card();
        while card.focus()
            != (Focus::Field {
                name: "sex".into(),
                kind: FieldKind::RadioGroup,
            })
        {
            press(&mut card, KeyCode::Tab);
        }
        press(&mut card, KeyCode::Right);
        assert_eq!(card.form().field_state("sex").value, "male");
        press(&mut card, KeyCode::Right);
        assert_eq!(card.form().field_state("sex").value, "female");
        press(&mut card, KeyCode::Left);
        assert_eq!(card.form().field_state("sex").value, "male");

        press(&mut card, KeyCode::Tab);
        press(&mut card, KeyCode::Char(' '));
        assert!(card.form().is_checked("notification").unwrap());
    }

    #[test]
    fn rejected_submit_reports_invalid_count() {
        let mut card = card();
        type_text(&mut card, "Anna");
        press(&mut card, KeyCode::Tab);
        type_text(&mut card, "Smith");
        press(&mut card, KeyCode::Tab);
        type_text(&mut card, "not-an-email");
        press(&mut card, KeyCode::Tab);
        type_text(&mut card, "0");

        let mut ctrl_s = key(KeyCode::Char('s'));
        ctrl_s.modifiers = KeyModifiers::CONTROL;
        let response = card.handle_key_events(ctrl_s).unwrap();
        assert_eq!(response, Some(EventResponse::Stop(Action::Submit)));
        let follow_up = card.update(Action::Submit).unwrap();
        assert_eq!(follow_up, Some(Action::Rejected(3)));
        assert_eq!(card.form().field_state("age").validity, Validity::Invalid);
        assert_eq!(card.form().field_state("name").value, "Anna");
    }

    #[test]
    fn accepted_submit_sends_data_and_clears() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut card = card();
        card.register_action_handler(tx).unwrap();

        for (idx, value) in ["Anna", "Smith", "anna@example.com", "30", "Green"]
            .into_iter()
            .enumerate()
        {
            if idx > 0 {
                press(&mut card, KeyCode::Tab);
            }
            type_text(&mut card, value);
        }
        assert_eq!(card.update(Action::Submit).unwrap(), None);

        let Ok(Action::Submitted(data)) = rx.try_recv() else {
            panic!("expected a submission");
        };
        assert_eq!(data.len(), 7);
        assert_eq!(
            data.get("age").map(|r| &r.value),
            Some(&RecordValue::Text("30".into()))
        );
        assert_eq!(card.form().field_state("name").value, "");
    }

    #[test]
    fn accepted_submit_refocuses_first_field() {
        let mut card = card();
        for (idx, value) in ["Anna", "Smith", "anna@example.com", "30", "Green"]
            .into_iter()
            .enumerate()
        {
            if idx > 0 {
                press(&mut card, KeyCode::Tab);
            }
            type_text(&mut card, value);
        }
        card.update(Action::Submit).unwrap();
        assert_eq!(
            card.focus(),
            Focus::Field {
                name: "name".into(),
                kind: FieldKind::SingleLineString
            }
        );

        type_text(&mut card, "Ben");
        assert_eq!(card.form().field_state("name").value, "Ben");
        assert_eq!(card.form().field_state("color").value, "");
    }

    #[test]
    fn escape_cancels_and_refocuses_first_field() {
        let mut card = card();
        type_text(&mut card, "Anna");
        press(&mut card, KeyCode::Tab);
        assert_eq!(press(&mut card, KeyCode::Esc), Some(Action::Cancel));
        assert!(card.form().states().is_empty());
        assert!(matches!(card.focus(), Focus::Field { name, .. } if name == "name"));
    }

    #[test]
    fn paste_appends_to_text_field() {
        let mut card = card();
        type_text(&mut card, "An");
        card.handle_paste("na\n".into()).unwrap();
        assert_eq!(card.form().field_state("name").value, "Anna");
    }

    #[test]
    fn paste_inserts_at_the_cursor() {
        let mut card = card();
        type_text(&mut card, "Aa");
        press(&mut card, KeyCode::Left);
        card.handle_paste("nn".into()).unwrap();
        assert_eq!(card.form().field_state("name").value, "Anna");
        assert_eq!(card.input.cursor(), 3);

        type_text(&mut card, "x");
        assert_eq!(card.form().field_state("name").value, "Annxa");
    }

    #[test]
    fn draws_heading_fields_and_buttons() {
        let mut card = card();
        let height = card.height();
        let mut terminal = Terminal::new(TestBackend::new(60, height)).unwrap();
        terminal
            .draw(|f| card.draw(f, f.area()).unwrap())
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Create User"));
        assert!(text.contains("Fill the form"));
        assert!(text.contains("Name*:"));
        assert!(text.contains("Cancel"));
        assert!(text.contains("Submit"));
    }
}
