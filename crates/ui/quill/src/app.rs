use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    action::Action,
    components::{Component, form_card::FormCard, history::SubmissionHistory},
    config::Config,
    tui::{Event, EventResponse, Frame, Tui},
};

const MAX_WIDTH: u16 = 72;
const HINTS: &str =
    "Tab/Shift-Tab move · Space toggle · ←/→ choose · Ctrl-S submit · Esc clear · Ctrl-Q quit";

pub struct App {
    pub config: Config,
    form: FormCard,
    history: SubmissionHistory,
    status: String,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let form = FormCard::new(config.schema()?);
        let history = SubmissionHistory::new(config.palette());
        Ok(Self {
            config,
            form,
            history,
            status: String::new(),
            should_quit: false,
        })
    }

    pub fn history(&self) -> &SubmissionHistory {
        &self.history
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
        self.register_action_handler(action_tx.clone())?;

        let mut tui = Tui::new()?
            .tick_rate(self.config.tick_rate)
            .frame_rate(self.config.frame_rate);
        tui.enter()?;
        info!(fields = self.form.form().schema().field_count(), "ui started");

        loop {
            if let Some(event) = tui.next().await {
                if let Some(action) = self.handle_event(event)? {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                match action {
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.render(&mut tui)?;
                    }
                    Action::Render => self.render(&mut tui)?,
                    _ => {}
                }
                if let Some(next) = self.update(action)? {
                    action_tx.send(next)?;
                }
            }

            if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!(submissions = self.history.len(), "ui stopped");
        Ok(())
    }

    pub fn register_action_handler(&mut self, tx: mpsc::UnboundedSender<Action>) -> Result<()> {
        self.form.register_action_handler(tx.clone())?;
        self.history.register_action_handler(tx)?;
        Ok(())
    }

    /// Turns a terminal event into at most one action. Quit keys win over
    /// everything, then the form gets the event, then scrolling.
    pub fn handle_event(&mut self, event: Event) -> Result<Option<Action>> {
        if let Event::Key(key) = &event {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            {
                return Ok(Some(Action::Quit));
            }
        }

        if let Some(response) = self.form.handle_events(event.clone())? {
            let (EventResponse::Continue(action) | EventResponse::Stop(action)) = response;
            return Ok(Some(action));
        }

        let action = match event {
            Event::Tick => Action::Tick,
            Event::Render => Action::Render,
            Event::Resize(w, h) => Action::Resize(w, h),
            Event::Error => Action::Error("terminal event stream failed".into()),
            Event::Key(key) => match key.code {
                KeyCode::PageUp => Action::ScrollUp,
                KeyCode::PageDown => Action::ScrollDown,
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };
        Ok(Some(action))
    }

    pub fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if !matches!(action, Action::Tick | Action::Render) {
            debug!(%action, "dispatch");
        }
        match &action {
            Action::Quit => self.should_quit = true,
            Action::Submitted(_) => {
                self.status = format!("Saved submission #{}", self.history.len() + 1);
            }
            Action::Rejected(n) => {
                let noun = if *n == 1 { "field needs" } else { "fields need" };
                self.status = format!("{n} {noun} attention");
            }
            Action::Cancel => self.status = "Form cleared".into(),
            Action::Error(msg) => {
                error!(%msg);
                self.status = msg.clone();
            }
            _ => {}
        }

        let from_form = self.form.update(action.clone())?;
        let from_history = self.history.update(action)?;
        Ok(from_form.or(from_history))
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let mut result = Ok(());
        tui.draw(|f| result = self.draw(f))?;
        result
    }

    fn draw(&mut self, f: &mut Frame<'_>) -> Result<()> {
        let [main, footer_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());
        let [column, _] =
            Layout::horizontal([Constraint::Max(MAX_WIDTH), Constraint::Min(0)]).areas(main);
        let [form_area, history_area] = Layout::vertical([
            self.form.height_constraint(),
            self.history.height_constraint(),
        ])
        .areas(column);

        self.form.draw(f, form_area)?;
        self.history.draw(f, history_area)?;

        let mut footer = Vec::with_capacity(3);
        if !self.status.is_empty() {
            footer.push(Span::styled(
                self.status.as_str(),
                Style::default().fg(Color::Yellow),
            ));
            footer.push(Span::raw("  "));
        }
        footer.push(Span::styled(HINTS, Style::default().fg(Color::DarkGray)));
        f.render_widget(Line::from(footer), footer_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    /// Runs one event through the app the way the event loop does.
    fn pump(
        app: &mut App,
        rx: &mut mpsc::UnboundedReceiver<Action>,
        tx: &mpsc::UnboundedSender<Action>,
        event: Event,
    ) {
        if let Some(action) = app.handle_event(event).unwrap() {
            tx.send(action).unwrap();
        }
        while let Ok(action) = rx.try_recv() {
            if let Some(next) = app.update(action).unwrap() {
                tx.send(next).unwrap();
            }
        }
    }

    fn setup() -> (App, mpsc::UnboundedSender<Action>, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(Config::default()).unwrap();
        app.register_action_handler(tx.clone()).unwrap();
        (app, tx, rx)
    }

    fn fill(
        app: &mut App,
        rx: &mut mpsc::UnboundedReceiver<Action>,
        tx: &mpsc::UnboundedSender<Action>,
        values: &[&str],
    ) {
        for (idx, value) in values.iter().enumerate() {
            if idx > 0 {
                pump(app, rx, tx, key(KeyCode::Tab));
            }
            for c in value.chars() {
                pump(app, rx, tx, key(KeyCode::Char(c)));
            }
        }
    }

    #[test]
    fn quit_keys_win_even_inside_a_text_field() {
        let (mut app, tx, mut rx) = setup();
        pump(&mut app, &mut rx, &tx, ctrl('q'));
        assert!(app.should_quit());

        let (mut app, tx, mut rx) = setup();
        pump(&mut app, &mut rx, &tx, ctrl('c'));
        assert!(app.should_quit());
    }

    #[test]
    fn accepted_submissions_land_in_history() {
        let (mut app, tx, mut rx) = setup();
        fill(&mut app, &mut rx, &tx, &["Anna", "Smith", "anna@example.com", "30", "Green"]);
        pump(&mut app, &mut rx, &tx, ctrl('s'));
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.status(), "Saved submission #1");

        fill(&mut app, &mut rx, &tx, &["Ben", "Jones", "ben@example.com", "41", "Blue"]);
        pump(&mut app, &mut rx, &tx, ctrl('s'));
        assert_eq!(app.history().len(), 2);
        let json = app.history().to_json().unwrap();
        assert_eq!(json[1][0]["value"], "Ben");
    }

    #[test]
    fn rejected_submission_sets_status() {
        let (mut app, tx, mut rx) = setup();
        fill(&mut app, &mut rx, &tx, &["Anna"]);
        pump(&mut app, &mut rx, &tx, ctrl('s'));
        assert!(app.history().is_empty());
        assert_eq!(app.status(), "4 fields need attention");
    }

    #[test]
    fn draws_form_history_and_footer() {
        let (mut app, tx, mut rx) = setup();
        fill(&mut app, &mut rx, &tx, &["Anna", "Smith", "anna@example.com", "30", "Green"]);
        pump(&mut app, &mut rx, &tx, ctrl('s'));

        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| app.draw(f).unwrap()).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Create User"));
        assert!(text.contains("User Info"));
        assert!(text.contains("Name: Anna"));
        assert!(text.contains("Saved submission #1"));
    }
}
