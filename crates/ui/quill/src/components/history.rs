use std::ops::Range;

use color_eyre::Result;
use forms::FormData;
use ratatui::{
    layout::{Constraint, Rect},
    style::Color,
};
use tracing::debug;

use super::{
    Component,
    widgets::{Card, UserInfo},
};
use crate::{action::Action, tui::Frame};

/// Every accepted submission, newest last, one colored card each.
///
/// While `follow` is set the panel keeps the newest cards in view; scrolling
/// up pins it to `offset` until the user scrolls back to the end.
#[derive(Debug, Clone)]
pub struct SubmissionHistory {
    entries: Vec<FormData>,
    palette: Vec<Color>,
    offset: usize,
    follow: bool,
    last_start: usize,
}

impl SubmissionHistory {
    pub fn new(palette: Vec<Color>) -> Self {
        Self {
            entries: Vec::new(),
            palette,
            offset: 0,
            follow: true,
            last_start: 0,
        }
    }

    pub fn push(&mut self, data: FormData) {
        self.entries.push(data);
        debug!(total = self.entries.len(), "history grew");
    }

    pub fn entries(&self) -> &[FormData] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Background of the card at `idx`; the palette repeats.
    pub fn color_for(&self, idx: usize) -> Color {
        if self.palette.is_empty() {
            Color::Reset
        } else {
            self.palette[idx % self.palette.len()]
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.entries)
    }

    fn card_height(&self, idx: usize) -> u16 {
        UserInfo::new(&self.entries[idx]).height() + 2
    }

    /// Cards that fit into `height` rows. At least one card is always
    /// included, clipped if it is taller than the panel.
    fn visible_range(&self, height: u16) -> Range<usize> {
        let len = self.entries.len();
        if len == 0 {
            return 0..0;
        }
        let mut used = 0u16;
        if self.follow {
            let mut start = len;
            while start > 0 {
                let h = self.card_height(start - 1);
                if start != len && used.saturating_add(h) > height {
                    break;
                }
                used = used.saturating_add(h);
                start -= 1;
            }
            start..len
        } else {
            let start = self.offset.min(len - 1);
            let mut end = start;
            while end < len {
                let h = self.card_height(end);
                if end != start && used.saturating_add(h) > height {
                    break;
                }
                used = used.saturating_add(h);
                end += 1;
            }
            start..end
        }
    }

    fn scroll_up(&mut self) {
        self.follow = false;
        self.offset = self.last_start.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        if self.follow {
            return;
        }
        self.offset += 1;
        if self.offset + 1 >= self.entries.len() {
            self.follow = true;
        }
    }
}

impl Component for SubmissionHistory {
    fn height_constraint(&self) -> Constraint {
        Constraint::Min(0)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Submitted(data) => self.push(data),
            Action::ScrollUp => self.scroll_up(),
            Action::ScrollDown => self.scroll_down(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let range = self.visible_range(area.height);
        self.last_start = range.start;

        let mut y = area.y;
        for idx in range {
            let remaining = area.bottom().saturating_sub(y);
            if remaining == 0 {
                break;
            }
            let rect = Rect::new(area.x, y, area.width, self.card_height(idx).min(remaining));
            let card = Card::new().background(self.color_for(idx));
            let inner = card.inner(rect);
            f.render_widget(card, rect);
            f.render_widget(UserInfo::new(&self.entries[idx]), inner);
            y += rect.height;
        }
        Ok(())
    }
}
