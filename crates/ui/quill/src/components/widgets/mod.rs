//! Presentational widgets.
//!
//! These hold no state and know nothing about events; they render whatever
//! value / validity / focus they are handed. Interactive behavior lives in
//! `form_card.rs` and `history.rs`.
pub mod button;
pub mod card;
pub mod heading;
pub mod input;
pub mod user_info;

pub use button::Button;
pub use card::Card;
pub use heading::{Heading, SubHeading};
pub use input::LabeledInput;
pub use user_info::UserInfo;

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}
