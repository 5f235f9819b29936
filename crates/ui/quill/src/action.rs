use forms::FormData;
use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Error(String),
    FocusNext,
    FocusPrev,
    /// Space on a checkbox.
    Toggle,
    /// Left/Right on a radio group.
    CycleOption(i32),
    Submit,
    Cancel,
    /// Emitted by the form's submit handler for every accepted submission.
    Submitted(FormData),
    /// Number of fields that failed the submit-time check.
    Rejected(usize),
    ScrollUp,
    ScrollDown,
    Update,
}
