//! Runtime field state.
//!
//! `FieldStates` is the mutable half of a form: one `FieldState` per field
//! that has been touched, keyed by field name. Every transform takes the
//! collection by value and hands back the successor, so whoever owns the
//! collection swaps it in one step between events:
//!
//! ```ignore
//! let states = FieldStates::default()
//!     .with_value("name", "Anna")
//!     .with_validity("name", Validity::Valid);
//! assert_eq!(states.get("name").value, "Anna");
//! ```
//!
//! The store does not know about descriptors; names are not checked here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::Display;

/// Validation result of a single field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Validity {
    /// Never validated.
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_invalid(self) -> bool {
        self == Validity::Invalid
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }
}

/// Current value and validity of one field.
///
/// An empty `value` means "unset": never typed into, unchecked checkbox,
/// or no radio selection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub name: String,
    pub value: String,
    pub validity: Validity,
}

impl FieldState {
    /// The state an untouched field reads as.
    pub fn untouched(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// All field states of one in-progress form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldStates {
    entries: HashMap<String, FieldState>,
}

impl FieldStates {
    /// Stored state for `name`, or the untouched default.
    pub fn get(&self, name: &str) -> FieldState {
        self.entries
            .get(name)
            .cloned()
            .unwrap_or_else(|| FieldState::untouched(name))
    }

    /// Borrow the stored value without cloning; empty for untouched fields.
    pub fn value(&self, name: &str) -> &str {
        self.entries.get(name).map(|s| s.value.as_str()).unwrap_or("")
    }

    pub fn validity(&self, name: &str) -> Validity {
        self.entries
            .get(name)
            .map(|s| s.validity)
            .unwrap_or_default()
    }

    /// Replace the value of `name`, keeping its validity.
    #[must_use]
    pub fn with_value(mut self, name: &str, value: impl Into<String>) -> Self {
        self.entry(name).value = value.into();
        self
    }

    /// Set the validity of `name`, keeping its value.
    #[must_use]
    pub fn with_validity(mut self, name: &str, validity: Validity) -> Self {
        self.entry(name).validity = validity;
        self
    }

    /// Drop every entry.
    #[must_use]
    pub fn cleared(self) -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldState> {
        self.entries.values()
    }

    fn entry(&mut self, name: &str) -> &mut FieldState {
        self.entries
            .entry(name.to_string())
            .or_insert_with(|| FieldState::untouched(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_entry_reads_as_default() {
        let states = FieldStates::default();
        assert_eq!(
            states.get("email"),
            FieldState {
                name: "email".into(),
                value: String::new(),
                validity: Validity::Unknown,
            }
        );
        assert!(states.is_empty());
    }

    #[test]
    fn set_value_keeps_validity() {
        let states = FieldStates::default()
            .with_validity("name", Validity::Invalid)
            .with_value("name", "Anna");
        let s = states.get("name");
        assert_eq!(s.value, "Anna");
        assert_eq!(s.validity, Validity::Invalid);
    }

    #[test]
    fn set_validity_keeps_value() {
        let states = FieldStates::default()
            .with_value("age", "30")
            .with_validity("age", Validity::Valid);
        assert_eq!(states.value("age"), "30");
        assert_eq!(states.validity("age"), Validity::Valid);
    }

    #[test]
    fn update_replaces_by_name() {
        let states = FieldStates::default()
            .with_value("name", "A")
            .with_value("name", "Ann")
            .with_value("surname", "Lee");
        assert_eq!(states.len(), 2);
        assert_eq!(states.value("name"), "Ann");
    }

    #[test]
    fn set_value_is_idempotent() {
        let once = FieldStates::default().with_value("color", "Blue");
        let twice = FieldStates::default()
            .with_value("color", "Blue")
            .with_value("color", "Blue");
        assert_eq!(once, twice);
    }

    #[test]
    fn cleared_forgets_everything() {
        let states = FieldStates::default()
            .with_value("name", "Anna")
            .with_validity("name", Validity::Valid)
            .with_value("age", "x")
            .cleared();
        assert!(states.is_empty());
        assert_eq!(states.get("name"), FieldState::untouched("name"));
        assert_eq!(states.get("age").validity, Validity::Unknown);
    }

    #[test]
    fn validity_from_bool() {
        assert_eq!(Validity::from(true), Validity::Valid);
        assert_eq!(Validity::from(false), Validity::Invalid);
        assert_eq!(Validity::default().to_string(), "unknown");
    }
}
