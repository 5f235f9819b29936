//! Field descriptors: the static, declarative half of a form.
//!
//! A `FieldDescriptor` names a field, says what kind of control renders it,
//! whether submission requires it, and which `Validator` decides its validity.
//! Descriptors never change after the `FormSchema` holding them is built;
//! runtime values live in `state.rs`.
//!
//! ```ignore
//! use forms::{FieldDescriptor, FieldKind, Validator};
//!
//! let age = FieldDescriptor::new("age", "Age", FieldKind::Numeric)
//!     .required()
//!     .validator(Validator::PositiveInteger)
//!     .message("Age must be a number greater than zero");
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::state::FieldState;
use crate::validate;

/// Value stored for a checked checkbox unless the descriptor overrides it.
pub const DEFAULT_ON_VALUE: &str = "on";

/// Kind of control a field is rendered as.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Email,
    Numeric,
    SingleLineString,
    Checkbox,
    RadioGroup,
}

impl FieldKind {
    /// Kinds edited character by character.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Email | FieldKind::Numeric | FieldKind::SingleLineString
        )
    }
}

/// One selectable entry of a radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioOption {
    pub label: String,
    pub value: String,
}

impl RadioOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Validity predicate attached to a descriptor.
///
/// Predicates are looked up by variant instead of being captured closures, so
/// a descriptor table stays plain data and can be loaded from JSON.
/// `Custom` takes a capture-free function for callers that need a rule not
/// listed here; it is skipped by serde.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Validator {
    /// Non-empty, letters and whitespace only.
    LettersAndSpaces,
    /// Non-empty, `local-part@domain` shape.
    Email,
    /// Parses as an integer strictly greater than zero.
    PositiveInteger,
    #[serde(skip)]
    Custom(fn(&FieldState) -> bool),
}

impl Validator {
    pub fn check(&self, state: &FieldState) -> bool {
        match self {
            Validator::LettersAndSpaces => validate::letters_and_spaces(&state.value),
            Validator::Email => validate::email_shape(&state.value),
            Validator::PositiveInteger => validate::positive_integer(&state.value),
            Validator::Custom(f) => f(state),
        }
    }
}

/// Declarative description of one form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<Validator>,
    #[serde(default)]
    pub validation_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Radio groups only; values must be unique.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<RadioOption>,
    /// Checkboxes only; falls back to [`DEFAULT_ON_VALUE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_value: Option<String>,
}

impl FieldDescriptor {
    /// Create an optional field without validator.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            validator: None,
            validation_message: String::new(),
            placeholder: None,
            options: Vec::new(),
            on_value: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Message shown beneath the control while the field is invalid.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.validation_message = message.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = RadioOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    pub fn on_value(mut self, value: impl Into<String>) -> Self {
        self.on_value = Some(value.into());
        self
    }

    /// Value representing "checked" for a checkbox.
    pub fn checked_value(&self) -> &str {
        self.on_value.as_deref().unwrap_or(DEFAULT_ON_VALUE)
    }

    /// Only fields that are required *and* carry a validator take part in the
    /// submit-time gate.
    pub fn is_enforced(&self) -> bool {
        self.required && self.validator.is_some()
    }

    pub fn option_position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_kebab_case() {
        assert_eq!(FieldKind::SingleLineString.to_string(), "single-line-string");
        assert_eq!(
            serde_json::to_string(&FieldKind::RadioGroup).unwrap(),
            "\"radio-group\""
        );
        assert_eq!("email".parse::<FieldKind>().unwrap(), FieldKind::Email);
    }

    #[test]
    fn checkbox_defaults_to_on() {
        let plain = FieldDescriptor::new("notify", "Notify me", FieldKind::Checkbox);
        assert_eq!(plain.checked_value(), "on");
        let custom = plain.clone().on_value("yes");
        assert_eq!(custom.checked_value(), "yes");
    }

    #[test]
    fn required_without_validator_is_not_enforced() {
        let f = FieldDescriptor::new("sex", "Sex", FieldKind::RadioGroup).required();
        assert!(!f.is_enforced());
        let g = FieldDescriptor::new("name", "Name", FieldKind::SingleLineString)
            .required()
            .validator(Validator::LettersAndSpaces);
        assert!(g.is_enforced());
    }

    #[test]
    fn descriptor_deserializes_with_defaults() {
        let json = r#"{"name":"age","label":"Age","kind":"numeric","validator":"positive-integer"}"#;
        let f: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(f.kind, FieldKind::Numeric);
        assert!(!f.required);
        assert!(matches!(f.validator, Some(Validator::PositiveInteger)));
        assert!(f.validation_message.is_empty());
    }
}
