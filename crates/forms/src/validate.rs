//! Validator engine.
//!
//! Per-field predicates plus the aggregation used as the submit gate. All
//! functions here are pure: the result depends only on the stored value.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::field::FieldDescriptor;
use crate::state::FieldStates;

lazy_static! {
    static ref LETTERS_AND_SPACES: Regex = Regex::new(r"^[\p{L}\s]+$").unwrap();
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[\w.\-]+@[\w.\-]+$").unwrap();
}

/// Non-empty and made of letters and whitespace only.
pub fn letters_and_spaces(value: &str) -> bool {
    !value.is_empty() && LETTERS_AND_SPACES.is_match(value)
}

/// Non-empty and shaped like `local-part@domain`.
pub fn email_shape(value: &str) -> bool {
    !value.is_empty() && EMAIL_SHAPE.is_match(value)
}

/// An integer strictly greater than zero.
pub fn positive_integer(value: &str) -> bool {
    value.trim().parse::<i64>().is_ok_and(|n| n > 0)
}

/// Validity of one field given the current states.
///
/// Fields without a validator are always valid, whatever `required` says.
pub fn is_field_valid(states: &FieldStates, descriptor: &FieldDescriptor) -> bool {
    match &descriptor.validator {
        None => true,
        Some(validator) => validator.check(&states.get(&descriptor.name)),
    }
}

/// Outcome of checking one enforced field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub name: String,
    pub valid: bool,
}

/// Check every field that is required and has a validator, in table order.
pub fn validate_required_fields<'a>(
    states: &FieldStates,
    descriptors: impl IntoIterator<Item = &'a FieldDescriptor>,
) -> Vec<FieldCheck> {
    descriptors
        .into_iter()
        .filter(|d| d.is_enforced())
        .map(|d| FieldCheck {
            name: d.name.clone(),
            valid: is_field_valid(states, d),
        })
        .collect()
}

/// Names of the failing entries of a check run.
pub fn invalid_names(checks: &[FieldCheck]) -> Vec<String> {
    checks
        .iter()
        .filter(|c| !c.valid)
        .map(|c| c.name.clone())
        .collect()
}
