//! Non-interactive subcommands.

use color_eyre::Result;
use forms::{FieldStates, FormSchema, is_field_valid};
use serde::Serialize;
use std::fmt;

/// Result of running one field's validator on a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub field: String,
    pub value: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, self.valid) {
            (_, true) => write!(f, "{}: valid", self.field),
            (Some(message), false) => write!(f, "{}: invalid ({message})", self.field),
            (None, false) => write!(f, "{}: invalid", self.field),
        }
    }
}

pub fn schema_json(schema: &FormSchema) -> Result<String> {
    Ok(schema.to_json()?)
}

pub fn check(schema: &FormSchema, field: &str, value: &str) -> Result<CheckReport> {
    let descriptor = schema.lookup(field)?;
    let states = FieldStates::default().with_value(field, value);
    let valid = is_field_valid(&states, descriptor);
    let message = (!valid && !descriptor.validation_message.is_empty())
        .then(|| descriptor.validation_message.clone());
    Ok(CheckReport {
        field: field.to_string(),
        value: value.to_string(),
        valid,
        message,
    })
}
