//! Form schema: the field descriptor table.
//!
//! `FormSchema` groups the `FieldDescriptor`s of one form, in display order,
//! with a title and an optional description. Construction checks the table
//! once (unique names, well-formed radio groups) so every later lookup is
//! unambiguous.
//!
//! ```ignore
//! let schema = FormSchema::new("Create User", vec![
//!     FieldDescriptor::new("name", "Name", FieldKind::SingleLineString)
//!         .required()
//!         .validator(Validator::LettersAndSpaces),
//! ])?
//! .description("Fill the form");
//! ```
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::FormError;
use crate::field::{FieldDescriptor, FieldKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self, FormError> {
        check_fields(&fields)?;
        Ok(Self {
            title: title.into(),
            description: None,
            fields,
        })
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Parse and check a table from JSON.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        serde_json::from_str::<Self>(json)?.validated()
    }

    /// Re-run the table checks on a schema deserialized from elsewhere.
    pub fn validated(self) -> Result<Self, FormError> {
        check_fields(&self.fields)?;
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String, FormError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Like `field_by_name`, but a miss is an error: names handed to the
    /// engine are expected to come from this table.
    pub fn lookup(&self, name: &str) -> Result<&FieldDescriptor, FormError> {
        self.field_by_name(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

fn check_fields(fields: &[FieldDescriptor]) -> Result<(), FormError> {
    let mut names = HashSet::new();
    for field in fields {
        if !names.insert(field.name.as_str()) {
            return Err(FormError::DuplicateField(field.name.clone()));
        }
        if field.kind == FieldKind::RadioGroup {
            if field.options.is_empty() {
                return Err(FormError::MissingOptions(field.name.clone()));
            }
            let mut values = HashSet::new();
            for option in &field.options {
                if !values.insert(option.value.as_str()) {
                    return Err(FormError::DuplicateOption {
                        field: field.name.clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
