//! Submitted records: the normalized output of an accepted submission.

use serde::Serialize;

use crate::field::{FieldDescriptor, FieldKind};
use crate::state::FieldStates;

/// Output value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    Text(String),
    Flag(bool),
    /// No radio option selected.
    Unset,
}

impl RecordValue {
    /// Normalize a stored value for `kind`: checkboxes become booleans, an
    /// empty radio group is `Unset`, everything else passes through as text.
    pub fn normalize(kind: FieldKind, value: &str) -> Self {
        match kind {
            FieldKind::Checkbox => RecordValue::Flag(!value.is_empty()),
            FieldKind::RadioGroup if value.is_empty() => RecordValue::Unset,
            _ => RecordValue::Text(value.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordValue::Text(s) => f.write_str(s),
            RecordValue::Flag(b) => write!(f, "{b}"),
            RecordValue::Unset => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedRecord {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: RecordValue,
}

/// Records of one submission, in descriptor-table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData(pub Vec<SubmittedRecord>);

impl FormData {
    /// Build one record per descriptor from the current states.
    pub fn collect<'a>(
        descriptors: impl IntoIterator<Item = &'a FieldDescriptor>,
        states: &FieldStates,
    ) -> Self {
        FormData(
            descriptors
                .into_iter()
                .map(|d| SubmittedRecord {
                    name: d.name.clone(),
                    label: d.label.clone(),
                    kind: d.kind,
                    value: RecordValue::normalize(d.kind, states.value(&d.name)),
                })
                .collect(),
        )
    }

    pub fn records(&self) -> &[SubmittedRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SubmittedRecord> {
        self.0.iter().find(|r| r.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
