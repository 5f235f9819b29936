//! Submission coordinator.
//!
//! `Form` owns one schema and the field states of the form being filled in,
//! and turns UI events into state transitions:
//!
//! - value change: store the raw value, validity untouched
//! - blur: validate that single field
//! - cancel: drop all state
//! - submit: validate every enforced field; on success emit the records and
//!   clear, otherwise mark the failing fields invalid and keep all values
//!
//! Validation failures are data (`Validity::Invalid`), never errors. The only
//! error is a field name the schema does not know.

use std::fmt;

use strum::Display;
use tracing::{debug, error, info};

use crate::errors::FormError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::record::FormData;
use crate::schema::FormSchema;
use crate::state::{FieldState, FieldStates, Validity};
use crate::validate::{invalid_names, is_field_valid, validate_required_fields};

/// Phases a submission passes through. Between events a form is `Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FormPhase {
    Editing,
    Validating,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(FormData),
    Rejected { invalid: Vec<String> },
}

impl SubmitOutcome {
    pub fn phase(&self) -> FormPhase {
        match self {
            SubmitOutcome::Accepted(_) => FormPhase::Accepted,
            SubmitOutcome::Rejected { .. } => FormPhase::Rejected,
        }
    }
}

pub type SubmitHandler = Box<dyn FnMut(&FormData) + Send>;

pub struct Form {
    schema: FormSchema,
    states: FieldStates,
    last_outcome: Option<SubmitOutcome>,
    on_submit: Option<SubmitHandler>,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("schema", &self.schema.title)
            .field("states", &self.states)
            .field("last_outcome", &self.last_outcome)
            .finish_non_exhaustive()
    }
}

impl Form {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            states: FieldStates::default(),
            last_outcome: None,
            on_submit: None,
        }
    }

    /// Callback invoked with the records of every accepted submission.
    pub fn with_submit_handler(mut self, handler: impl FnMut(&FormData) + Send + 'static) -> Self {
        self.set_submit_handler(handler);
        self
    }

    pub fn set_submit_handler(&mut self, handler: impl FnMut(&FormData) + Send + 'static) {
        self.on_submit = Some(Box::new(handler));
    }

    /// Start from existing states, e.g. a restored draft.
    pub fn with_states(mut self, states: FieldStates) -> Self {
        self.states = states;
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn states(&self) -> &FieldStates {
        &self.states
    }

    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    /// Current value and validity of a field; untouched fields read as default.
    pub fn field_state(&self, name: &str) -> FieldState {
        self.states.get(name)
    }

    pub fn on_value_change(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.descriptor(name)?;
        self.apply(|s| s.with_value(name, value));
        Ok(())
    }

    /// Validate a single field on focus loss and record the result.
    pub fn on_blur(&mut self, name: &str) -> Result<Validity, FormError> {
        let valid = is_field_valid(&self.states, self.descriptor(name)?);
        let validity = Validity::from(valid);
        debug!(field = name, %validity, "blur");
        self.apply(|s| s.with_validity(name, validity));
        Ok(validity)
    }

    pub fn on_cancel(&mut self) {
        debug!("form cancelled");
        self.apply(FieldStates::cleared);
        self.last_outcome = None;
    }

    /// Submit control handler: the records when accepted, `None` when rejected.
    pub fn on_submit_attempt(&mut self) -> Option<FormData> {
        match self.submit() {
            SubmitOutcome::Accepted(data) => Some(data),
            SubmitOutcome::Rejected { .. } => None,
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        debug!(phase = %FormPhase::Validating, "submit attempt");
        let checks = validate_required_fields(&self.states, self.schema.fields());
        let invalid = invalid_names(&checks);

        let outcome = if invalid.is_empty() {
            let data = FormData::collect(self.schema.fields(), &self.states);
            info!(records = data.len(), "submission accepted");
            if let Some(handler) = self.on_submit.as_mut() {
                handler(&data);
            }
            self.apply(FieldStates::cleared);
            SubmitOutcome::Accepted(data)
        } else {
            info!(?invalid, "submission rejected");
            self.apply(|mut states| {
                for name in &invalid {
                    states = states.with_validity(name, Validity::Invalid);
                }
                states
            });
            SubmitOutcome::Rejected { invalid }
        };

        debug!(phase = %outcome.phase(), "back to {}", FormPhase::Editing);
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Check or uncheck a checkbox.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), FormError> {
        let descriptor = self.descriptor_of_kind(name, FieldKind::Checkbox)?;
        let value = if checked {
            descriptor.checked_value().to_string()
        } else {
            String::new()
        };
        self.apply(|s| s.with_value(name, value));
        Ok(())
    }

    pub fn is_checked(&self, name: &str) -> Result<bool, FormError> {
        let descriptor = self.descriptor_of_kind(name, FieldKind::Checkbox)?;
        Ok(self.states.value(name) == descriptor.checked_value())
    }

    pub fn toggle_checked(&mut self, name: &str) -> Result<bool, FormError> {
        let checked = !self.is_checked(name)?;
        self.set_checked(name, checked)?;
        Ok(checked)
    }

    /// Select a radio option by value.
    pub fn select_option(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let descriptor = self.descriptor_of_kind(name, FieldKind::RadioGroup)?;
        if descriptor.option_position(value).is_none() {
            return Err(FormError::UnknownOption {
                field: name.to_string(),
                value: value.to_string(),
            });
        }
        self.apply(|s| s.with_value(name, value));
        Ok(())
    }

    /// Move the radio selection by `step`, wrapping around. With nothing
    /// selected, a forward step picks the first option and a backward step
    /// the last.
    pub fn cycle_option(&mut self, name: &str, step: i32) -> Result<(), FormError> {
        let descriptor = self.descriptor_of_kind(name, FieldKind::RadioGroup)?;
        let len = descriptor.options.len() as i32;
        if len == 0 {
            return Ok(());
        }
        let next = match descriptor.option_position(self.states.value(name)) {
            Some(idx) => (idx as i32 + step).rem_euclid(len),
            None if step >= 0 => 0,
            None => len - 1,
        };
        let value = descriptor.options[next as usize].value.clone();
        self.apply(|s| s.with_value(name, value));
        Ok(())
    }

    /// Message to show under a field, present only while it is invalid.
    pub fn validation_message(&self, name: &str) -> Option<&str> {
        let descriptor = self.schema.field_by_name(name)?;
        self.states
            .validity(name)
            .is_invalid()
            .then_some(descriptor.validation_message.as_str())
    }

    /// Whether every enforced field holds some value. Not a gate: submit
    /// still validates.
    pub fn all_required_filled(&self) -> bool {
        self.schema
            .fields()
            .iter()
            .filter(|d| d.is_enforced())
            .all(|d| !self.states.value(&d.name).is_empty())
    }

    fn apply(&mut self, f: impl FnOnce(FieldStates) -> FieldStates) {
        let states = std::mem::take(&mut self.states);
        self.states = f(states);
    }

    fn descriptor(&self, name: &str) -> Result<&FieldDescriptor, FormError> {
        self.schema.lookup(name).inspect_err(|e| error!("{e}"))
    }

    fn descriptor_of_kind(
        &self,
        name: &str,
        kind: FieldKind,
    ) -> Result<&FieldDescriptor, FormError> {
        let descriptor = self.descriptor(name)?;
        if descriptor.kind != kind {
            return Err(FormError::WrongKind(name.to_string(), kind));
        }
        Ok(descriptor)
    }
}
