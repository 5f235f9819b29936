//! Form engine for single-page forms.
//!
//! - [`FormSchema`] / [`FieldDescriptor`]: the static field table
//! - [`FieldStates`]: per-field value and validity, updated by value-returning transforms
//! - [`validate`]: predicates and the submit-time aggregation
//! - [`Form`]: turns change / blur / cancel / submit events into state transitions
//!   and emits [`FormData`] on accepted submissions
//!
//! Rendering is left to the caller; nothing here touches a terminal or a DOM.

pub mod create_user;
pub mod errors;
pub mod field;
pub mod form;
pub mod record;
pub mod schema;
pub mod state;
pub mod validate;

pub use create_user::create_user_schema;
pub use errors::FormError;
pub use field::{DEFAULT_ON_VALUE, FieldDescriptor, FieldKind, RadioOption, Validator};
pub use form::{Form, FormPhase, SubmitHandler, SubmitOutcome};
pub use record::{FormData, RecordValue, SubmittedRecord};
pub use schema::FormSchema;
pub use state::{FieldState, FieldStates, Validity};
pub use validate::{FieldCheck, is_field_valid, validate_required_fields};
