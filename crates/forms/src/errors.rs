use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("duplicate field: {0}")]
    DuplicateField(String),

    #[error("duplicate option {value:?} in radio group {field}")]
    DuplicateOption { field: String, value: String },

    #[error("radio group {0} has no options")]
    MissingOptions(String),

    #[error("option {value:?} is not offered by radio group {field}")]
    UnknownOption { field: String, value: String },

    #[error("field {0} is not a {1}")]
    WrongKind(String, crate::field::FieldKind),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
