use crate::errors::FormError;
use crate::field::{FieldDescriptor, FieldKind, RadioOption, Validator};
use crate::schema::FormSchema;

/// The "Create User" form:
/// - Name, Surname, Favorite color [letters and spaces, required]
/// - Email [email shape, required]
/// - Age [positive integer, required]
/// - Sex [radio group: Male / Female, optional]
/// - Notifications [checkbox, optional]
pub fn create_user_schema() -> Result<FormSchema, FormError> {
    let letters = |name: &str, label: &str| {
        FieldDescriptor::new(name, label, FieldKind::SingleLineString)
            .required()
            .validator(Validator::LettersAndSpaces)
            .message(format!("{label} must contain only letters and spaces"))
    };

    Ok(FormSchema::new(
        "Create User",
        vec![
            letters("name", "Name").placeholder("Your name"),
            letters("surname", "Surname").placeholder("Your surname"),
            FieldDescriptor::new("email", "Email", FieldKind::Email)
                .required()
                .validator(Validator::Email)
                .message("Email must look like name@example.com")
                .placeholder("name@example.com"),
            FieldDescriptor::new("age", "Age", FieldKind::Numeric)
                .required()
                .validator(Validator::PositiveInteger)
                .message("Age must be a number greater than zero")
                .placeholder("Your age"),
            letters("color", "Favorite color").placeholder("Your favorite color"),
            FieldDescriptor::new("sex", "Sex", FieldKind::RadioGroup).options([
                RadioOption::new("Male", "male"),
                RadioOption::new("Female", "female"),
            ]),
            FieldDescriptor::new(
                "notification",
                "I would like to receive notifications",
                FieldKind::Checkbox,
            ),
        ],
    )?
    .description("Fill the form"))
}
