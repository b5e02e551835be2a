//! Declarative request validation for student records.

mod validation;
pub use validation::{
    validate_student, FieldViolation, Rule, ValidationErrors, MAX_AGE, MAX_NAME_LEN, MIN_AGE,
};
