use sigil_core::AnnotationError;
use thiserror::Error;

/// Errors in the payload of a `Hint` directive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HintError {
    #[error("Hint annotation value '{value}' is not one of the known values")]
    UnknownValue { value: String },

    #[error("Hint '{hint}' requires a parameter value")]
    RequiresValue { hint: String },

    #[error("Hint '{hint}' does not accept a parameter value")]
    DoesNotAcceptValue { hint: String },

    #[error("Hint '{hint}' requires additional parameters in parentheses")]
    RequiresParentheses { hint: String },

    #[error("Hint '{hint}' has additional text after parentheses")]
    AdditionalText { hint: String },
}

impl From<HintError> for AnnotationError {
    fn from(error: HintError) -> Self {
        AnnotationError::Check {
            directive: "Hint".to_string(),
            message: error.to_string(),
        }
    }
}
